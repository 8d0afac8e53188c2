pub mod budget;
pub mod category;
pub mod expense;
pub mod export;
pub mod reconcile;
pub mod stats;
