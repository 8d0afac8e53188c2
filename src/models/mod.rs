pub mod budget;
pub mod expense;
pub mod window;
