use rust_decimal::Decimal;

/// A monthly spending limit for one category. The store does not enforce
/// uniqueness per (owner, category); duplicates are resolved by the
/// reconciliation step, last record wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Budget {
    pub id: i64,
    pub owner: String,
    pub category: String,
    pub amount: Decimal,
}
