use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A single dated transaction tagged with a category and amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub id: i64,
    pub owner: String,
    pub name: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}
