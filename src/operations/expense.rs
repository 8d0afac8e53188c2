use crate::db::expense_repository::{self, SortKey};
use crate::error::{AppError, AppResult};
use crate::models::expense::Expense;
use crate::operations::category::validate_category_name;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Validated fields of one expense entry, parsed from the
/// `name, amount, category, date` input line.
#[derive(Debug, PartialEq, Eq)]
pub struct ExpenseEntry {
    pub name: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

pub fn parse_expense_entry(input: &str) -> AppResult<ExpenseEntry> {
    let parts: Vec<&str> = input.split(',').map(|s| s.trim()).collect();
    if parts.len() != 4 {
        return Err(AppError::Validation(format!(
            "Expected 4 details separated by commas but got {}",
            parts.len()
        )));
    }

    let name = parts[0];
    if name.is_empty() {
        return Err(AppError::Validation("Name cannot be empty".to_string()));
    }
    if name.len() > 255 {
        return Err(AppError::Validation("Name too long".to_string()));
    }

    let amount = Decimal::from_str(parts[1]).map_err(|_| {
        AppError::Validation(format!(
            "Invalid amount '{}'. Must be a valid number",
            parts[1]
        ))
    })?;
    if amount < Decimal::ZERO {
        return Err(AppError::Validation(
            "Amount cannot be negative".to_string(),
        ));
    }

    let category = validate_category_name(parts[2])?;

    let date = NaiveDate::parse_from_str(parts[3], "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format. Use YYYY-MM-DD".to_string()))?;

    Ok(ExpenseEntry {
        name: name.to_string(),
        amount,
        category: category.to_string(),
        date,
    })
}

fn parse_id(id_str: &str) -> AppResult<i64> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid expense id '{}'", id_str)))
}

pub fn add_expense_db(conn: &Connection, owner: &str, input: &str) -> AppResult<()> {
    let entry = parse_expense_entry(input)?;
    expense_repository::insert_expense(
        conn,
        owner,
        &entry.name,
        &entry.amount,
        &entry.category,
        entry.date,
    )
}

pub fn update_expense_db(
    conn: &Connection,
    owner: &str,
    id_str: &str,
    input: &str,
) -> AppResult<()> {
    let id = parse_id(id_str)?;
    let entry = parse_expense_entry(input)?;
    expense_repository::update_expense(
        conn,
        id,
        owner,
        &entry.name,
        &entry.amount,
        &entry.category,
        entry.date,
    )
}

pub fn remove_expense_db(conn: &Connection, id_str: &str) -> AppResult<()> {
    expense_repository::delete_expense(conn, parse_id(id_str)?)
}

pub fn list_expenses_db(conn: &Connection, owner: &str) -> AppResult<Vec<Expense>> {
    expense_repository::list_expenses(conn, owner)
}

pub fn sort_expenses_db(conn: &Connection, owner: &str, key_str: &str) -> AppResult<Vec<Expense>> {
    let key = SortKey::parse(key_str).ok_or_else(|| {
        AppError::Validation(format!(
            "Unknown sort key '{}'. Use name, category, amount, date or date-added",
            key_str
        ))
    })?;
    expense_repository::list_sorted(conn, owner, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;

    #[test]
    fn test_parse_entry_success() {
        let entry = parse_expense_entry("Groceries, 45.20, Food, 2024-02-10").unwrap();
        assert_eq!(entry.name, "Groceries");
        assert_eq!(entry.amount, Decimal::from_str("45.20").unwrap());
        assert_eq!(entry.category, "Food");
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
    }

    #[test]
    fn test_parse_entry_wrong_field_count() {
        let result = parse_expense_entry("Groceries, 45.20, Food");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_entry_bad_amount() {
        let result = parse_expense_entry("Groceries, lots, Food, 2024-02-10");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_entry_negative_amount() {
        let result = parse_expense_entry("Groceries, -3, Food, 2024-02-10");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_entry_bad_date() {
        let result = parse_expense_entry("Groceries, 45.20, Food, 02/10/2024");
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = parse_expense_entry("Groceries, 45.20, Food, 2024-02-30");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_add_and_list() {
        let conn = establish_test_connection().unwrap();
        add_expense_db(&conn, "ana", "Groceries, 45.20, Food, 2024-02-10").unwrap();

        let expenses = list_expenses_db(&conn, "ana").unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].owner, "ana");
        assert_eq!(expenses[0].name, "Groceries");
    }

    #[test]
    fn test_update_by_id() {
        let conn = establish_test_connection().unwrap();
        add_expense_db(&conn, "ana", "Groceries, 45.20, Food, 2024-02-10").unwrap();
        let id = list_expenses_db(&conn, "ana").unwrap()[0].id;

        update_expense_db(&conn, "ana", &id.to_string(), "Market, 50, Food, 2024-02-11").unwrap();

        let expenses = list_expenses_db(&conn, "ana").unwrap();
        assert_eq!(expenses[0].name, "Market");
    }

    #[test]
    fn test_remove_with_bad_id_string() {
        let conn = establish_test_connection().unwrap();
        let result = remove_expense_db(&conn, "seven");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_sort_with_unknown_key() {
        let conn = establish_test_connection().unwrap();
        let result = sort_expenses_db(&conn, "ana", "rowid; DROP TABLE expenses");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_sort_by_name() {
        let conn = establish_test_connection().unwrap();
        add_expense_db(&conn, "ana", "Zoo, 20, Fun, 2024-02-10").unwrap();
        add_expense_db(&conn, "ana", "Apples, 5, Food, 2024-02-11").unwrap();

        let expenses = sort_expenses_db(&conn, "ana", "name").unwrap();
        assert_eq!(expenses[0].name, "Apples");
        assert_eq!(expenses[1].name, "Zoo");
    }
}
