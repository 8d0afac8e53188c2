use crate::db::budget_repository;
use crate::error::{AppError, AppResult};
use crate::models::budget::Budget;
use crate::operations::category::validate_category_name;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;

fn parse_amount(amount_str: &str) -> AppResult<Decimal> {
    let amount = Decimal::from_str(amount_str.trim()).map_err(|_| {
        AppError::Validation(format!(
            "Invalid budget amount '{}'. Must be a valid number",
            amount_str
        ))
    })?;
    if amount < Decimal::ZERO {
        return Err(AppError::Validation(
            "Budget cannot be negative".to_string(),
        ));
    }
    Ok(amount)
}

fn parse_id(id_str: &str) -> AppResult<i64> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid budget id '{}'", id_str)))
}

/// Refuses a second budget for a category that already has one. The store
/// itself does not enforce this, so records created elsewhere may still
/// collide; reconciliation resolves those last-read-wins.
pub fn set_budget_db(
    conn: &Connection,
    owner: &str,
    category: &str,
    amount_str: &str,
) -> AppResult<()> {
    let category = validate_category_name(category)?;
    let amount = parse_amount(amount_str)?;

    let existing = budget_repository::list_budgets(conn, owner)?;
    if existing.iter().any(|b| b.category == category) {
        return Err(AppError::Validation(format!(
            "A budget is already set for category '{}'",
            category
        )));
    }
    budget_repository::insert_budget(conn, owner, category, &amount)
}

pub fn update_budget_db(
    conn: &Connection,
    owner: &str,
    id_str: &str,
    category: &str,
    amount_str: &str,
) -> AppResult<()> {
    let id = parse_id(id_str)?;
    let category = validate_category_name(category)?;
    let amount = parse_amount(amount_str)?;
    budget_repository::update_budget(conn, id, owner, category, &amount)
}

pub fn remove_budget_db(conn: &Connection, id_str: &str) -> AppResult<()> {
    budget_repository::delete_budget(conn, parse_id(id_str)?)
}

pub fn list_budgets_db(conn: &Connection, owner: &str) -> AppResult<Vec<Budget>> {
    budget_repository::list_budgets(conn, owner)
}
