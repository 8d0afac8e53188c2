use crate::error::{AppError, AppResult};
use crate::models::budget::Budget;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn insert_budget(
    conn: &Connection,
    owner: &str,
    category: &str,
    amount: &Decimal,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO budgets (owner, category, amount) VALUES (?1, ?2, ?3)",
        [owner, category, &amount.to_string()],
    )?;
    Ok(())
}

pub fn update_budget(
    conn: &Connection,
    id: i64,
    owner: &str,
    category: &str,
    amount: &Decimal,
) -> AppResult<()> {
    let rows = conn.execute(
        "UPDATE budgets SET owner = ?1, category = ?2, amount = ?3 WHERE id = ?4",
        rusqlite::params![owner, category, amount.to_string(), id],
    )?;
    if rows == 0 {
        return Err(AppError::NotFound(format!("Budget with id {}", id)));
    }
    Ok(())
}

pub fn delete_budget(conn: &Connection, id: i64) -> AppResult<()> {
    let rows = conn.execute("DELETE FROM budgets WHERE id = ?1", [id])?;
    if rows == 0 {
        return Err(AppError::NotFound(format!("Budget with id {}", id)));
    }
    Ok(())
}

/// Budgets in insertion order. Nothing prevents two records for the same
/// category; reconciliation keeps the amount of the last one read.
pub fn list_budgets(conn: &Connection, owner: &str) -> AppResult<Vec<Budget>> {
    let mut stmt = conn
        .prepare("SELECT id, owner, category, amount FROM budgets WHERE owner = ?1 ORDER BY id")?;

    let iter = stmt.query_map([owner], |row| {
        let amount_str: String = row.get(3)?;
        let amount = Decimal::from_str(&amount_str)
            .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?;
        Ok(Budget {
            id: row.get(0)?,
            owner: row.get(1)?,
            category: row.get(2)?,
            amount,
        })
    })?;

    let mut budgets = Vec::new();
    for budget in iter {
        budgets.push(budget?);
    }
    Ok(budgets)
}
