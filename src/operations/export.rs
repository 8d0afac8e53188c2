use crate::db::{budget_repository, expense_repository};
use crate::error::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;

/// Writes the expense catalog to `path` as CSV, mirroring the on-screen
/// table columns. Returns the number of exported records.
pub fn export_expenses_csv(conn: &Connection, owner: &str, path: &Path) -> AppResult<usize> {
    let expenses = expense_repository::list_expenses(conn, owner)?;
    if expenses.is_empty() {
        return Err(AppError::EmptyDataset);
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Name", "Amount", "Category", "Date", "ID"])?;
    for expense in &expenses {
        let amount = format!("{:.2}", expense.amount);
        let date = expense.date.to_string();
        let id = expense.id.to_string();
        writer.write_record([
            expense.name.as_str(),
            amount.as_str(),
            expense.category.as_str(),
            date.as_str(),
            id.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(expenses.len())
}

/// Same for the budget catalog.
pub fn export_budgets_csv(conn: &Connection, owner: &str, path: &Path) -> AppResult<usize> {
    let budgets = budget_repository::list_budgets(conn, owner)?;
    if budgets.is_empty() {
        return Err(AppError::EmptyDataset);
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Category", "Amount", "ID"])?;
    for budget in &budgets {
        let amount = format!("{:.2}", budget.amount);
        let id = budget.id.to_string();
        writer.write_record([budget.category.as_str(), amount.as_str(), id.as_str()])?;
    }
    writer.flush()?;
    Ok(budgets.len())
}
