use crate::db::{budget_repository, category_repository, expense_repository};
use crate::error::{AppError, AppResult};
use crate::models::expense::Expense;
use crate::operations::reconcile::{
    ReconciliationRow, TimeSeriesPoint, compute_cumulative_series, compute_monthly_reconciliation,
    overspent_categories, resolve_date_window, select_top_or_bottom_savings,
};
use rusqlite::Connection;
use rust_decimal::Decimal;

/// The savings rankings show at most this many categories.
const RANKING_SIZE: usize = 5;

fn expenses_for(
    conn: &Connection,
    owner: &str,
    month_name: &str,
    year: &str,
) -> AppResult<Vec<Expense>> {
    let window = resolve_date_window(month_name, year)?;
    expense_repository::list_in_window(conn, owner, &window)
}

/// The per-category budget/spent/savings table for the selected period.
/// Empty when the owner has no budgeted categories; that is data, not an
/// error.
pub fn savings_table(
    conn: &Connection,
    owner: &str,
    month_name: &str,
    year: &str,
) -> AppResult<Vec<ReconciliationRow>> {
    let categories = category_repository::list_categories(conn, owner)?;
    let budgets = budget_repository::list_budgets(conn, owner)?;
    let expenses = expenses_for(conn, owner, month_name, year)?;
    Ok(compute_monthly_reconciliation(&categories, &budgets, &expenses))
}

pub fn top_savings(
    conn: &Connection,
    owner: &str,
    month_name: &str,
    year: &str,
) -> AppResult<Vec<(String, Decimal)>> {
    let rows = savings_table(conn, owner, month_name, year)?;
    select_top_or_bottom_savings(&rows, RANKING_SIZE, false)
}

pub fn bottom_savings(
    conn: &Connection,
    owner: &str,
    month_name: &str,
    year: &str,
) -> AppResult<Vec<(String, Decimal)>> {
    let rows = savings_table(conn, owner, month_name, year)?;
    select_top_or_bottom_savings(&rows, RANKING_SIZE, true)
}

/// (category, budget, spent) triples backing the budget-vs-spent view.
pub fn budget_vs_spent(
    conn: &Connection,
    owner: &str,
    month_name: &str,
    year: &str,
) -> AppResult<Vec<(String, Decimal, Decimal)>> {
    let rows = savings_table(conn, owner, month_name, year)?;
    if rows.is_empty() {
        return Err(AppError::EmptyDataset);
    }
    Ok(rows
        .into_iter()
        .map(|row| (row.category, row.budget, row.spent))
        .collect())
}

/// Spend per category over the period, in first-seen expense order. Unlike
/// the reconciliation table this draws its categories from the expenses
/// themselves, so unbudgeted spending still shows up.
pub fn expense_distribution(
    conn: &Connection,
    owner: &str,
    month_name: &str,
    year: &str,
) -> AppResult<Vec<(String, Decimal)>> {
    let expenses = expenses_for(conn, owner, month_name, year)?;
    if expenses.is_empty() {
        return Err(AppError::EmptyDataset);
    }

    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for expense in &expenses {
        match totals.iter_mut().find(|(c, _)| *c == expense.category) {
            Some((_, total)) => *total += expense.amount,
            None => totals.push((expense.category.clone(), expense.amount)),
        }
    }
    Ok(totals)
}

/// Cumulative spend by day of month for the period.
pub fn cumulative_spend(
    conn: &Connection,
    owner: &str,
    month_name: &str,
    year: &str,
) -> AppResult<Vec<TimeSeriesPoint>> {
    let expenses = expenses_for(conn, owner, month_name, year)?;
    compute_cumulative_series(&expenses)
}

/// Categories whose budget was exceeded in the period.
pub fn budget_alerts(
    conn: &Connection,
    owner: &str,
    month_name: &str,
    year: &str,
) -> AppResult<Vec<String>> {
    let rows = savings_table(conn, owner, month_name, year)?;
    Ok(overspent_categories(&rows))
}
