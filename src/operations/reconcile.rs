use crate::error::{AppError, AppResult};
use crate::models::budget::Budget;
use crate::models::expense::Expense;
use crate::models::window::DateWindow;
use chrono::{Datelike, Month};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

/// Sentinel month name meaning "the whole calendar year".
pub const ALL_TIME: &str = "All Time";

/// Per-category join of a budget with the actual spend in a period.
/// `savings` goes negative on overspend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationRow {
    pub category: String,
    pub budget: Decimal,
    pub spent: Decimal,
    pub savings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSeriesPoint {
    pub day: u32,
    pub cumulative: Decimal,
}

/// Joins budgets to expenses per category. Emits one row per category that
/// appears in both the category list and the budget set, in first-seen
/// category order; categories without a budget are silently excluded.
/// Duplicate budget records resolve last-read-wins, duplicate category
/// names count once. Pure, holds no state between calls.
pub fn compute_monthly_reconciliation(
    categories: &[String],
    budgets: &[Budget],
    expenses: &[Expense],
) -> Vec<ReconciliationRow> {
    let mut budget_amounts: HashMap<&str, Decimal> = HashMap::new();
    for budget in budgets {
        budget_amounts.insert(budget.category.as_str(), budget.amount);
    }

    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    for category in categories {
        if !seen.insert(category.as_str()) {
            continue;
        }
        let Some(budget) = budget_amounts.get(category.as_str()) else {
            continue;
        };
        let spent = expenses
            .iter()
            .filter(|e| e.category == *category)
            .fold(Decimal::ZERO, |acc, e| acc + e.amount);
        rows.push(ReconciliationRow {
            category: category.clone(),
            budget: *budget,
            spent,
            savings: *budget - spent,
        });
    }
    rows
}

/// Ranks rows by savings and keeps the first `n`. `ascending = false` puts
/// the highest savings first. The sort is stable, so equal savings keep
/// their input order. An empty row set is reported as `EmptyDataset` so
/// callers can tell "no data" apart from "fewer than n".
pub fn select_top_or_bottom_savings(
    rows: &[ReconciliationRow],
    n: usize,
    ascending: bool,
) -> AppResult<Vec<(String, Decimal)>> {
    if rows.is_empty() {
        return Err(AppError::EmptyDataset);
    }

    let mut ranked: Vec<(String, Decimal)> = rows
        .iter()
        .map(|row| (row.category.clone(), row.savings))
        .collect();
    if ascending {
        ranked.sort_by(|a, b| a.1.cmp(&b.1));
    } else {
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
    }
    ranked.truncate(n);
    Ok(ranked)
}

/// Running spend total keyed by day of month, anchored at `(0, 0)` and
/// sorted by day. The sum accumulates in the order the expenses were
/// supplied, not in date order, and when two expenses share a day the
/// later one's running total replaces the earlier one's. Both are
/// deliberate carry-overs from the desktop app this replaces.
pub fn compute_cumulative_series(expenses: &[Expense]) -> AppResult<Vec<TimeSeriesPoint>> {
    let mut days: Vec<u32> = vec![0];
    let mut totals: HashMap<u32, Decimal> = HashMap::new();
    totals.insert(0, Decimal::ZERO);

    let mut running = Decimal::ZERO;
    for expense in expenses {
        let day = expense.date.day();
        running += expense.amount;
        if totals.insert(day, running).is_none() {
            days.push(day);
        }
    }

    if days.len() == 1 {
        return Err(AppError::EmptyDataset);
    }

    days.sort_unstable();
    Ok(days
        .into_iter()
        .map(|day| TimeSeriesPoint {
            day,
            cumulative: totals[&day],
        })
        .collect())
}

/// Filter bounds for a (month, year) selection. The month form keeps the
/// literal `-31` upper bound of the original store query: compared as text
/// against zero-padded dates it is never below any valid day of the month,
/// so the window is end-of-month inclusive without calendar arithmetic.
/// The `All Time` form covers the calendar year, upper bound exclusive.
pub fn resolve_date_window(month_name: &str, year: &str) -> AppResult<DateWindow> {
    let year_num: i32 = year
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid year '{}'", year)))?;

    if month_name.trim() == ALL_TIME {
        return Ok(DateWindow {
            start: format!("{:04}-01-01", year_num),
            end: format!("{:04}-01-01", year_num + 1),
            end_inclusive: false,
        });
    }

    let month = month_name
        .trim()
        .parse::<Month>()
        .map_err(|_| AppError::Validation(format!("Unknown month '{}'", month_name)))?;
    let prefix = format!("{:04}-{:02}", year_num, month.number_from_month());
    Ok(DateWindow {
        end: format!("{}-31", prefix),
        start: prefix,
        end_inclusive: true,
    })
}

/// Categories whose budget was exceeded in the period, in row order.
pub fn overspent_categories(rows: &[ReconciliationRow]) -> Vec<String> {
    rows.iter()
        .filter(|row| row.savings < Decimal::ZERO)
        .map(|row| row.category.clone())
        .collect()
}
