use crate::error::{AppError, AppResult};
use crate::models::expense::Expense;
use crate::models::window::DateWindow;
use chrono::NaiveDate;
use rusqlite::{Connection, Row};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Closed set of sort keys for the expense catalog. Replaces the free-form
/// column name the UI used to splice into the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Category,
    Amount,
    Date,
    DateAdded,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<SortKey> {
        match value.trim().to_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "category" => Some(SortKey::Category),
            "amount" => Some(SortKey::Amount),
            "date" => Some(SortKey::Date),
            "date-added" => Some(SortKey::DateAdded),
            _ => None,
        }
    }

    // Amounts are stored as text, so numeric ordering needs the cast.
    fn order_clause(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Category => "category",
            SortKey::Amount => "CAST(amount AS REAL)",
            SortKey::Date => "date",
            SortKey::DateAdded => "rowid",
        }
    }
}

fn row_to_expense(row: &Row) -> rusqlite::Result<Expense> {
    let amount_str: String = row.get(3)?;
    let date_str: String = row.get(5)?;
    Ok(Expense {
        id: row.get(0)?,
        owner: row.get(1)?,
        name: row.get(2)?,
        amount: Decimal::from_str(&amount_str)
            .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
        category: row.get(4)?,
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
    })
}

pub fn insert_expense(
    conn: &Connection,
    owner: &str,
    name: &str,
    amount: &Decimal,
    category: &str,
    date: NaiveDate,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO expenses (owner, name, amount, category, date) VALUES (?1, ?2, ?3, ?4, ?5)",
        [owner, name, &amount.to_string(), category, &date.to_string()],
    )?;
    Ok(())
}

pub fn update_expense(
    conn: &Connection,
    id: i64,
    owner: &str,
    name: &str,
    amount: &Decimal,
    category: &str,
    date: NaiveDate,
) -> AppResult<()> {
    let rows = conn.execute(
        "UPDATE expenses SET owner = ?1, name = ?2, amount = ?3, category = ?4, date = ?5
         WHERE id = ?6",
        rusqlite::params![owner, name, amount.to_string(), category, date.to_string(), id],
    )?;
    if rows == 0 {
        return Err(AppError::NotFound(format!("Expense with id {}", id)));
    }
    Ok(())
}

pub fn delete_expense(conn: &Connection, id: i64) -> AppResult<()> {
    let rows = conn.execute("DELETE FROM expenses WHERE id = ?1", [id])?;
    if rows == 0 {
        return Err(AppError::NotFound(format!("Expense with id {}", id)));
    }
    Ok(())
}

pub fn list_expenses(conn: &Connection, owner: &str) -> AppResult<Vec<Expense>> {
    list_sorted(conn, owner, SortKey::DateAdded)
}

pub fn list_sorted(conn: &Connection, owner: &str, key: SortKey) -> AppResult<Vec<Expense>> {
    let sql = format!(
        "SELECT id, owner, name, amount, category, date FROM expenses
         WHERE owner = ?1 ORDER BY {}",
        key.order_clause()
    );
    let mut stmt = conn.prepare(&sql)?;
    let iter = stmt.query_map([owner], |row| row_to_expense(row))?;

    let mut expenses = Vec::new();
    for expense in iter {
        expenses.push(expense?);
    }
    Ok(expenses)
}

/// Expenses inside the window, ordered by date. The bounds are compared as
/// text against the stored `YYYY-MM-DD` column, which is what makes the
/// month windows' literal `-31` upper bound work.
pub fn list_in_window(
    conn: &Connection,
    owner: &str,
    window: &DateWindow,
) -> AppResult<Vec<Expense>> {
    let sql = if window.end_inclusive {
        "SELECT id, owner, name, amount, category, date FROM expenses
         WHERE owner = ?1 AND date >= ?2 AND date <= ?3 ORDER BY date"
    } else {
        "SELECT id, owner, name, amount, category, date FROM expenses
         WHERE owner = ?1 AND date >= ?2 AND date < ?3 ORDER BY date"
    };
    let mut stmt = conn.prepare(sql)?;
    let iter = stmt.query_map(
        [owner, window.start.as_str(), window.end.as_str()],
        |row| row_to_expense(row),
    )?;

    let mut expenses = Vec::new();
    for expense in iter {
        expenses.push(expense?);
    }
    Ok(expenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn seed(conn: &Connection) {
        insert_expense(conn, "ana", "Groceries", &dec("45.20"), "Food", date("2024-02-10")).unwrap();
        insert_expense(conn, "ana", "Bus pass", &dec("30"), "Travel", date("2024-02-01")).unwrap();
        insert_expense(conn, "ana", "Cinema", &dec("12.50"), "Fun", date("2024-03-05")).unwrap();
    }

    #[test]
    fn test_insert_and_list_round_trip() {
        let conn = establish_test_connection().unwrap();
        insert_expense(&conn, "ana", "Groceries", &dec("45.20"), "Food", date("2024-02-10"))
            .unwrap();

        let expenses = list_expenses(&conn, "ana").unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].name, "Groceries");
        assert_eq!(expenses[0].amount, dec("45.20"));
        assert_eq!(expenses[0].category, "Food");
        assert_eq!(expenses[0].date, date("2024-02-10"));
    }

    #[test]
    fn test_list_scoped_to_owner() {
        let conn = establish_test_connection().unwrap();
        seed(&conn);
        insert_expense(&conn, "bob", "Lunch", &dec("9"), "Food", date("2024-02-10")).unwrap();

        assert_eq!(list_expenses(&conn, "ana").unwrap().len(), 3);
        assert_eq!(list_expenses(&conn, "bob").unwrap().len(), 1);
    }

    #[test]
    fn test_list_sorted_by_amount_is_numeric() {
        let conn = establish_test_connection().unwrap();
        seed(&conn);

        let expenses = list_sorted(&conn, "ana", SortKey::Amount).unwrap();
        let amounts: Vec<Decimal> = expenses.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![dec("12.50"), dec("30"), dec("45.20")]);
    }

    #[test]
    fn test_list_sorted_by_date_added_keeps_insertion_order() {
        let conn = establish_test_connection().unwrap();
        seed(&conn);

        let expenses = list_sorted(&conn, "ana", SortKey::DateAdded).unwrap();
        let names: Vec<&str> = expenses.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Groceries", "Bus pass", "Cinema"]);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::parse(" Date-Added "), Some(SortKey::DateAdded));
        assert_eq!(SortKey::parse("amount"), Some(SortKey::Amount));
        assert_eq!(SortKey::parse("rowid"), None);
    }

    #[test]
    fn test_update_expense_success() {
        let conn = establish_test_connection().unwrap();
        seed(&conn);
        let id = list_expenses(&conn, "ana").unwrap()[0].id;

        update_expense(&conn, id, "ana", "Market", &dec("50"), "Food", date("2024-02-11")).unwrap();

        let expenses = list_expenses(&conn, "ana").unwrap();
        let updated = expenses.iter().find(|e| e.id == id).unwrap();
        assert_eq!(updated.name, "Market");
        assert_eq!(updated.amount, dec("50"));
        assert_eq!(updated.date, date("2024-02-11"));
    }

    #[test]
    fn test_delete_expense_not_found() {
        let conn = establish_test_connection().unwrap();
        let result = delete_expense(&conn, 7);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_window_month_bounds_are_inclusive_text() {
        let conn = establish_test_connection().unwrap();
        seed(&conn);
        // day 29 of February still sorts below the literal "-31" bound
        insert_expense(&conn, "ana", "Leap day", &dec("5"), "Fun", date("2024-02-29")).unwrap();

        let window = DateWindow {
            start: "2024-02".to_string(),
            end: "2024-02-31".to_string(),
            end_inclusive: true,
        };
        let expenses = list_in_window(&conn, "ana", &window).unwrap();
        let names: Vec<&str> = expenses.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bus pass", "Groceries", "Leap day"]);
    }

    #[test]
    fn test_window_year_excludes_upper_bound() {
        let conn = establish_test_connection().unwrap();
        insert_expense(&conn, "ana", "NYE", &dec("80"), "Fun", date("2024-12-31")).unwrap();
        insert_expense(&conn, "ana", "New year", &dec("10"), "Fun", date("2025-01-01")).unwrap();

        let window = DateWindow {
            start: "2024-01-01".to_string(),
            end: "2025-01-01".to_string(),
            end_inclusive: false,
        };
        let expenses = list_in_window(&conn, "ana", &window).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].name, "NYE");
    }

    #[test]
    fn test_window_orders_by_date() {
        let conn = establish_test_connection().unwrap();
        seed(&conn);

        let window = DateWindow {
            start: "2024-01-01".to_string(),
            end: "2025-01-01".to_string(),
            end_inclusive: false,
        };
        let expenses = list_in_window(&conn, "ana", &window).unwrap();
        let names: Vec<&str> = expenses.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bus pass", "Groceries", "Cinema"]);
    }
}
