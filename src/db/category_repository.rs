use crate::error::{AppError, AppResult};
use rusqlite::Connection;

pub fn insert_category(conn: &Connection, owner: &str, name: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO categories (owner, name) VALUES (?1, ?2)",
        [owner, name],
    )?;
    Ok(())
}

pub fn delete_category(conn: &Connection, owner: &str, name: &str) -> AppResult<()> {
    let rows = conn.execute(
        "DELETE FROM categories WHERE owner = ?1 AND name = ?2",
        [owner, name],
    )?;
    if rows == 0 {
        return Err(AppError::NotFound(format!("Category '{}'", name)));
    }
    Ok(())
}

/// Category names in insertion order. Duplicate names are returned as
/// stored; aggregation treats them as one category.
pub fn list_categories(conn: &Connection, owner: &str) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM categories WHERE owner = ?1 ORDER BY rowid")?;
    let iter = stmt.query_map([owner], |row| row.get(0))?;

    let mut names = Vec::new();
    for name in iter {
        names.push(name?);
    }
    Ok(names)
}
