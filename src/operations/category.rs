use crate::db::category_repository;
use crate::error::{AppError, AppResult};
use rusqlite::Connection;

/// Category names come straight from user entry; they must be non-empty,
/// short enough for the catalog views, and comma-free so the CSV export
/// stays unambiguous.
pub fn validate_category_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Category cannot be empty".to_string()));
    }
    if name.len() > 50 {
        return Err(AppError::Validation("Category too long".to_string()));
    }
    if name.contains(',') {
        return Err(AppError::Validation(
            "Category cannot contain commas".to_string(),
        ));
    }
    Ok(name)
}

pub fn add_category_db(conn: &Connection, owner: &str, name: &str) -> AppResult<()> {
    let name = validate_category_name(name)?;
    category_repository::insert_category(conn, owner, name)
}

pub fn remove_category_db(conn: &Connection, owner: &str, name: &str) -> AppResult<()> {
    let name = validate_category_name(name)?;
    category_repository::delete_category(conn, owner, name)
}

pub fn list_categories_db(conn: &Connection, owner: &str) -> AppResult<Vec<String>> {
    category_repository::list_categories(conn, owner)
}
