mod db;
mod error;
mod models;
mod operations;

use clap::Parser;
use error::AppResult;
use operations::budget::{list_budgets_db, remove_budget_db, set_budget_db, update_budget_db};
use operations::category::{add_category_db, list_categories_db, remove_category_db};
use operations::expense::{
    add_expense_db, list_expenses_db, remove_expense_db, sort_expenses_db, update_expense_db,
};
use operations::export::{export_budgets_csv, export_expenses_csv};
use operations::stats;
use std::io;
use std::path::Path;

/// Single-user expense tracker: categories, per-category monthly budgets,
/// and savings statistics over a local SQLite file.
#[derive(Parser)]
#[command(name = "xpt", version)]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, default_value = "expenses.db")]
    db: String,

    /// Owner whose records are managed in this session
    #[arg(long)]
    user: String,
}

pub enum UserCommands {
    Add,
    Update,
    Remove,
    List,
    Sort,
    Categories,
    AddCategory,
    RemoveCategory,
    Budgets,
    SetBudget,
    UpdateBudget,
    RemoveBudget,
    Savings,
    Top,
    Bottom,
    Series,
    Distribution,
    Alerts,
    Export,
    Help,
    Exit,
    Unknown,
}

const HELP: &str = "Commands:
  add | update | remove | list | sort       expense catalog
  categories | addcat | delcat              category list
  budgets | setbudget | updbudget | delbudget
  savings | top | bottom | series | distribution | alerts
  export                                    write a catalog to a CSV file
  help | exit";

fn main() {
    let cli = Cli::parse();
    let conn = match db::connection::establish_connection(&cli.db) {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Failed to open database '{}': {}", cli.db, e);
            std::process::exit(1);
        }
    };
    let user = cli.user;

    println!("Welcome back {}!", user);
    println!("{}", HELP);

    loop {
        println!("Please enter a command (help for the list):");
        let input = match read_user_input() {
            Ok(cmd) => cmd,
            Err(e) => {
                println!("Error reading input: {}", e);
                continue;
            }
        };
        let Some(word) = input.split_whitespace().next() else {
            continue;
        };

        let result = match check_for_command(word) {
            UserCommands::Add => add_expense(&conn, &user),
            UserCommands::Update => update_expense(&conn, &user),
            UserCommands::Remove => remove_expense(&conn),
            UserCommands::List => list_expenses(&conn, &user),
            UserCommands::Sort => sort_expenses(&conn, &user),
            UserCommands::Categories => list_categories(&conn, &user),
            UserCommands::AddCategory => add_category(&conn, &user),
            UserCommands::RemoveCategory => remove_category(&conn, &user),
            UserCommands::Budgets => list_budgets(&conn, &user),
            UserCommands::SetBudget => set_budget(&conn, &user),
            UserCommands::UpdateBudget => update_budget(&conn, &user),
            UserCommands::RemoveBudget => remove_budget(&conn),
            UserCommands::Savings => show_savings(&conn, &user),
            UserCommands::Top => show_ranking(&conn, &user, false),
            UserCommands::Bottom => show_ranking(&conn, &user, true),
            UserCommands::Series => show_series(&conn, &user),
            UserCommands::Distribution => show_distribution(&conn, &user),
            UserCommands::Alerts => show_alerts(&conn, &user),
            UserCommands::Export => export(&conn, &user),
            UserCommands::Help => {
                println!("{}", HELP);
                Ok(())
            }
            UserCommands::Exit => {
                println!("Exiting the application.");
                break;
            }
            UserCommands::Unknown => {
                println!("Unknown command '{}'. Type help for the list.", word);
                Ok(())
            }
        };

        if let Err(e) = result {
            println!("Error: {}", e);
        }
    }
}

fn check_for_command(input: &str) -> UserCommands {
    match input {
        "add" => UserCommands::Add,
        "update" => UserCommands::Update,
        "remove" => UserCommands::Remove,
        "list" => UserCommands::List,
        "sort" => UserCommands::Sort,
        "categories" => UserCommands::Categories,
        "addcat" => UserCommands::AddCategory,
        "delcat" => UserCommands::RemoveCategory,
        "budgets" => UserCommands::Budgets,
        "setbudget" => UserCommands::SetBudget,
        "updbudget" => UserCommands::UpdateBudget,
        "delbudget" => UserCommands::RemoveBudget,
        "savings" => UserCommands::Savings,
        "top" => UserCommands::Top,
        "bottom" => UserCommands::Bottom,
        "series" => UserCommands::Series,
        "distribution" => UserCommands::Distribution,
        "alerts" => UserCommands::Alerts,
        "export" => UserCommands::Export,
        "help" => UserCommands::Help,
        "exit" => UserCommands::Exit,
        _ => UserCommands::Unknown,
    }
}

fn read_user_input() -> Result<String, String> {
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|_| "Failed to read line".to_string())?;
    Ok(input.trim().to_string())
}

fn prompt(message: &str) -> AppResult<String> {
    println!("{}", message);
    read_user_input().map_err(error::AppError::Validation)
}

/// Reads a period selection like "February 2024" or "All Time 2024".
fn prompt_period() -> AppResult<(String, String)> {
    let input = prompt("Enter period as '<month> <year>' (month may be 'All Time'):")?;
    let Some((month, year)) = input.rsplit_once(' ') else {
        return Err(error::AppError::Validation(format!(
            "Invalid period '{}'",
            input
        )));
    };
    Ok((month.to_string(), year.to_string()))
}

fn add_expense(conn: &rusqlite::Connection, user: &str) -> AppResult<()> {
    let input = prompt("Enter expense as: name, amount, category, date(YYYY-MM-DD)")?;
    add_expense_db(conn, user, &input)?;
    println!("Expense added successfully!");
    Ok(())
}

fn update_expense(conn: &rusqlite::Connection, user: &str) -> AppResult<()> {
    let id = prompt("Enter the expense ID to update:")?;
    let input = prompt("Enter new details as: name, amount, category, date(YYYY-MM-DD)")?;
    update_expense_db(conn, user, &id, &input)?;
    println!("Expense updated successfully!");
    Ok(())
}

fn remove_expense(conn: &rusqlite::Connection) -> AppResult<()> {
    let id = prompt("Enter the expense ID to remove:")?;
    remove_expense_db(conn, &id)?;
    println!("Expense removed successfully.");
    Ok(())
}

fn list_expenses(conn: &rusqlite::Connection, user: &str) -> AppResult<()> {
    print_expenses(&list_expenses_db(conn, user)?);
    Ok(())
}

fn sort_expenses(conn: &rusqlite::Connection, user: &str) -> AppResult<()> {
    let key = prompt("Sort by (name, category, amount, date, date-added):")?;
    print_expenses(&sort_expenses_db(conn, user, &key)?);
    Ok(())
}

fn print_expenses(expenses: &[models::expense::Expense]) {
    if expenses.is_empty() {
        println!("No expenses recorded.");
        return;
    }
    println!(
        "{:<20} {:>10}  {:<15} {:<10} {:>5}",
        "Name", "Amount", "Category", "Date", "ID"
    );
    for e in expenses {
        println!(
            "{:<20} {:>10.2}  {:<15} {:<10} {:>5}",
            e.name, e.amount, e.category, e.date, e.id
        );
    }
}

fn list_categories(conn: &rusqlite::Connection, user: &str) -> AppResult<()> {
    let names = list_categories_db(conn, user)?;
    if names.is_empty() {
        println!("No categories yet.");
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

fn add_category(conn: &rusqlite::Connection, user: &str) -> AppResult<()> {
    let name = prompt("Enter the category name:")?;
    add_category_db(conn, user, &name)?;
    println!("Category added successfully!");
    Ok(())
}

fn remove_category(conn: &rusqlite::Connection, user: &str) -> AppResult<()> {
    let name = prompt("Enter the category name to remove:")?;
    remove_category_db(conn, user, &name)?;
    println!("Category removed successfully.");
    Ok(())
}

fn list_budgets(conn: &rusqlite::Connection, user: &str) -> AppResult<()> {
    let budgets = list_budgets_db(conn, user)?;
    if budgets.is_empty() {
        println!("No budgets set.");
        return Ok(());
    }
    println!("{:<15} {:>10} {:>5}", "Category", "Amount", "ID");
    for b in &budgets {
        println!("{:<15} {:>10.2} {:>5}", b.category, b.amount, b.id);
    }
    Ok(())
}

fn set_budget(conn: &rusqlite::Connection, user: &str) -> AppResult<()> {
    let category = prompt("Enter the category:")?;
    let amount = prompt("Enter the monthly budget amount:")?;
    set_budget_db(conn, user, &category, &amount)?;
    println!("Budget set successfully!");
    Ok(())
}

fn update_budget(conn: &rusqlite::Connection, user: &str) -> AppResult<()> {
    let id = prompt("Enter the budget ID to update:")?;
    let category = prompt("Enter the category:")?;
    let amount = prompt("Enter the new amount:")?;
    update_budget_db(conn, user, &id, &category, &amount)?;
    println!("Budget updated successfully!");
    Ok(())
}

fn remove_budget(conn: &rusqlite::Connection) -> AppResult<()> {
    let id = prompt("Enter the budget ID to remove:")?;
    remove_budget_db(conn, &id)?;
    println!("Budget removed successfully.");
    Ok(())
}

fn show_savings(conn: &rusqlite::Connection, user: &str) -> AppResult<()> {
    let (month, year) = prompt_period()?;
    let rows = stats::savings_table(conn, user, &month, &year)?;
    if rows.is_empty() {
        println!("No budgeted categories for this period.");
        return Ok(());
    }
    println!(
        "{:<15} {:>10} {:>10} {:>10}",
        "Category", "Budget", "Spent", "Savings"
    );
    for row in &rows {
        println!(
            "{:<15} {:>10.2} {:>10.2} {:>10.2}",
            row.category, row.budget, row.spent, row.savings
        );
    }
    Ok(())
}

fn show_ranking(conn: &rusqlite::Connection, user: &str, ascending: bool) -> AppResult<()> {
    let (month, year) = prompt_period()?;
    let ranked = if ascending {
        stats::bottom_savings(conn, user, &month, &year)?
    } else {
        stats::top_savings(conn, user, &month, &year)?
    };
    for (category, savings) in &ranked {
        println!("{:<15} {:>10.2}", category, savings);
    }
    Ok(())
}

fn show_series(conn: &rusqlite::Connection, user: &str) -> AppResult<()> {
    let (month, year) = prompt_period()?;
    for point in stats::cumulative_spend(conn, user, &month, &year)? {
        println!("day {:>2}: {:>10.2}", point.day, point.cumulative);
    }
    Ok(())
}

fn show_distribution(conn: &rusqlite::Connection, user: &str) -> AppResult<()> {
    let (month, year) = prompt_period()?;
    for (category, total) in stats::expense_distribution(conn, user, &month, &year)? {
        println!("{:<15} {:>10.2}", category, total);
    }
    Ok(())
}

fn show_alerts(conn: &rusqlite::Connection, user: &str) -> AppResult<()> {
    let (month, year) = prompt_period()?;
    let exceeded = stats::budget_alerts(conn, user, &month, &year)?;
    if exceeded.is_empty() {
        println!("You haven't exceeded any of your monthly budgets...yet");
    } else {
        println!(
            "You have exceeded your monthly budget in: {}",
            exceeded.join(", ")
        );
    }
    Ok(())
}

fn export(conn: &rusqlite::Connection, user: &str) -> AppResult<()> {
    let which = prompt("Export which catalog (expenses or budgets)?")?;
    let path = prompt("Enter the output file path:")?;
    let count = match which.trim() {
        "expenses" => export_expenses_csv(conn, user, Path::new(&path))?,
        "budgets" => export_budgets_csv(conn, user, Path::new(&path))?,
        other => {
            return Err(error::AppError::Validation(format!(
                "Unknown catalog '{}'",
                other
            )));
        }
    };
    println!("Successfully exported {} records to {}", count, path);
    Ok(())
}
