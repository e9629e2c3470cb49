//! Database operations for expenses.

use rusqlite::{Connection, params};

use crate::{
    Error,
    expense::{
        Expense, ExpenseId, ExpenseSummary, NewExpense,
        core::{EXPENSE_COLUMNS, map_expense_row},
    },
};

/// Save a validated expense and return it with its generated ID.
///
/// The reserved `balance` and `running_total` columns are stored as zero.
pub fn create_expense(expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    connection.execute(
        "INSERT INTO expense (date, description, category, payment_mode, total_amount, \
            paid_by, person1_share, person2_share, balance, running_total) \
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, 0)",
        params![
            expense.date,
            expense.description,
            expense.category,
            expense.payment_mode,
            expense.total_amount,
            expense.paid_by.as_str(),
            expense.person1_share,
            expense.person2_share,
        ],
    )?;

    let id = connection.last_insert_rowid();

    Ok(expense.with_id(id))
}

/// Retrieve a single expense by ID.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no expense with `id`.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(&format!("SELECT {EXPENSE_COLUMNS} FROM expense WHERE id = :id;"))?
        .query_row(&[(":id", &id)], map_expense_row)
        .map_err(|error| error.into())
}

/// Retrieve all expenses ordered by date, oldest first.
///
/// Expenses on the same date are kept in the order they were created.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense ORDER BY date ASC, id ASC;"
        ))?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Overwrite every field of the expense `id` with `expense`.
///
/// # Errors
///
/// Returns [Error::UpdateMissingExpense] if there is no expense with `id`,
/// in which case nothing is changed.
pub fn update_expense(
    id: ExpenseId,
    expense: NewExpense,
    connection: &Connection,
) -> Result<Expense, Error> {
    let rows_affected = connection.execute(
        "UPDATE expense \
        SET \
            date = ?1, \
            description = ?2, \
            category = ?3, \
            payment_mode = ?4, \
            total_amount = ?5, \
            paid_by = ?6, \
            person1_share = ?7, \
            person2_share = ?8, \
            balance = 0, \
            running_total = 0 \
        WHERE id = ?9",
        params![
            expense.date,
            expense.description,
            expense.category,
            expense.payment_mode,
            expense.total_amount,
            expense.paid_by.as_str(),
            expense.person1_share,
            expense.person2_share,
            id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingExpense);
    }

    Ok(expense.with_id(id))
}

/// Delete an expense by ID.
///
/// # Errors
///
/// Returns [Error::DeleteMissingExpense] if there is no expense with `id`.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expense WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpense);
    }

    Ok(())
}

/// Retrieve all expenses, ordered as in [get_all_expenses], together with
/// their totals.
pub fn list_with_summary(connection: &Connection) -> Result<(Vec<Expense>, ExpenseSummary), Error> {
    let expenses = get_all_expenses(connection)?;
    let summary = ExpenseSummary::from_expenses(&expenses);

    Ok((expenses, summary))
}
