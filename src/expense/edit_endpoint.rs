//! Expense update endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{FromRef, Path, State, rejection::PathRejection},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::{
        ExpenseId, ExpenseResponse,
        response::{parse_expense_id, parse_expense_input},
        update_expense,
    },
};

/// The state needed for updating an expense.
#[derive(Debug, Clone)]
pub struct EditExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Replace every field of an existing expense.
///
/// The payload is validated before the database is touched, so a rejected
/// update never changes the stored expense.
pub async fn edit_expense_endpoint(
    State(state): State<EditExpenseState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let expense_id = match parse_expense_id(expense_id) {
        Ok(expense_id) => expense_id,
        Err(error) => {
            tracing::debug!("Rejected expense update: {error}");
            return error.into_json_response();
        }
    };

    let new_expense = match parse_expense_input(&headers, &body).and_then(|input| input.validate())
    {
        Ok(new_expense) => new_expense,
        Err(error) => {
            tracing::debug!("Rejected update for expense {expense_id}: {error}");
            return error.into_json_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match update_expense(expense_id, new_expense, &connection) {
        Ok(expense) => {
            tracing::info!("Updated expense {expense_id}");
            ExpenseResponse::success(expense).into_response()
        }
        Err(Error::UpdateMissingExpense) => {
            tracing::debug!("Tried to update missing expense {expense_id}");
            Error::UpdateMissingExpense.into_json_response()
        }
        Err(error) => error.into_json_response(),
    }
}
