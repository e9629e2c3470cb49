//! Expense creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{FromRef, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::{ExpenseResponse, create_expense, response::parse_expense_input},
};

/// The state needed for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Validate a JSON expense and save it.
///
/// Responds with `{"success": true, "expense": ...}` on success and a JSON
/// error body otherwise.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let new_expense = match parse_expense_input(&headers, &body).and_then(|input| input.validate())
    {
        Ok(new_expense) => new_expense,
        Err(error) => {
            tracing::debug!("Rejected new expense: {error}");
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

    match create_expense(new_expense, &connection) {
        Ok(expense) => {
            tracing::info!("Created expense {}", expense.id);
            ExpenseResponse::success(expense).into_response()
        }
        Err(error) => error.into_json_response(),
    }
}
