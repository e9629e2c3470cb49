//! Expense deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::{ExpenseId, ExpenseResponse, delete_expense, response::parse_expense_id},
};

/// The state needed for deleting an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle expense deletion. Returns `{"success": true}` or a JSON error.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Response {
    let expense_id = match parse_expense_id(expense_id) {
        Ok(expense_id) => expense_id,
        Err(error) => {
            tracing::debug!("Rejected expense deletion: {error}");
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

    match delete_expense(expense_id, &connection) {
        Ok(()) => {
            tracing::info!("Deleted expense {expense_id}");
            ExpenseResponse::deleted().into_response()
        }
        Err(Error::DeleteMissingExpense) => {
            tracing::debug!("Tried to delete missing expense {expense_id}");
            Error::DeleteMissingExpense.into_json_response()
        }
        Err(error) => error.into_json_response(),
    }
}
