//! Defines the app level error type and conversions to JSON responses and rendered HTML pages.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    expense::ExpenseResponse, internal_server_error::InternalServerError,
    not_found::NotFoundError,
};

/// The message shown to clients for errors whose details should stay in the server logs.
const UNEXPECTED_ERROR_MESSAGE: &str =
    "An unexpected error occurred, check the server logs for more details.";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more required fields were absent or null in an expense request.
    ///
    /// Holds the name of every missing field, not just the first one found.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// A field was present but could not be parsed as its expected type,
    /// e.g. a date that is not `YYYY-MM-DD` or an amount that is not a number.
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// A field was parsed but violates a domain constraint, e.g. a
    /// non-positive total amount or a participant other than `person1` or
    /// `person2`.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// The request body could not be read as a JSON object.
    #[error("{0}")]
    InvalidRequestBody(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update an expense that does not exist
    #[error("the expense could not be found")]
    UpdateMissingExpense,

    /// Tried to delete an expense that does not exist
    #[error("the expense could not be found")]
    DeleteMissingExpense,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound | Error::UpdateMissingExpense | Error::DeleteMissingExpense => {
                NotFoundError.into_response()
            }
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// The HTTP status code that the JSON API responds with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingFields(_)
            | Error::InvalidFormat(_)
            | Error::InvalidValue(_)
            | Error::InvalidRequestBody(_)
            | Error::DeleteMissingExpense => StatusCode::BAD_REQUEST,
            Error::NotFound | Error::UpdateMissingExpense => StatusCode::NOT_FOUND,
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert the error into an HTTP response with the JSON body
    /// `{"success": false, "error": "..."}`.
    ///
    /// Validation and not found errors describe the problem to the client.
    /// Server errors are replaced with a generic message, their details are
    /// logged where they occur.
    pub fn into_json_response(self) -> Response {
        let status_code = self.status_code();

        let message = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            UNEXPECTED_ERROR_MESSAGE.to_owned()
        } else {
            self.to_string()
        };

        (status_code, Json(ExpenseResponse::failure(message))).into_response()
    }
}
