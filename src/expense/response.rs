//! The JSON body exchanged by the expense API.

use axum::{
    Json,
    extract::{Path, rejection::PathRejection},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    Error,
    expense::{Expense, ExpenseId, ExpenseInput},
};

/// The body of every expense API response.
///
/// Absent fields are left out of the JSON rather than sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseResponse {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The created or updated expense.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense: Option<Expense>,
    /// A message describing why the operation failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExpenseResponse {
    /// A successful create or update.
    pub fn success(expense: Expense) -> Self {
        Self {
            success: true,
            expense: Some(expense),
            error: None,
        }
    }

    /// A successful delete.
    pub fn deleted() -> Self {
        Self {
            success: true,
            expense: None,
            error: None,
        }
    }

    /// A failed operation.
    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            expense: None,
            error: Some(message),
        }
    }
}

impl IntoResponse for ExpenseResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Read an [ExpenseInput] from a raw request.
///
/// The body is parsed by hand instead of with [axum::Json] so that every
/// rejection gets the same `{"success": false, "error": ...}` body as the
/// validation errors.
///
/// # Errors
///
/// Returns [Error::InvalidRequestBody] if the content type is not JSON, the
/// body is empty, or the body is not a JSON object.
pub(crate) fn parse_expense_input(headers: &HeaderMap, body: &[u8]) -> Result<ExpenseInput, Error> {
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|content_type| content_type.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("application/json"));

    if !is_json {
        return Err(Error::InvalidRequestBody(
            "Content-Type must be application/json".to_owned(),
        ));
    }

    if body.trim_ascii().is_empty() {
        return Err(Error::InvalidRequestBody("No data provided".to_owned()));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|error| Error::InvalidRequestBody(format!("Invalid JSON: {error}")))?;

    if !value.is_object() {
        return Err(Error::InvalidRequestBody(
            "Request body must be a JSON object".to_owned(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|error| Error::InvalidRequestBody(format!("Invalid JSON: {error}")))
}

/// Read the expense ID from the request path, turning a malformed ID into an
/// [Error::InvalidRequestBody] so it gets a JSON error body.
pub(crate) fn parse_expense_id(
    path: Result<Path<ExpenseId>, PathRejection>,
) -> Result<ExpenseId, Error> {
    path.map(|Path(expense_id)| expense_id)
        .map_err(|rejection| Error::InvalidRequestBody(rejection.body_text()))
}

#[cfg(test)]
mod expense_response_tests {
    use serde_json::json;
    use time::macros::date;

    use crate::expense::{Expense, ExpenseResponse, Participant};

    #[test]
    fn failure_omits_expense() {
        let got = serde_json::to_value(ExpenseResponse::failure("nope".to_owned())).unwrap();

        assert_eq!(got, json!({"success": false, "error": "nope"}));
    }

    #[test]
    fn deleted_only_has_success() {
        let got = serde_json::to_value(ExpenseResponse::deleted()).unwrap();

        assert_eq!(got, json!({"success": true}));
    }

    #[test]
    fn success_includes_expense() {
        let expense = Expense {
            id: 1,
            date: date!(2024 - 01 - 01),
            description: "Rent".to_owned(),
            category: String::new(),
            payment_mode: String::new(),
            total_amount: 100.0,
            paid_by: Participant::Person1,
            person1_share: 50.0,
            person2_share: 50.0,
            balance: 0.0,
            running_total: 0.0,
        };

        let got = serde_json::to_value(ExpenseResponse::success(expense)).unwrap();

        assert_eq!(got["success"], json!(true));
        assert_eq!(got["expense"]["id"], json!(1));
        assert_eq!(got["expense"]["paid_by"], json!("person1"));
        assert!(got.get("error").is_none());
    }
}
