//! Application router configuration.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, edit_expense_endpoint, get_ledger_page,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_ledger_page))
        .route(endpoints::EXPENSES_API, post(create_expense_endpoint))
        .route(
            endpoints::EXPENSE,
            put(edit_expense_endpoint).delete(delete_expense_endpoint),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use serde_json::{Value, json};

    use crate::{
        AppState, build_router,
        endpoints::{self, format_endpoint},
        expense::{ExpenseResponse, ParticipantNames},
        test_utils::assert_valid_html,
    };

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection, ParticipantNames::default())
            .expect("Could not create app state");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    fn expense_json(date: &str, total_amount: f64, paid_by: &str) -> Value {
        json!({
            "date": date,
            "description": format!("Expense on {date}"),
            "category": "Food",
            "payment_mode": "Cash",
            "total_amount": total_amount,
            "paid_by": paid_by,
            "person1_share": total_amount / 2.0,
            "person2_share": total_amount / 2.0,
        })
    }

    async fn must_post_expense(server: &TestServer, body: &Value) -> i64 {
        let response = server.post(endpoints::EXPENSES_API).json(body).await;
        response.assert_status_ok();

        response
            .json::<ExpenseResponse>()
            .expense
            .expect("want the created expense")
            .id
    }

    #[track_caller]
    fn summary_value(html: &Html, key: &str) -> String {
        let selector = Selector::parse(&format!("dd[data-summary={key}]")).unwrap();

        html.select(&selector)
            .next()
            .and_then(|element| element.value().attr("data-value"))
            .unwrap_or_else(|| panic!("No summary value found for {key}"))
            .to_owned()
    }

    async fn get_ledger(server: &TestServer) -> Html {
        let response = server.get(endpoints::ROOT).await;
        response.assert_status_ok();

        let html = Html::parse_document(&response.text());
        assert_valid_html(&html);
        html
    }

    #[tokio::test]
    async fn created_expenses_appear_on_ledger() {
        let server = get_test_server();
        must_post_expense(&server, &expense_json("2024-01-02", 50.0, "person2")).await;
        must_post_expense(&server, &expense_json("2024-01-01", 100.0, "person1")).await;

        let html = get_ledger(&server).await;

        assert_eq!(summary_value(&html, "total"), "150.00");
        assert_eq!(summary_value(&html, "person1_spent"), "100.00");
        assert_eq!(summary_value(&html, "person2_spent"), "50.00");

        let date_selector = Selector::parse("button.edit-expense").unwrap();
        let dates: Vec<&str> = html
            .select(&date_selector)
            .filter_map(|button| button.value().attr("data-date"))
            .collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02"]);
    }

    #[tokio::test]
    async fn update_then_delete_expense() {
        let server = get_test_server();
        let id = must_post_expense(&server, &expense_json("2024-01-01", 100.0, "person1")).await;
        let url = format_endpoint(endpoints::EXPENSE, id);

        let response = server
            .put(&url)
            .json(&expense_json("2024-01-05", 80.0, "person2"))
            .await;
        response.assert_status_ok();
        let updated = response.json::<ExpenseResponse>().expense.unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.total_amount, 80.0);

        let response = server.delete(&url).await;
        response.assert_status_ok();
        assert_eq!(response.json::<ExpenseResponse>(), ExpenseResponse::deleted());

        let html = get_ledger(&server).await;
        assert_eq!(summary_value(&html, "total"), "0.00");
    }

    #[tokio::test]
    async fn update_missing_expense_returns_not_found() {
        let server = get_test_server();

        let response = server
            .put(&format_endpoint(endpoints::EXPENSE, 1))
            .json(&expense_json("2024-01-01", 1.0, "person1"))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(!response.json::<ExpenseResponse>().success);
    }

    #[tokio::test]
    async fn delete_missing_expense_is_bad_request() {
        let server = get_test_server();

        let response = server.delete(&format_endpoint(endpoints::EXPENSE, 1)).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<ExpenseResponse>(),
            ExpenseResponse::failure("the expense could not be found".to_owned())
        );
    }

    #[tokio::test]
    async fn non_integer_expense_id_gets_json_error() {
        let server = get_test_server();

        let delete_response = server.delete("/api/expenses/abc").await;
        let put_response = server
            .put("/api/expenses/abc")
            .json(&expense_json("2024-01-01", 1.0, "person1"))
            .await;

        for response in [delete_response, put_response] {
            response.assert_status(StatusCode::BAD_REQUEST);
            let body = response.json::<ExpenseResponse>();
            assert!(!body.success);
            assert!(
                body.error.as_deref().is_some_and(|error| error.contains("abc")),
                "want error naming the bad id, got {body:?}"
            );
        }
    }

    #[tokio::test]
    async fn invalid_expense_is_bad_request() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES_API)
            .json(&expense_json("2024-01-01", -5.0, "person1"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<ExpenseResponse>();
        assert!(!body.success);
        assert!(body.expense.is_none());
    }

    #[tokio::test]
    async fn unknown_route_returns_404_page() {
        let server = get_test_server();

        let response = server.get("/does/not/exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let html = Html::parse_document(&response.text());
        assert_valid_html(&html);
    }

    #[tokio::test]
    async fn error_page_returns_500() {
        let server = get_test_server();

        let response = server.get(endpoints::INTERNAL_ERROR_VIEW).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
