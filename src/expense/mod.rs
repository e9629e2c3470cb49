//! Expenses shared between two participants: storage, validation, totals,
//! the JSON API and the ledger page.

mod core;
mod create_endpoint;
mod db;
mod delete_endpoint;
mod edit_endpoint;
mod form;
mod input;
mod ledger_page;
mod participant;
mod response;
mod summary;

pub use core::{Expense, ExpenseId, NewExpense, create_expense_table};
pub use create_endpoint::create_expense_endpoint;
pub use db::{
    create_expense, delete_expense, get_all_expenses, get_expense, list_with_summary,
    update_expense,
};
pub use delete_endpoint::delete_expense_endpoint;
pub use edit_endpoint::edit_expense_endpoint;
pub use input::ExpenseInput;
pub use ledger_page::get_ledger_page;
pub use participant::{Participant, ParticipantNames};
pub use response::ExpenseResponse;
pub use summary::ExpenseSummary;
