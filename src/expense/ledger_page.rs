//! The index page: the expense summary, the expense table and the expense form.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error, endpoints,
    endpoints::format_endpoint,
    expense::{
        Expense, ExpenseSummary, Participant, ParticipantNames, form::expense_form,
        list_with_summary,
    },
    html::{
        BUTTON_DELETE_STYLE, CARD_STYLE, FORM_CONTAINER_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, currency_input_styles,
        format_currency,
    },
};

/// Balances smaller than this are shown as settled.
const SETTLED_THRESHOLD: f64 = 0.005;

/// The state needed for the ledger page.
#[derive(Debug, Clone)]
pub struct LedgerPageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The names to show for each participant.
    pub participant_names: ParticipantNames,
}

impl FromRef<AppState> for LedgerPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            participant_names: state.participant_names.clone(),
        }
    }
}

/// Render every expense together with the running totals and the expense form.
pub async fn get_ledger_page(State(state): State<LedgerPageState>) -> Result<Response, Error> {
    let (expenses, summary) = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        list_with_summary(&connection)
            .inspect_err(|error| tracing::error!("could not list expenses: {error}"))?
    };

    let today = OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date();

    Ok(ledger_view(&expenses, &summary, &state.participant_names, today).into_response())
}

fn ledger_view(
    expenses: &[Expense],
    summary: &ExpenseSummary,
    names: &ParticipantNames,
    today: Date,
) -> Markup {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-3xl font-bold" { "Shared Expenses" }

            (summary_card(summary, names))

            section class=(CARD_STYLE)
            {
                div class=(FORM_CONTAINER_STYLE) { (expense_form(today, names)) }
            }

            (expense_table(expenses, names))
        }
    };

    base("Expenses", &[currency_input_styles()], &content)
}

fn summary_card(summary: &ExpenseSummary, names: &ParticipantNames) -> Markup {
    let summary_item = |key: &str, label: &str, amount: f64| {
        html! {
            div class="flex justify-between gap-4"
            {
                dt class="text-gray-600 dark:text-gray-300" { (label) }
                dd class="font-semibold" data-summary=(key) data-value=(format!("{amount:.2}"))
                {
                    (format_currency(amount))
                }
            }
        }
    };

    html! {
        section id="summary" class=(CARD_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "Summary" }

            dl class="space-y-2"
            {
                (summary_item("total", "Total Expenses", summary.total_amount_sum))

                @for participant in Participant::ALL {
                    @let name = names.name_of(participant);

                    (summary_item(
                        &format!("{participant}_spent"),
                        &format!("{name} Paid"),
                        summary.spent_by(participant),
                    ))
                    (summary_item(
                        &format!("{participant}_share"),
                        &format!("{name}'s Share"),
                        summary.share_of(participant),
                    ))
                    (summary_item(
                        &format!("{participant}_balance"),
                        &format!("{name}'s Net Balance"),
                        summary.net_balance(participant),
                    ))
                }
            }

            p id="settlement" class="mt-4 text-lg font-semibold"
            {
                (settlement_text(summary, names))
            }
        }
    }
}

/// Describe who owes whom, based on the first participant's net balance.
fn settlement_text(summary: &ExpenseSummary, names: &ParticipantNames) -> String {
    let balance = summary.net_balance(Participant::Person1);
    let person1 = names.name_of(Participant::Person1);
    let person2 = names.name_of(Participant::Person2);

    if balance > SETTLED_THRESHOLD {
        format!("{person2} owes {person1} {}", format_currency(balance))
    } else if balance < -SETTLED_THRESHOLD {
        format!("{person1} owes {person2} {}", format_currency(-balance))
    } else {
        "All settled up".to_owned()
    }
}

fn expense_table(expenses: &[Expense], names: &ParticipantNames) -> Markup {
    let person1 = names.name_of(Participant::Person1);
    let person2 = names.name_of(Participant::Person2);

    html! {
        section class={ "overflow-x-auto " (CARD_STYLE) }
        {
            h2 class="text-xl font-bold mb-4" { "Expenses" }

            table id="expense-table" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Payment Mode" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Total" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Paid By" }
                        th scope="col" class=(TABLE_CELL_STYLE) { (person1) "'s Share" }
                        th scope="col" class=(TABLE_CELL_STYLE) { (person2) "'s Share" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for expense in expenses {
                        (expense_row(expense, names))
                    }

                    @if expenses.is_empty() {
                        tr id="empty-expenses" class=(TABLE_ROW_STYLE)
                        {
                            td colspan="9" class={ "text-center " (TABLE_CELL_STYLE) }
                            {
                                "No expenses yet. Add one with the form above."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn expense_row(expense: &Expense, names: &ParticipantNames) -> Markup {
    let delete_url = format_endpoint(endpoints::EXPENSE, expense.id);
    let unallocated = expense.unallocated_amount();

    html! {
        tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
        {
            td class=(TABLE_CELL_STYLE) { (expense.date) }
            td class=(TABLE_CELL_STYLE)
            {
                (expense.description)

                @if unallocated.abs() > SETTLED_THRESHOLD {
                    span
                        class="ml-2 text-xs text-amber-600 dark:text-amber-400"
                        title="The shares do not add up to the total"
                    {
                        "(" (format_currency(unallocated)) " unallocated)"
                    }
                }
            }
            td class=(TABLE_CELL_STYLE) { (expense.category) }
            td class=(TABLE_CELL_STYLE) { (expense.payment_mode) }
            td class=(TABLE_CELL_STYLE) { (format_currency(expense.total_amount)) }
            td class=(TABLE_CELL_STYLE) data-paid-by=(expense.paid_by)
            {
                (names.name_of(expense.paid_by))
            }
            td class=(TABLE_CELL_STYLE) { (format_currency(expense.person1_share)) }
            td class=(TABLE_CELL_STYLE) { (format_currency(expense.person2_share)) }
            td class={ "flex gap-4 " (TABLE_CELL_STYLE) }
            {
                button
                    type="button"
                    class={ "edit-expense " (LINK_STYLE) }
                    data-id=(expense.id)
                    data-date=(expense.date)
                    data-description=(expense.description)
                    data-category=(expense.category)
                    data-payment-mode=(expense.payment_mode)
                    data-total-amount=(format!("{:.2}", expense.total_amount))
                    data-paid-by=(expense.paid_by)
                    data-person1-share=(format!("{:.2}", expense.person1_share))
                    data-person2-share=(format!("{:.2}", expense.person2_share))
                {
                    "Edit"
                }

                button
                    type="button"
                    class={ "delete-expense " (BUTTON_DELETE_STYLE) }
                    data-url=(delete_url)
                {
                    "Delete"
                }
            }
        }
    }
}
