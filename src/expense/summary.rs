//! Aggregate totals over all expenses.

use crate::expense::{Expense, Participant};

/// Totals derived from every stored expense.
///
/// The totals are recomputed from the full list of expenses each time they
/// are needed, nothing is cached between requests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExpenseSummary {
    /// The sum of `total_amount` over all expenses.
    pub total_amount_sum: f64,
    /// The sum of `person1_share` over all expenses.
    pub person1_share_sum: f64,
    /// The sum of `person2_share` over all expenses.
    pub person2_share_sum: f64,
    /// The sum of `total_amount` over expenses paid by [Participant::Person1].
    pub person1_spent: f64,
    /// The sum of `total_amount` over expenses paid by [Participant::Person2].
    pub person2_spent: f64,
}

impl ExpenseSummary {
    /// Sum up `expenses` in a single pass.
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        expenses
            .iter()
            .fold(Self::default(), |mut summary, expense| {
                summary.total_amount_sum += expense.total_amount;
                summary.person1_share_sum += expense.person1_share;
                summary.person2_share_sum += expense.person2_share;

                match expense.paid_by {
                    Participant::Person1 => summary.person1_spent += expense.total_amount,
                    Participant::Person2 => summary.person2_spent += expense.total_amount,
                }

                summary
            })
    }

    /// The total amount `participant` has paid.
    pub fn spent_by(&self, participant: Participant) -> f64 {
        match participant {
            Participant::Person1 => self.person1_spent,
            Participant::Person2 => self.person2_spent,
        }
    }

    /// The total of `participant`'s shares.
    pub fn share_of(&self, participant: Participant) -> f64 {
        match participant {
            Participant::Person1 => self.person1_share_sum,
            Participant::Person2 => self.person2_share_sum,
        }
    }

    /// How much more `participant` has paid than their share.
    ///
    /// A positive balance means the other participant owes them money.
    pub fn net_balance(&self, participant: Participant) -> f64 {
        self.spent_by(participant) - self.share_of(participant)
    }
}
