//! Defines the core data models and table schema for expenses.

use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{database_id::DatabaseId, expense::Participant};

// Dates are exchanged as `YYYY-MM-DD` strings.
time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Database identifier for an expense.
pub type ExpenseId = DatabaseId;

/// An expense shared between the two participants.
///
/// `paid_by` records who fronted the money, while the two share fields record
/// how the cost is split for settlement. The shares are not required to add
/// up to `total_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense, assigned by the database.
    pub id: ExpenseId,
    /// When the expense happened.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// What the money was spent on.
    pub description: String,
    /// A free-form category, empty if not given.
    pub category: String,
    /// How the expense was paid (cash, card, ...), empty if not given.
    pub payment_mode: String,
    /// The full cost of the expense.
    pub total_amount: f64,
    /// The participant who paid.
    pub paid_by: Participant,
    /// The portion of the cost attributed to [Participant::Person1].
    pub person1_share: f64,
    /// The portion of the cost attributed to [Participant::Person2].
    pub person2_share: f64,
    /// Reserved, always zero.
    pub balance: f64,
    /// Reserved, always zero.
    pub running_total: f64,
}

impl Expense {
    /// The share of the cost attributed to `participant`.
    pub fn share_of(&self, participant: Participant) -> f64 {
        match participant {
            Participant::Person1 => self.person1_share,
            Participant::Person2 => self.person2_share,
        }
    }

    /// The part of the total that neither share covers.
    ///
    /// Negative when the shares add up to more than the total.
    pub fn unallocated_amount(&self) -> f64 {
        self.total_amount - (self.person1_share + self.person2_share)
    }
}

/// A validated expense that has not been saved yet.
///
/// Build one from a request with [crate::expense::ExpenseInput::validate].
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// When the expense happened.
    pub date: Date,
    /// What the money was spent on, trimmed and non-empty.
    pub description: String,
    /// A free-form category, trimmed.
    pub category: String,
    /// How the expense was paid, trimmed.
    pub payment_mode: String,
    /// The full cost of the expense, greater than zero.
    pub total_amount: f64,
    /// The participant who paid.
    pub paid_by: Participant,
    /// The share for [Participant::Person1], zero or more.
    pub person1_share: f64,
    /// The share for [Participant::Person2], zero or more.
    pub person2_share: f64,
}

impl NewExpense {
    /// Attach the database ID to the expense.
    ///
    /// The reserved `balance` and `running_total` fields are always zero.
    pub fn with_id(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            date: self.date,
            description: self.description,
            category: self.category,
            payment_mode: self.payment_mode,
            total_amount: self.total_amount,
            paid_by: self.paid_by,
            person1_share: self.person1_share,
            person2_share: self.person2_share,
            balance: 0.0,
            running_total: 0.0,
        }
    }
}

/// The columns of the expense table, in the order [map_expense_row] reads them.
pub const EXPENSE_COLUMNS: &str = "id, date, description, category, payment_mode, total_amount, \
    paid_by, person1_share, person2_share, balance, running_total";

/// Initialize the expense table and indexes.
///
/// `AUTOINCREMENT` stops SQLite from handing out the ID of a deleted expense again.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT '',
            payment_mode TEXT NOT NULL DEFAULT '',
            total_amount REAL NOT NULL,
            paid_by TEXT NOT NULL CHECK (paid_by IN ('person1', 'person2')),
            person1_share REAL NOT NULL,
            person2_share REAL NOT NULL,
            balance REAL NOT NULL DEFAULT 0,
            running_total REAL NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_expense_date ON expense(date);",
    )?;

    Ok(())
}

/// Map a row selected with [EXPENSE_COLUMNS] to an [Expense].
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let raw_paid_by: String = row.get(6)?;
    let paid_by = raw_paid_by
        .parse::<Participant>()
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(error)))?;

    Ok(Expense {
        id: row.get(0)?,
        date: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        payment_mode: row.get(4)?,
        total_amount: row.get(5)?,
        paid_by,
        person1_share: row.get(7)?,
        person2_share: row.get(8)?,
        balance: row.get(9)?,
        running_total: row.get(10)?,
    })
}

#[cfg(test)]
mod create_table_tests {
    use rusqlite::Connection;

    use super::create_expense_table;

    #[test]
    fn sql_is_valid() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        assert_eq!(Ok(()), create_expense_table(&connection));
    }

    #[test]
    fn can_be_run_twice() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");
        create_expense_table(&connection).unwrap();

        assert_eq!(Ok(()), create_expense_table(&connection));
    }

    #[test]
    fn rejects_unknown_participant() {
        let connection = Connection::open_in_memory().unwrap();
        create_expense_table(&connection).unwrap();

        let result = connection.execute(
            "INSERT INTO expense (date, description, total_amount, paid_by, person1_share, person2_share) \
            VALUES ('2024-01-01', 'Lunch', 10.0, 'person3', 5.0, 5.0)",
            (),
        );

        assert!(result.is_err(), "want CHECK constraint failure, got {result:?}");
    }
}

#[cfg(test)]
mod expense_json_tests {
    use serde_json::json;
    use time::macros::date;

    use crate::expense::{Expense, Participant};

    fn lunch() -> Expense {
        Expense {
            id: 7,
            date: date!(2024 - 03 - 09),
            description: "Lunch".to_owned(),
            category: "Food".to_owned(),
            payment_mode: "Card".to_owned(),
            total_amount: 42.5,
            paid_by: Participant::Person2,
            person1_share: 21.25,
            person2_share: 21.25,
            balance: 0.0,
            running_total: 0.0,
        }
    }

    #[test]
    fn serializes_every_field() {
        let got = serde_json::to_value(lunch()).unwrap();

        assert_eq!(
            got,
            json!({
                "id": 7,
                "date": "2024-03-09",
                "description": "Lunch",
                "category": "Food",
                "payment_mode": "Card",
                "total_amount": 42.5,
                "paid_by": "person2",
                "person1_share": 21.25,
                "person2_share": 21.25,
                "balance": 0.0,
                "running_total": 0.0,
            })
        );
    }

    #[test]
    fn unallocated_amount_is_total_minus_shares() {
        let mut expense = lunch();
        expense.person1_share = 30.0;
        expense.person2_share = 10.0;

        assert_eq!(expense.unallocated_amount(), 2.5);
        assert_eq!(expense.share_of(Participant::Person1), 30.0);
    }
}
