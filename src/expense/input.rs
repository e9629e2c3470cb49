//! The request payload for creating and updating expenses, and its validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    expense::{NewExpense, Participant},
};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// The JSON body of a create or update request.
///
/// Every field is optional and untyped so that validation can report missing
/// fields, badly formatted fields and out of range values separately. A JSON
/// `null` deserializes to `None` and counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseInput {
    /// A `YYYY-MM-DD` date string.
    pub date: Option<Value>,
    /// Required, must not be blank.
    pub description: Option<Value>,
    /// Optional.
    pub category: Option<Value>,
    /// Optional.
    pub payment_mode: Option<Value>,
    /// A number, or a string holding a number.
    pub total_amount: Option<Value>,
    /// `"person1"` or `"person2"`.
    pub paid_by: Option<Value>,
    /// Zero or more, in the same format as `total_amount`.
    pub person1_share: Option<Value>,
    /// Zero or more, in the same format as `total_amount`.
    pub person2_share: Option<Value>,
}

impl ExpenseInput {
    /// Validate the input and convert it into a [NewExpense].
    ///
    /// Checks run in this order and the first failure is returned:
    /// 1. every required field is present and not null,
    /// 2. `date` is a `YYYY-MM-DD` date,
    /// 3. the amounts are numbers and the text fields are strings,
    /// 4. `paid_by` is `person1` or `person2`,
    /// 5. the description is not blank, `total_amount` is greater than zero
    ///    and neither share is negative.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingFields] listing every missing field,
    /// [Error::InvalidFormat] for fields that cannot be parsed, or
    /// [Error::InvalidValue] for fields that break a constraint.
    pub fn validate(&self) -> Result<NewExpense, Error> {
        let required = [
            ("date", present(&self.date)),
            ("description", present(&self.description)),
            ("total_amount", present(&self.total_amount)),
            ("paid_by", present(&self.paid_by)),
            ("person1_share", present(&self.person1_share)),
            ("person2_share", present(&self.person2_share)),
        ];
        let missing_fields: Vec<String> = required
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name.to_string())
            .collect();

        let [
            (_, Some(date)),
            (_, Some(description)),
            (_, Some(total_amount)),
            (_, Some(paid_by)),
            (_, Some(person1_share)),
            (_, Some(person2_share)),
        ] = required
        else {
            return Err(Error::MissingFields(missing_fields));
        };

        let date = parse_date(date)?;

        let total_amount = parse_number("total_amount", total_amount)?;
        let person1_share = parse_number("person1_share", person1_share)?;
        let person2_share = parse_number("person2_share", person2_share)?;

        let description = parse_text("description", description)?;
        let paid_by = parse_string("paid_by", paid_by)?;
        let category = parse_optional_text("category", present(&self.category))?;
        let payment_mode = parse_optional_text("payment_mode", present(&self.payment_mode))?;

        let paid_by = paid_by.parse::<Participant>()?;

        if description.is_empty() {
            return Err(Error::InvalidValue(
                "description cannot be empty".to_owned(),
            ));
        }

        if total_amount <= 0.0 {
            return Err(Error::InvalidValue(format!(
                "total_amount must be greater than 0, got {total_amount}"
            )));
        }

        for (name, share) in [
            ("person1_share", person1_share),
            ("person2_share", person2_share),
        ] {
            if share < 0.0 {
                return Err(Error::InvalidValue(format!(
                    "{name} cannot be negative, got {share}"
                )));
            }
        }

        Ok(NewExpense {
            date,
            description,
            category,
            payment_mode,
            total_amount,
            paid_by,
            person1_share,
            person2_share,
        })
    }
}

fn present(value: &Option<Value>) -> Option<&Value> {
    value.as_ref().filter(|value| !value.is_null())
}

fn parse_date(value: &Value) -> Result<Date, Error> {
    let Value::String(text) = value else {
        return Err(Error::InvalidFormat(format!(
            "date must be a string in the format YYYY-MM-DD, got {value}"
        )));
    };

    let invalid_date = |reason: String| {
        Error::InvalidFormat(format!(
            "date must be in the format YYYY-MM-DD, got \"{text}\" ({reason})"
        ))
    };

    if !has_date_shape(text) {
        return Err(invalid_date("expected digits in the form DDDD-DD-DD".to_owned()));
    }

    let date = Date::parse(text, DATE_FORMAT).map_err(|error| invalid_date(error.to_string()))?;

    if date.year() < 1 {
        return Err(invalid_date("year must be at least 0001".to_owned()));
    }

    Ok(date)
}

/// Exactly `DDDD-DD-DD`, so signed and expanded years are rejected.
fn has_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();

    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

/// Numbers may be sent as JSON numbers or as strings holding a number,
/// which is what HTML number inputs produce.
fn parse_number(name: &str, value: &Value) -> Result<f64, Error> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(number) if number.is_finite() => Ok(number),
        _ => Err(Error::InvalidFormat(format!(
            "{name} must be a number, got {value}"
        ))),
    }
}

fn parse_string<'a>(name: &str, value: &'a Value) -> Result<&'a str, Error> {
    match value {
        Value::String(text) => Ok(text),
        other => Err(Error::InvalidFormat(format!(
            "{name} must be a string, got {other}"
        ))),
    }
}

fn parse_text(name: &str, value: &Value) -> Result<String, Error> {
    parse_string(name, value).map(|text| text.trim().to_owned())
}

fn parse_optional_text(name: &str, value: Option<&Value>) -> Result<String, Error> {
    value.map_or(Ok(String::new()), |value| parse_text(name, value))
}
