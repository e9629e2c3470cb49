//! The two people that share expenses.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// One of the two fixed parties among whom expenses are split.
///
/// Stored in the database and sent over JSON as `"person1"` or `"person2"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Participant {
    /// The first participant.
    Person1,
    /// The second participant.
    Person2,
}

impl Participant {
    /// Both participants, in display order.
    pub const ALL: [Participant; 2] = [Participant::Person1, Participant::Person2];

    /// The identifier used in the database and in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Participant::Person1 => "person1",
            Participant::Person2 => "person2",
        }
    }
}

impl FromStr for Participant {
    type Err = Error;

    /// Parse a participant identifier.
    ///
    /// Only the exact strings `person1` and `person2` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "person1" => Ok(Participant::Person1),
            "person2" => Ok(Participant::Person2),
            other => Err(Error::InvalidValue(format!(
                "paid_by must be \"person1\" or \"person2\", got \"{other}\""
            ))),
        }
    }
}

impl Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The names shown in the UI for each participant.
///
/// Display names only affect rendering. Expenses always store
/// [Participant] identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantNames {
    /// Display name for [Participant::Person1].
    pub person1: String,
    /// Display name for [Participant::Person2].
    pub person2: String,
}

impl ParticipantNames {
    /// Create display names, falling back to the defaults for blank names.
    pub fn new(person1: &str, person2: &str) -> Self {
        let defaults = Self::default();
        let pick = |name: &str, default: String| {
            let name = name.trim();
            if name.is_empty() {
                default
            } else {
                name.to_owned()
            }
        };

        Self {
            person1: pick(person1, defaults.person1),
            person2: pick(person2, defaults.person2),
        }
    }

    /// Get the display name for `participant`.
    pub fn name_of(&self, participant: Participant) -> &str {
        match participant {
            Participant::Person1 => &self.person1,
            Participant::Person2 => &self.person2,
        }
    }
}

impl Default for ParticipantNames {
    fn default() -> Self {
        Self {
            person1: "Person 1".to_owned(),
            person2: "Person 2".to_owned(),
        }
    }
}

#[cfg(test)]
mod participant_tests {
    use crate::{
        Error,
        expense::{Participant, ParticipantNames},
    };

    #[test]
    fn parses_both_participants() {
        assert_eq!("person1".parse::<Participant>(), Ok(Participant::Person1));
        assert_eq!("person2".parse::<Participant>(), Ok(Participant::Person2));
    }

    #[test]
    fn rejects_other_participants() {
        for raw in ["person3", "Person1", " person1", ""] {
            let result = raw.parse::<Participant>();

            assert!(
                matches!(result, Err(Error::InvalidValue(_))),
                "want invalid value error for {raw:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn serializes_as_lowercase_identifier() {
        assert_eq!(
            serde_json::to_string(&Participant::Person2).unwrap(),
            "\"person2\""
        );
        assert_eq!(
            serde_json::from_str::<Participant>("\"person1\"").unwrap(),
            Participant::Person1
        );
    }

    #[test]
    fn blank_names_fall_back_to_defaults() {
        let names = ParticipantNames::new("  Alice ", " ");

        assert_eq!(names.name_of(Participant::Person1), "Alice");
        assert_eq!(names.name_of(Participant::Person2), "Person 2");
    }
}
