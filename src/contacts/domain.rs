use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date-of-birth format used by the CSV export.
pub const DATE_OF_BIRTH_FORMAT: &str = "%Y-%m-%d";

/// Identifier wrapper assigned by the repository when a contact is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(pub u64);

/// One address-book entry. Construction goes through row validation, so a
/// stored contact always has every field present and well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ContactId>,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub phone: String,
    pub address: String,
}

impl Contact {
    pub fn new(
        name: String,
        date_of_birth: NaiveDate,
        gender: Gender,
        phone: String,
        address: String,
    ) -> Self {
        Self {
            id: None,
            name,
            date_of_birth,
            gender,
            phone,
            address,
        }
    }
}

/// Gender token as recorded in the contact export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse an export token. Anything other than `M`/`F` (case-insensitive,
    /// surrounding whitespace ignored) is rejected.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            t if t.eq_ignore_ascii_case("m") => Some(Self::Male),
            t if t.eq_ignore_ascii_case("f") => Some(Self::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}
