use chrono::NaiveDate;
use csv::StringRecord;

use crate::contacts::domain::{Contact, Gender, DATE_OF_BIRTH_FORMAT};

/// Column order of the contact export: name, date of birth, gender, phone,
/// address.
pub(crate) const EXPECTED_FIELDS: usize = 5;

/// Reason a row was rejected. Rejections are logged by the loader and then
/// dropped; they never propagate.
#[derive(Debug, thiserror::Error)]
pub(crate) enum RowError {
    #[error("expected 5 fields, found {0}")]
    FieldCount(usize),
    #[error("blank {0} field")]
    BlankField(&'static str),
    #[error("unparsable date of birth '{0}'")]
    DateOfBirth(String),
    #[error("unrecognized gender token '{0}'")]
    Gender(String),
}

/// Validate one record against the export schema. A header line fails here on
/// the date column, so exports with or without a header both load cleanly.
pub(crate) fn contact_from_record(record: &StringRecord) -> Result<Contact, RowError> {
    if record.len() != EXPECTED_FIELDS {
        return Err(RowError::FieldCount(record.len()));
    }

    let name = required(record, 0, "name")?;
    let raw_date = required(record, 1, "date of birth")?;
    let raw_gender = required(record, 2, "gender")?;
    let phone = required(record, 3, "phone")?;
    let address = required(record, 4, "address")?;

    let date_of_birth = NaiveDate::parse_from_str(raw_date, DATE_OF_BIRTH_FORMAT)
        .map_err(|_| RowError::DateOfBirth(raw_date.to_string()))?;
    let gender =
        Gender::parse(raw_gender).ok_or_else(|| RowError::Gender(raw_gender.to_string()))?;

    Ok(Contact::new(
        name.to_string(),
        date_of_birth,
        gender,
        phone.to_string(),
        address.to_string(),
    ))
}

fn required<'a>(
    record: &'a StringRecord,
    index: usize,
    field: &'static str,
) -> Result<&'a str, RowError> {
    let value = record.get(index).map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(RowError::BlankField(field));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn well_formed_record_builds_a_contact() {
        let contact = contact_from_record(&record(&[
            "Jane Doe",
            "1985-03-14",
            "F",
            "555-0101",
            "12 Elm Street",
        ]))
        .expect("record is valid");

        assert_eq!(contact.name, "Jane Doe");
        assert_eq!(contact.gender, Gender::Female);
        assert_eq!(
            contact.date_of_birth,
            NaiveDate::from_ymd_opt(1985, 3, 14).expect("valid date")
        );
        assert!(contact.id.is_none());
    }

    #[test]
    fn short_record_is_rejected_on_field_count() {
        let error = contact_from_record(&record(&["Jane Doe", "1985-03-14"]))
            .expect_err("record is short");
        assert!(matches!(error, RowError::FieldCount(2)));
    }

    #[test]
    fn blank_field_is_rejected_even_when_padded() {
        let error = contact_from_record(&record(&[
            "Jane Doe",
            "1985-03-14",
            "F",
            "   ",
            "12 Elm Street",
        ]))
        .expect_err("phone is blank");
        assert!(matches!(error, RowError::BlankField("phone")));
    }

    #[test]
    fn unparsable_date_is_rejected() {
        let error = contact_from_record(&record(&[
            "Jane Doe",
            "14/03/1985",
            "F",
            "555-0101",
            "12 Elm Street",
        ]))
        .expect_err("date format is wrong");
        assert!(matches!(error, RowError::DateOfBirth(_)));
    }

    #[test]
    fn unknown_gender_token_is_rejected() {
        let error = contact_from_record(&record(&[
            "Jane Doe",
            "1985-03-14",
            "unknown",
            "555-0101",
            "12 Elm Street",
        ]))
        .expect_err("gender token is invalid");
        assert!(matches!(error, RowError::Gender(_)));
    }
}
