//! Patient record types.
//!
//! A [`Patient`] is the unit persisted by the store. [`NewPatient`] and [`PatientUpdate`] carry
//! already-validated input into [`PatientService`](crate::PatientService).

use crate::validation::{parse_age, required_text};
use crate::PatientResult;
use registry_types::{Age, NonEmptyText};
use serde::{Deserialize, Serialize};

/// One patient entry in the collection.
///
/// The on-disk keys follow the registry's file format (`nome`, `idade`, `telefone`,
/// `data_cadastro`); the English field names are accepted as aliases on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Unique within the collection, assigned at creation.
    pub id: u64,

    #[serde(rename = "nome", alias = "name")]
    pub name: NonEmptyText,

    #[serde(rename = "idade", alias = "age")]
    pub age: Age,

    #[serde(rename = "telefone", alias = "phone")]
    pub phone: NonEmptyText,

    /// Local creation time, `dd/mm/yyyy HH:MM`. Never changed by an update.
    #[serde(rename = "data_cadastro", alias = "created_at", default)]
    pub created_at: String,
}

/// Validated input for creating a patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub name: NonEmptyText,
    pub age: Age,
    pub phone: NonEmptyText,
}

impl NewPatient {
    /// Validates raw text input.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if any field is empty or the age is not a valid
    /// whole number.
    pub fn new(name: &str, age: &str, phone: &str) -> PatientResult<Self> {
        Self::with_age(name, parse_age(age)?, phone)
    }

    /// Validates the text fields of input whose age is already parsed.
    pub fn with_age(name: &str, age: Age, phone: &str) -> PatientResult<Self> {
        Ok(Self {
            name: required_text("name", name)?,
            age,
            phone: required_text("phone", phone)?,
        })
    }
}

/// Fields to overwrite on an existing patient. `None` leaves the stored value as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientUpdate {
    pub name: Option<NonEmptyText>,
    pub age: Option<Age>,
    pub phone: Option<NonEmptyText>,
}

impl PatientUpdate {
    /// Validates each supplied field; absent fields stay absent.
    pub fn new(name: Option<&str>, age: Option<&str>, phone: Option<&str>) -> PatientResult<Self> {
        Self::with_age(name, age.map(parse_age).transpose()?, phone)
    }

    /// Like [`PatientUpdate::new`] for an age that is already parsed.
    pub fn with_age(
        name: Option<&str>,
        age: Option<Age>,
        phone: Option<&str>,
    ) -> PatientResult<Self> {
        Ok(Self {
            name: name.map(|v| required_text("name", v)).transpose()?,
            age,
            phone: phone.map(|v| required_text("phone", v)).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.phone.is_none()
    }

    pub(crate) fn apply(self, patient: &mut Patient) {
        if let Some(name) = self.name {
            patient.name = name;
        }
        if let Some(age) = self.age {
            patient.age = age;
        }
        if let Some(phone) = self.phone {
            patient.phone = phone;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatientError;

    #[test]
    fn new_patient_rejects_each_missing_field() {
        for (name, age, phone) in [("", "30", "123"), ("Ana", "", "123"), ("Ana", "30", " ")] {
            let err = NewPatient::new(name, age, phone).expect_err("missing field should fail");
            assert!(matches!(err, PatientError::InvalidInput(_)));
        }
    }

    #[test]
    fn with_age_matches_text_constructor() {
        let age = Age::new(30).unwrap();
        assert_eq!(
            NewPatient::with_age("Ana", age, "123").unwrap(),
            NewPatient::new("Ana", "30", "123").unwrap()
        );
        let err = NewPatient::with_age("Ana", age, "").expect_err("blank phone should fail");
        assert!(matches!(err, PatientError::InvalidInput(msg) if msg == "phone is required"));

        let update = PatientUpdate::with_age(None, Some(age), Some("999")).unwrap();
        assert_eq!(update, PatientUpdate::new(None, Some("30"), Some("999")).unwrap());
    }

    #[test]
    fn update_rejects_blank_supplied_field() {
        let err = PatientUpdate::new(Some(""), None, None).expect_err("blank name should fail");
        assert!(matches!(err, PatientError::InvalidInput(_)));
        assert!(PatientUpdate::new(None, None, None).unwrap().is_empty());
    }

    #[test]
    fn patient_reads_legacy_string_age_and_english_keys() {
        let legacy = r#"{"id": 7, "nome": "Ana", "idade": "30", "telefone": "123", "data_cadastro": "01/02/2024 10:00"}"#;
        let english = r#"{"id": 7, "name": "Ana", "age": 30, "phone": "123", "created_at": "01/02/2024 10:00"}"#;

        let a: Patient = serde_json::from_str(legacy).unwrap();
        let b: Patient = serde_json::from_str(english).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.age.value(), 30);
    }

    #[test]
    fn patient_writes_file_format_keys() {
        let patient = Patient {
            id: 1,
            name: NonEmptyText::new("Ana").unwrap(),
            age: Age::new(30).unwrap(),
            phone: NonEmptyText::new("123").unwrap(),
            created_at: "01/02/2024 10:00".into(),
        };
        let value = serde_json::to_value(&patient).unwrap();
        assert_eq!(value["nome"], "Ana");
        assert_eq!(value["idade"], 30);
        assert_eq!(value["telefone"], "123");
        assert_eq!(value["data_cadastro"], "01/02/2024 10:00");
    }
}
