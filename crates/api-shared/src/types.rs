//! Request and response bodies of the registry JSON API.
//!
//! The wire uses English field names; the on-disk file format is the store's concern.

use registry_core::validation::{age_from_number, parse_age};
use registry_core::{Age, NewPatient, Patient, PatientResult, PatientUpdate, Statistics};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// An age as posted by a client: either `30` or `"30"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AgeValue {
    Number(i64),
    Text(String),
}

impl Default for AgeValue {
    fn default() -> Self {
        AgeValue::Text(String::new())
    }
}

impl AgeValue {
    pub fn to_age(&self) -> PatientResult<Age> {
        match self {
            AgeValue::Number(n) => age_from_number(*n),
            AgeValue::Text(s) => parse_age(s),
        }
    }
}

/// Body of `POST /patients`. Missing fields are treated as empty and rejected by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreatePatientReq {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: AgeValue,
    #[serde(default)]
    pub phone: String,
}

impl CreatePatientReq {
    pub fn into_new_patient(self) -> PatientResult<NewPatient> {
        NewPatient::with_age(&self.name, self.age.to_age()?, &self.phone)
    }
}

/// Body of `PUT /patients/{id}`. Omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePatientReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<AgeValue>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl UpdatePatientReq {
    pub fn into_update(self) -> PatientResult<PatientUpdate> {
        let age = self.age.map(|v| v.to_age()).transpose()?;
        PatientUpdate::with_age(self.name.as_deref(), age, self.phone.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    pub id: u64,
    pub name: String,
    pub age: u32,
    pub phone: String,
    /// `dd/mm/yyyy HH:MM`, local time of registration.
    pub created_at: String,
}

impl From<Patient> for PatientRes {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            name: p.name.to_string(),
            age: p.age.value(),
            phone: p.phone.to_string(),
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListPatientsRes {
    pub patients: Vec<PatientRes>,
}

impl From<Vec<Patient>> for ListPatientsRes {
    fn from(patients: Vec<Patient>) -> Self {
        Self {
            patients: patients.into_iter().map(PatientRes::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatisticsRes {
    pub count: usize,
    /// Rounded to one decimal place.
    pub mean_age: Option<f64>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub oldest: Option<PatientRes>,
}

impl From<Statistics> for StatisticsRes {
    fn from(stats: Statistics) -> Self {
        Self {
            count: stats.count,
            mean_age: stats.mean_age_rounded(),
            min_age: stats.min_age.map(|a| a.value()),
            max_age: stats.max_age.map(|a| a.value()),
            oldest: stats.oldest.map(PatientRes::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}
