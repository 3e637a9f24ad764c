//! Summary figures over the current collection, as shown on the listing page.

use crate::record::Patient;
use registry_types::Age;

/// Derived view of the collection. Every field except `count` is `None` when it is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub mean_age: Option<f64>,
    pub min_age: Option<Age>,
    pub max_age: Option<Age>,
    /// First patient, in collection order, holding the maximum age.
    pub oldest: Option<Patient>,
}

impl Statistics {
    pub fn from_patients(patients: &[Patient]) -> Self {
        let mut oldest: Option<&Patient> = None;
        let mut min_age: Option<Age> = None;
        let mut total: u64 = 0;

        for patient in patients {
            total += u64::from(patient.age.value());
            min_age = Some(min_age.map_or(patient.age, |m| m.min(patient.age)));
            if oldest.map_or(true, |o| patient.age > o.age) {
                oldest = Some(patient);
            }
        }

        let count = patients.len();
        let mean_age = (count > 0).then(|| total as f64 / count as f64);

        Self {
            count,
            mean_age,
            min_age,
            max_age: oldest.map(|p| p.age),
            oldest: oldest.cloned(),
        }
    }

    /// Mean age rounded to one decimal place.
    pub fn mean_age_rounded(&self) -> Option<f64> {
        self.mean_age.map(|m| (m * 10.0).round() / 10.0)
    }
}
