//! Patient service.
//!
//! This module provides the record store's CRUD operations. Every call reloads the full
//! collection from [`PatientStorage`], and every mutating call writes the full collection
//! back.
//!
//! ## Concurrency
//!
//! No lock spans the read-modify-write cycle of a call. Two concurrent mutating calls can both
//! read the same collection and the later save wins, losing the earlier change (and possibly
//! assigning the same id twice). The registry is meant for a single user.

use crate::constants::CREATED_AT_FORMAT;
use crate::record::{NewPatient, Patient, PatientUpdate};
use crate::statistics::Statistics;
use crate::storage::{JsonFileStorage, PatientStorage};
use crate::{CoreConfig, PatientError, PatientResult};
use chrono::Local;
use std::sync::Arc;

/// Pure patient data operations - no API concerns
#[derive(Clone)]
pub struct PatientService {
    storage: Arc<dyn PatientStorage>,
}

impl std::fmt::Debug for PatientService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatientService").finish_non_exhaustive()
    }
}

impl PatientService {
    /// Creates a service over the given storage.
    pub fn new(storage: Arc<dyn PatientStorage>) -> Self {
        Self { storage }
    }

    /// Creates a service over the JSON file named by the configuration.
    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self::new(Arc::new(JsonFileStorage::from_config(cfg)))
    }

    /// Returns every patient in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be read or parsed.
    pub fn list(&self) -> PatientResult<Vec<Patient>> {
        self.storage.load()
    }

    /// Registers a new patient.
    ///
    /// The id is one more than the largest id currently stored, or `1` for an empty
    /// collection. The creation time is stamped in local time.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be loaded or saved.
    pub fn create(&self, new: NewPatient) -> PatientResult<Patient> {
        let mut patients = self.storage.load()?;

        let id = next_id(&patients)?;
        let patient = Patient {
            id,
            name: new.name,
            age: new.age,
            phone: new.phone,
            created_at: Local::now().format(CREATED_AT_FORMAT).to_string(),
        };

        patients.push(patient.clone());
        self.storage.save(&patients)?;

        tracing::info!("created patient {}", id);
        Ok(patient)
    }

    /// Returns the first patient with the given id.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::NotFound` if no patient has this id.
    pub fn get_by_id(&self, id: u64) -> PatientResult<Patient> {
        self.storage
            .load()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(PatientError::NotFound { id })
    }

    /// Searches by name or id.
    ///
    /// A patient matches when `term` occurs anywhere in its name, ignoring case, or when `term`
    /// is exactly its id. No match is an empty result, not an error.
    pub fn find_by_name(&self, term: &str) -> PatientResult<Vec<Patient>> {
        let term = term.trim();
        let needle = term.to_lowercase();

        let matches: Vec<Patient> = self
            .storage
            .load()?
            .into_iter()
            .filter(|p| {
                p.name.as_str().to_lowercase().contains(&needle) || p.id.to_string() == term
            })
            .collect();

        tracing::debug!("search {:?} matched {} patients", term, matches.len());
        Ok(matches)
    }

    /// Overwrites the supplied fields of an existing patient.
    ///
    /// The id and creation time are never changed.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::NotFound` if no patient has this id, or a storage error if the
    /// collection cannot be loaded or saved.
    pub fn update(&self, id: u64, fields: PatientUpdate) -> PatientResult<Patient> {
        let mut patients = self.storage.load()?;

        let patient = patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PatientError::NotFound { id })?;
        fields.apply(patient);
        let updated = patient.clone();

        self.storage.save(&patients)?;

        tracing::info!("updated patient {}", id);
        Ok(updated)
    }

    /// Removes a patient permanently.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::NotFound` if no patient has this id, or a storage error if the
    /// collection cannot be loaded or saved.
    pub fn delete(&self, id: u64) -> PatientResult<()> {
        let mut patients = self.storage.load()?;

        let index = patients
            .iter()
            .position(|p| p.id == id)
            .ok_or(PatientError::NotFound { id })?;
        patients.remove(index);

        self.storage.save(&patients)?;

        tracing::info!("deleted patient {}", id);
        Ok(())
    }

    /// Count, mean, min and max age over the current collection.
    pub fn statistics(&self) -> PatientResult<Statistics> {
        Ok(Statistics::from_patients(&self.storage.load()?))
    }
}

fn next_id(patients: &[Patient]) -> PatientResult<u64> {
    match patients.iter().map(|p| p.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| PatientError::StorageUnavailable("patient id space exhausted".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;
    use crate::ErrorKind;
    use registry_types::{Age, NonEmptyText};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn test_service() -> PatientService {
        PatientService::new(Arc::new(InMemoryStorage::new()))
    }

    fn create(service: &PatientService, name: &str, age: &str, phone: &str) -> Patient {
        service
            .create(NewPatient::new(name, age, phone).expect("valid input"))
            .expect("create should succeed")
    }

    /// Storage whose saves always fail, counting how often they were attempted.
    #[derive(Default)]
    struct FailingSaves {
        inner: InMemoryStorage,
        attempts: AtomicUsize,
    }

    impl PatientStorage for FailingSaves {
        fn load(&self) -> PatientResult<Vec<Patient>> {
            self.inner.load()
        }

        fn save(&self, _patients: &[Patient]) -> PatientResult<()> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(PatientError::StorageUnavailable("disk full".into()))
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let service = test_service();
        let ids: Vec<u64> = (0..5)
            .map(|i| create(&service, &format!("Patient {i}"), "20", "555").id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_create_uses_max_id_after_gap() {
        let service = test_service();
        create(&service, "Ana", "30", "123");
        create(&service, "Bia", "40", "456");
        create(&service, "Caio", "50", "789");
        service.delete(2).unwrap();

        assert_eq!(create(&service, "Duda", "60", "000").id, 4);
    }

    #[test]
    fn test_create_stamps_timestamp_format() {
        let service = test_service();
        let patient = create(&service, "Ana", "30", "123");
        chrono::NaiveDateTime::parse_from_str(&patient.created_at, CREATED_AT_FORMAT)
            .expect("created_at should use dd/mm/yyyy HH:MM");
    }

    #[test]
    fn test_scenario_create_delete_statistics() {
        let service = test_service();

        let ana = create(&service, "Ana", "30", "123");
        assert_eq!(ana.id, 1);
        assert_eq!(ana.name.as_str(), "Ana");
        assert_eq!(ana.age.value(), 30);
        assert_eq!(ana.phone.as_str(), "123");

        let bia = create(&service, "Bia", "40", "456");
        assert_eq!(bia.id, 2);

        service.delete(1).unwrap();
        let err = service.get_by_id(1).expect_err("deleted patient should be gone");
        assert!(matches!(err, PatientError::NotFound { id: 1 }));
        assert_eq!(service.get_by_id(2).unwrap(), bia);

        let stats = service.statistics().unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean_age, Some(40.0));
        assert_eq!(stats.min_age, Some(Age::new(40).unwrap()));
        assert_eq!(stats.max_age, Some(Age::new(40).unwrap()));
    }

    #[test]
    fn test_statistics_on_empty_store() {
        let stats = test_service().statistics().unwrap();
        assert_eq!(stats.count, 0);
        assert!(stats.mean_age.is_none());
        assert!(stats.min_age.is_none() && stats.max_age.is_none());
    }

    #[test]
    fn test_find_by_name_is_case_insensitive_substring() {
        let service = test_service();
        create(&service, "Ana", "30", "123");
        create(&service, "Bia", "40", "456");
        create(&service, "Anderson", "25", "789");

        let names: Vec<String> = service
            .find_by_name("an")
            .unwrap()
            .into_iter()
            .map(|p| p.name.to_string())
            .collect();
        assert_eq!(names, vec!["Ana", "Anderson"]);
    }

    #[test]
    fn test_find_by_name_matches_exact_id() {
        let service = test_service();
        for name in ["Ana", "Bia", "Caio"] {
            create(&service, name, "30", "123");
        }

        let found = service.find_by_name(" 2 ").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name.as_str(), "Bia");
        assert!(service.find_by_name("Zeca").unwrap().is_empty());
    }

    #[test]
    fn test_update_keeps_id_created_at_and_omitted_fields() {
        let service = test_service();
        let original = create(&service, "Ana", "30", "123");

        let fields = PatientUpdate {
            phone: Some(NonEmptyText::new("999").unwrap()),
            ..Default::default()
        };
        let updated = service.update(original.id, fields).unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.name, original.name);
        assert_eq!(updated.age, original.age);
        assert_eq!(updated.phone.as_str(), "999");
        assert_eq!(service.get_by_id(original.id).unwrap(), updated);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let service = test_service();
        create(&service, "Ana", "30", "123");
        let err = service
            .update(9, PatientUpdate::new(Some("Bia"), None, None).unwrap())
            .expect_err("unknown id should fail");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_delete_unknown_id_leaves_store_untouched() {
        let storage = Arc::new(FailingSaves::default());
        storage
            .inner
            .save(&[Patient {
                id: 1,
                name: NonEmptyText::new("Ana").unwrap(),
                age: Age::new(30).unwrap(),
                phone: NonEmptyText::new("123").unwrap(),
                created_at: String::new(),
            }])
            .unwrap();
        let service = PatientService::new(storage.clone());

        let err = service.delete(7).expect_err("unknown id should fail");
        assert!(matches!(err, PatientError::NotFound { id: 7 }));
        assert_eq!(storage.attempts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_save_failure_surfaces_as_storage_error() {
        let service = PatientService::new(Arc::new(FailingSaves::default()));
        let err = service
            .create(NewPatient::new("Ana", "30", "123").unwrap())
            .expect_err("failing save should surface");
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_file_backed_service_persists_across_instances() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = CoreConfig::new(temp_dir.path().join("patients.json"))
            .expect("CoreConfig::new should succeed");

        let first = PatientService::from_config(&cfg);
        create(&first, "Ana", "30", "123");
        create(&first, "Bia", "40", "456");

        let second = PatientService::from_config(&cfg);
        let names: Vec<String> = second
            .list()
            .unwrap()
            .into_iter()
            .map(|p| p.name.to_string())
            .collect();
        assert_eq!(names, vec!["Ana", "Bia"]);
    }

    #[test]
    fn test_next_id_overflow_is_reported() {
        let patient = Patient {
            id: u64::MAX,
            name: NonEmptyText::new("Ana").unwrap(),
            age: Age::new(30).unwrap(),
            phone: NonEmptyText::new("123").unwrap(),
            created_at: String::new(),
        };
        assert!(next_id(&[patient]).is_err());
        assert_eq!(next_id(&[]).unwrap(), 1);
    }
}
