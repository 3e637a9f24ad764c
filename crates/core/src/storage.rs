//! Persistence of the full patient collection.
//!
//! The store never writes a single record: every save replaces the whole collection. The
//! [`PatientStorage`] trait is the seam between [`PatientService`](crate::PatientService) and
//! the medium, so tests can substitute [`InMemoryStorage`] for the JSON file.
//!
//! ## File layout
//!
//! [`JsonFileStorage`] keeps one pretty-printed JSON array:
//!
//! ```text
//! [
//!   { "id": 1, "nome": "Ana", "idade": 30, "telefone": "123", "data_cadastro": "01/02/2024 10:00" }
//! ]
//! ```
//!
//! Saves are staged in `<file>.tmp` alongside the target and renamed over it, so a reader sees
//! either the previous collection or the new one.

use crate::constants::STAGING_SUFFIX;
use crate::record::Patient;
use crate::{CoreConfig, PatientError, PatientResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Load/save of the full ordered collection.
pub trait PatientStorage: Send + Sync {
    /// Reads every record, in insertion order. An absent collection loads as empty.
    fn load(&self) -> PatientResult<Vec<Patient>>;

    /// Replaces the stored collection with `patients`.
    fn save(&self, patients: &[Patient]) -> PatientResult<()>;
}

/// Collection stored as a JSON array in a single file.
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self::new(cfg.patient_data_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(STAGING_SUFFIX);
        self.path.with_file_name(name)
    }
}

impl PatientStorage for JsonFileStorage {
    fn load(&self) -> PatientResult<Vec<Patient>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no patient file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(PatientError::FileRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let patients: Vec<Patient> =
            serde_json::from_str(&contents).map_err(|source| PatientError::Deserialization {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            "loaded {} patients from {}",
            patients.len(),
            self.path.display()
        );
        Ok(patients)
    }

    fn save(&self, patients: &[Patient]) -> PatientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PatientError::StorageDirCreation {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut json =
            serde_json::to_string_pretty(patients).map_err(PatientError::Serialization)?;
        json.push('\n');

        let staging = self.staging_path();
        fs::write(&staging, json).map_err(|source| PatientError::FileWrite {
            path: staging.clone(),
            source,
        })?;

        if let Err(source) = fs::rename(&staging, &self.path) {
            if let Err(cleanup) = fs::remove_file(&staging) {
                tracing::warn!(
                    "failed to remove staged patient file {}: {}",
                    staging.display(),
                    cleanup
                );
            }
            return Err(PatientError::FileWrite {
                path: self.path.clone(),
                source,
            });
        }

        tracing::debug!("saved {} patients to {}", patients.len(), self.path.display());
        Ok(())
    }
}

/// Collection held in process memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    patients: Mutex<Vec<Patient>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patients(patients: Vec<Patient>) -> Self {
        Self {
            patients: Mutex::new(patients),
        }
    }
}

impl PatientStorage for InMemoryStorage {
    fn load(&self) -> PatientResult<Vec<Patient>> {
        let patients = self
            .patients
            .lock()
            .map_err(|e| PatientError::StorageUnavailable(e.to_string()))?;
        Ok(patients.clone())
    }

    fn save(&self, patients: &[Patient]) -> PatientResult<()> {
        let mut stored = self
            .patients
            .lock()
            .map_err(|e| PatientError::StorageUnavailable(e.to_string()))?;
        *stored = patients.to_vec();
        Ok(())
    }
}
