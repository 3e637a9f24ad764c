//! # Registry Core
//!
//! Core business logic for the patient registry.
//!
//! This crate contains the record store and nothing else:
//! - Patient records persisted as a single JSON array (see [`storage`])
//! - Create, read, search, update and delete over the full collection (see [`PatientService`])
//! - Summary statistics over the current records
//!
//! **No API concerns**: HTTP servers, request parsing and command-line handling belong in
//! `api-rest`, `api-shared` and `registry-cli`.

pub mod config;
pub mod constants;
pub mod error;
pub mod patient;
pub mod record;
pub mod statistics;
pub mod storage;
pub mod validation;

pub use config::CoreConfig;
pub use constants::DEFAULT_PATIENT_DATA_FILE;
pub use error::{ErrorKind, PatientError, PatientResult};
pub use patient::PatientService;
pub use record::{NewPatient, Patient, PatientUpdate};
pub use registry_types::{Age, NonEmptyText};
pub use statistics::Statistics;
pub use storage::{InMemoryStorage, JsonFileStorage, PatientStorage};
