//! Constants used throughout the registry core crate.

/// Default location of the patient collection when no explicit path is configured.
pub const DEFAULT_PATIENT_DATA_FILE: &str = "patient_data/patients.json";

/// Format of the `created_at` timestamp stamped on new records (`dd/mm/yyyy HH:MM`).
pub const CREATED_AT_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Suffix of the sibling file a save is staged in before it replaces the collection.
pub const STAGING_SUFFIX: &str = "tmp";
