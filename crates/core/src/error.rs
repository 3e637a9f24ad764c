use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("patient {id} not found")]
    NotFound { id: u64 },

    #[error("failed to create storage directory {}: {source}", .path.display())]
    StorageDirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read patient file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write patient file {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize patients: {0}")]
    Serialization(serde_json::Error),
    #[error("patient file {} is corrupt: {source}", .path.display())]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("patient storage is unavailable: {0}")]
    StorageUnavailable(String),
}

/// The three outcomes a caller has to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
}

impl PatientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PatientError::InvalidInput(_) => ErrorKind::Validation,
            PatientError::NotFound { .. } => ErrorKind::NotFound,
            PatientError::StorageDirCreation { .. }
            | PatientError::FileRead { .. }
            | PatientError::FileWrite { .. }
            | PatientError::Serialization(_)
            | PatientError::Deserialization { .. }
            | PatientError::StorageUnavailable(_) => ErrorKind::Storage,
        }
    }
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
