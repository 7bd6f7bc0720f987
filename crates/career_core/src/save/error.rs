use crate::error::CareerError;
use crate::types::ProfileId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Duplicate profile {0} in snapshot")]
    DuplicateProfile(ProfileId),

    #[error("Corrupted snapshot: {0}")]
    Corrupted(String),

    #[error("Snapshot configuration rejected: {0}")]
    Config(#[from] CareerError),
}

impl SnapshotError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            SnapshotError::Io(_) => true,
            SnapshotError::VersionMismatch { .. } => true,
            SnapshotError::Json(_) => false,
            SnapshotError::ChecksumMismatch => false,
            SnapshotError::DuplicateProfile(_) => false,
            SnapshotError::Corrupted(_) => false,
            SnapshotError::Config(_) => false,
        }
    }
}
