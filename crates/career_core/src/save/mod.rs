// Engine snapshots: JSON with a version and a SHA-256 integrity check.

pub mod error;
pub mod format;

pub use error::SnapshotError;
pub use format::{EngineSnapshot, EngineState};

pub const SNAPSHOT_VERSION: u32 = 1;
