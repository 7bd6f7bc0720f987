use super::error::SnapshotError;
use super::SNAPSHOT_VERSION;
use crate::career::{CareerProfile, PersonnelRegistry, Role};
use crate::config::LifecycleConfig;
use crate::market::JobMarketState;
use crate::season::LifecycleOrchestrator;
use crate::types::{ProfileId, TeamId, Year};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs::{rename, File};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Everything needed to resume an engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineState {
    pub next_season: Year,
    pub config: LifecycleConfig,
    pub profiles: Vec<CareerProfile>,
    pub next_profile_id: ProfileId,
    pub market: JobMarketState,
    #[serde(default)]
    pub pending_vacancies: Vec<(TeamId, Role)>,
}

/// Persisted engine state with a format version and an integrity checksum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Snapshot format version
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    /// SHA-256 over the serialized `state`, hex encoded
    pub checksum: String,
    pub state: EngineState,
}

impl EngineSnapshot {
    pub fn capture(orchestrator: &LifecycleOrchestrator) -> Result<Self, SnapshotError> {
        let state = EngineState {
            next_season: orchestrator.next_season(),
            config: orchestrator.config().clone(),
            profiles: orchestrator.registry().iter().cloned().collect(),
            next_profile_id: orchestrator.registry().peek_next_id(),
            market: orchestrator.market().state().clone(),
            pending_vacancies: orchestrator.pending_vacancies().to_vec(),
        };
        let checksum = checksum_of(&state)?;
        Ok(Self { version: SNAPSHOT_VERSION, saved_at: Utc::now(), checksum, state })
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and verify version and checksum. Cross references are checked
    /// by [`EngineSnapshot::restore`].
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: EngineSnapshot = serde_json::from_str(json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::VersionMismatch { found: snapshot.version, expected: SNAPSHOT_VERSION });
        }
        if checksum_of(&snapshot.state)? != snapshot.checksum {
            return Err(SnapshotError::ChecksumMismatch);
        }
        Ok(snapshot)
    }

    /// Rebuild a running engine.
    pub fn restore(self) -> Result<LifecycleOrchestrator, SnapshotError> {
        let state = self.state;
        let mut registry = PersonnelRegistry::new();
        let mut seen = BTreeSet::new();
        for profile in state.profiles {
            if !seen.insert(profile.id) {
                return Err(SnapshotError::DuplicateProfile(profile.id));
            }
            registry.insert(profile);
        }
        registry.reserve_below(state.next_profile_id);
        validate_references(&registry, &state.market)?;
        let orchestrator = LifecycleOrchestrator::from_parts(
            state.config,
            registry,
            state.market,
            state.next_season,
            state.pending_vacancies,
        )?;
        Ok(orchestrator)
    }

    /// Atomic write: temp file, then rename.
    pub fn write_to(&self, path: &Path) -> Result<(), SnapshotError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = self.to_json()?;
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(data.as_bytes())?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, path)?;
        debug!("Saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self, SnapshotError> {
        let data = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&data)?;
        debug!("Loaded {} bytes from {:?}", data.len(), path);
        Ok(snapshot)
    }
}

fn checksum_of(state: &EngineState) -> Result<String, SnapshotError> {
    let bytes = serde_json::to_vec(state)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

fn validate_references(registry: &PersonnelRegistry, market: &JobMarketState) -> Result<(), SnapshotError> {
    for app in market.applications.values() {
        if !registry.contains(app.profile) {
            return Err(SnapshotError::Corrupted(format!("{} references missing {}", app.id, app.profile)));
        }
        if !market.openings.contains_key(&app.opening) {
            return Err(SnapshotError::Corrupted(format!("{} references missing {}", app.id, app.opening)));
        }
    }
    for offer in market.offers.values() {
        if !registry.contains(offer.profile) {
            return Err(SnapshotError::Corrupted(format!("{} references missing {}", offer.id, offer.profile)));
        }
    }
    for profile in registry.iter() {
        for id in profile.pending_applications() {
            match market.applications.get(id) {
                Some(app) if app.profile == profile.id => {}
                _ => {
                    return Err(SnapshotError::Corrupted(format!(
                        "{} lists application {} it does not own",
                        profile.id, id
                    )))
                }
            }
        }
    }
    Ok(())
}
