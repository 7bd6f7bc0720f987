use super::profile::CareerProfile;
use super::role::Role;
use crate::error::{CareerError, Result};
use crate::types::{ProfileId, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every tracked person, keyed and iterated by ascending id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonnelRegistry {
    profiles: BTreeMap<ProfileId, CareerProfile>,
    next_id: ProfileId,
}

impl Default for PersonnelRegistry {
    fn default() -> Self {
        Self { profiles: BTreeMap::new(), next_id: ProfileId(1) }
    }
}

impl PersonnelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next generated profile will receive.
    pub fn allocate_id(&mut self) -> ProfileId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    pub fn peek_next_id(&self) -> ProfileId {
        self.next_id
    }

    /// Never hand out ids below `id`. Restored engines resume the allocator
    /// where it stopped, including ids allocated for failed hires.
    pub fn reserve_below(&mut self, id: ProfileId) {
        if id > self.next_id {
            self.next_id = id;
        }
    }

    /// Insert a profile, keeping the id allocator ahead of it.
    pub fn insert(&mut self, profile: CareerProfile) {
        if profile.id >= self.next_id {
            self.next_id = profile.id.next();
        }
        self.profiles.insert(profile.id, profile);
    }

    pub fn get(&self, id: ProfileId) -> Result<&CareerProfile> {
        self.profiles.get(&id).ok_or(CareerError::UnknownProfile(id))
    }

    pub fn get_mut(&mut self, id: ProfileId) -> Result<&mut CareerProfile> {
        self.profiles.get_mut(&id).ok_or(CareerError::UnknownProfile(id))
    }

    pub fn contains(&self, id: ProfileId) -> bool {
        self.profiles.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CareerProfile> {
        self.profiles.values()
    }

    /// Ids of everyone not retired, ascending.
    pub fn active_ids(&self) -> Vec<ProfileId> {
        self.profiles.values().filter(|p| !p.is_retired()).map(|p| p.id).collect()
    }

    pub fn unemployed_ids(&self) -> Vec<ProfileId> {
        self.profiles.values().filter(|p| p.role() == Role::Unemployed).map(|p| p.id).collect()
    }

    /// Who currently holds `role` at `team`.
    pub fn holder_of(&self, team: TeamId, role: Role) -> Option<ProfileId> {
        self.profiles
            .values()
            .find(|p| p.team() == Some(team) && p.role() == role)
            .map(|p| p.id)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &CareerProfile> {
        self.profiles.values()
    }
}
