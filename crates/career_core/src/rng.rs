//! Seeded randomness.
//!
//! One season seed fans out into independent ChaCha streams keyed by year,
//! phase and profile, so a profile's draws do not depend on how many other
//! profiles were processed before it.

use crate::types::{ProfileId, Year};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Which part of the season tick is drawing numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RngPhase {
    JobSecurity = 1,
    Retirement = 2,
    Market = 3,
    Candidates = 4,
    Offers = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonRng {
    seed: u64,
    year: Year,
}

impl SeasonRng {
    pub fn new(seed: u64, year: Year) -> Self {
        Self { seed, year }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Stream for one profile in one phase.
    pub fn for_profile(&self, phase: RngPhase, profile: ProfileId) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.mix(phase as u64, profile.0 as u64))
    }

    /// Stream for phase-wide draws not tied to a profile (e.g. candidate names).
    pub fn for_phase(&self, phase: RngPhase, salt: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.mix(phase as u64 | 0x100, salt))
    }

    // splitmix64 finalizer over the packed inputs
    fn mix(&self, phase: u64, key: u64) -> u64 {
        let mut z = self
            .seed
            .wrapping_add((self.year as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
            .wrapping_add(phase.wrapping_mul(0xBF58_476D_1CE4_E5B9))
            .wrapping_add(key.wrapping_mul(0x94D0_49BB_1331_11EB));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}
