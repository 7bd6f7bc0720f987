//! Job security (firing and renewal) parameters.

use crate::error::{CareerError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSecurityConfig {
    /// Expected win pct for a contender (default: 0.65)
    pub contender_expectation: f32,
    /// Expected win pct for a playoff hopeful (default: 0.55)
    pub playoff_expectation: f32,
    /// Expected win pct while rebuilding (default: 0.35)
    pub rebuilding_expectation: f32,
    /// Fire chance per point of win-pct shortfall (default: 2.5)
    pub shortfall_scale: f32,
    /// Multiplier during the first season in a role (default: 0.25)
    pub first_season_grace: f32,
    /// Multiplier when the previous season also fell short (default: 2.0)
    pub repeat_miss_multiplier: f32,
    /// Pressure on roles below the top tier (default: 0.5)
    pub junior_pressure: f32,
    /// Cap on a single season's fire chance (default: 0.9)
    pub max_fire_chance: f32,
    /// Track reputation needed for a renewal offer (default: 45)
    pub extension_reputation: f32,
}

impl Default for JobSecurityConfig {
    fn default() -> Self {
        Self {
            contender_expectation: 0.65,
            playoff_expectation: 0.55,
            rebuilding_expectation: 0.35,
            shortfall_scale: 2.5,
            first_season_grace: 0.25,
            repeat_miss_multiplier: 2.0,
            junior_pressure: 0.5,
            max_fire_chance: 0.9,
            extension_reputation: 45.0,
        }
    }
}

impl JobSecurityConfig {
    pub fn validate(&self) -> Result<()> {
        let expectations =
            [self.contender_expectation, self.playoff_expectation, self.rebuilding_expectation];
        if expectations.iter().any(|e| !(0.0..=1.0).contains(e)) {
            return Err(CareerError::InvalidConfig("win expectations must be in 0..=1".into()));
        }
        if !(0.0..=1.0).contains(&self.max_fire_chance) {
            return Err(CareerError::InvalidConfig("max_fire_chance must be in 0..=1".into()));
        }
        if self.shortfall_scale < 0.0 || self.first_season_grace < 0.0 || self.junior_pressure < 0.0 {
            return Err(CareerError::InvalidConfig("security multipliers must be >= 0".into()));
        }
        Ok(())
    }
}
