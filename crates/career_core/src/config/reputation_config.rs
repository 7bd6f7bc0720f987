//! Reputation update parameters.

use crate::error::{CareerError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationConfig {
    /// Fraction of the gap to the season target closed by track reputation (default: 0.35)
    pub track_pull_rate: f32,
    /// Fraction of the gap to track reputation closed by overall (default: 0.5)
    pub overall_damping: f32,
    /// Seasons averaged for the win-percentage trend (default: 3)
    pub trend_window: usize,
    /// Weight of the trend component in the target (default: 0.7)
    pub trend_weight: f32,
    /// Weight of the postseason component in the target (default: 0.3)
    pub postseason_weight: f32,
    /// Postseason component for a title (default: 100)
    pub championship_score: f32,
    /// Postseason component for a playoff appearance (default: 70)
    pub playoff_score: f32,
    /// Postseason component for missing the playoffs (default: 35)
    pub missed_score: f32,
    /// Flat penalty on every firing (default: 10)
    pub firing_penalty: f32,
}

impl Default for ReputationConfig {
    fn default() -> Self {
        Self {
            track_pull_rate: 0.35,
            overall_damping: 0.5,
            trend_window: 3,
            trend_weight: 0.7,
            postseason_weight: 0.3,
            championship_score: 100.0,
            playoff_score: 70.0,
            missed_score: 35.0,
            firing_penalty: 10.0,
        }
    }
}

impl ReputationConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [("track_pull_rate", self.track_pull_rate), ("overall_damping", self.overall_damping)] {
            if !(rate > 0.0 && rate <= 1.0) {
                return Err(CareerError::InvalidConfig(format!("{} must be in (0, 1]", name)));
            }
        }
        if (self.trend_weight + self.postseason_weight - 1.0).abs() > 1e-4 {
            return Err(CareerError::InvalidConfig(
                "trend_weight + postseason_weight must equal 1.0".into(),
            ));
        }
        if self.trend_window == 0 {
            return Err(CareerError::InvalidConfig("trend_window must be > 0".into()));
        }
        if self.firing_penalty < 0.0 {
            return Err(CareerError::InvalidConfig("firing_penalty must be >= 0".into()));
        }
        Ok(())
    }
}
