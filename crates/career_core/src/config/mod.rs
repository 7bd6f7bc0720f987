//! # Lifecycle Configuration
//!
//! Every tuning constant of the lifecycle engine in one place, with presets.
//!
//! ```rust
//! use career_core::config::LifecycleConfig;
//!
//! let config = LifecycleConfig::default();
//! assert!(config.validate().is_ok());
//! let volatile = LifecycleConfig::volatile();
//! assert!(volatile.validate().is_ok());
//! ```

mod market_config;
mod reputation_config;
mod retirement_config;
mod security_config;

pub use market_config::{FitWeights, MarketConfig};
pub use reputation_config::ReputationConfig;
pub use retirement_config::{RetirementConfig, RetirementWeights};
pub use security_config::JobSecurityConfig;

use crate::error::{CareerError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LifecycleConfig {
    pub retirement: RetirementConfig,
    pub reputation: ReputationConfig,
    pub security: JobSecurityConfig,
    #[serde(default)]
    pub market: MarketConfig,
}

impl LifecycleConfig {
    /// 기본 설정
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Impatient owners, more poaching, bigger reputation swings.
    pub fn volatile() -> Self {
        let mut cfg = Self::default();
        cfg.security.shortfall_scale = 4.0;
        cfg.security.first_season_grace = 0.5;
        cfg.reputation.track_pull_rate = 0.5;
        cfg.market.unsolicited_chance = 0.3;
        cfg.market.poach_reputation = 55.0;
        cfg
    }

    /// Long tenures and few moves.
    pub fn stable() -> Self {
        let mut cfg = Self::default();
        cfg.security.shortfall_scale = 1.2;
        cfg.security.repeat_miss_multiplier = 1.5;
        cfg.reputation.track_pull_rate = 0.2;
        cfg.market.unsolicited_chance = 0.05;
        cfg
    }

    /// Setup-time check. A season tick refuses to start on an invalid config.
    pub fn validate(&self) -> Result<()> {
        self.retirement.validate()?;
        self.reputation.validate()?;
        self.security.validate()?;
        self.market.validate()?;
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| CareerError::InvalidConfig(format!("config parse failed: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(LifecycleConfig::realistic().validate().is_ok());
        assert!(LifecycleConfig::volatile().validate().is_ok());
        assert!(LifecycleConfig::stable().validate().is_ok());
    }

    #[test]
    fn test_volatile_is_harsher_than_stable() {
        let volatile = LifecycleConfig::volatile();
        let stable = LifecycleConfig::stable();
        assert!(volatile.security.shortfall_scale > stable.security.shortfall_scale);
        assert!(volatile.market.unsolicited_chance > stable.market.unsolicited_chance);
    }

    #[test]
    fn test_weights_not_summing_to_one_rejected() {
        let mut cfg = LifecycleConfig::default();
        cfg.retirement.weights.age = 0.5;
        assert!(matches!(cfg.validate(), Err(CareerError::MalformedContract(_))));
    }

    #[test]
    fn test_negative_weight_rejected_even_if_sum_is_one() {
        let mut cfg = LifecycleConfig::default();
        cfg.retirement.weights.age = -0.1;
        cfg.retirement.weights.unemployment = 0.65;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_and_partial_market() {
        let json = serde_json::to_string(&LifecycleConfig::stable()).unwrap();
        let back = LifecycleConfig::from_json_str(&json).unwrap();
        assert!((back.security.shortfall_scale - 1.2).abs() < 1e-6);

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value.as_object_mut().unwrap().remove("market");
        let partial = LifecycleConfig::from_json_str(&value.to_string()).unwrap();
        assert_eq!(partial.market.ai_candidates_per_opening, 3);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(matches!(
            LifecycleConfig::from_json_str("{not json"),
            Err(CareerError::InvalidConfig(_))
        ));
    }
}
