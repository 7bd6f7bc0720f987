//! Retirement model parameters.

use crate::error::{CareerError, Result};
use serde::{Deserialize, Serialize};

const WEIGHT_SUM_TOLERANCE: f32 = 1e-4;

/// 은퇴 요인 가중치. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementWeights {
    /// (default: 0.30)
    pub age: f32,
    /// (default: 0.25)
    pub unemployment: f32,
    /// Applied to the inverted success score (default: 0.15)
    pub success: f32,
    /// (default: 0.15)
    pub health: f32,
    /// Combined coaching + front-office tenure (default: 0.15)
    pub tenure: f32,
}

impl Default for RetirementWeights {
    fn default() -> Self {
        Self { age: 0.30, unemployment: 0.25, success: 0.15, health: 0.15, tenure: 0.15 }
    }
}

impl RetirementWeights {
    pub fn sum(&self) -> f32 {
        self.age + self.unemployment + self.success + self.health + self.tenure
    }

    pub fn validate(&self) -> Result<()> {
        let all = [self.age, self.unemployment, self.success, self.health, self.tenure];
        if all.iter().any(|w| !(0.0..=1.0).contains(w) || w.is_nan()) {
            return Err(CareerError::MalformedContract(format!(
                "retirement weights must each lie in 0..=1: {:?}",
                self
            )));
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(CareerError::MalformedContract(format!(
                "retirement weights sum to {:.4}, expected 1.0",
                sum
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementConfig {
    pub weights: RetirementWeights,
    /// Age from which the model is run for employed people (default: 55)
    pub min_evaluation_age: u8,
    /// Years unemployed that force retirement (default: 3)
    pub force_unemployment_years: u8,
}

impl Default for RetirementConfig {
    fn default() -> Self {
        Self { weights: RetirementWeights::default(), min_evaluation_age: 55, force_unemployment_years: 3 }
    }
}

impl RetirementConfig {
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if self.force_unemployment_years == 0 {
            return Err(CareerError::InvalidConfig("force_unemployment_years must be > 0".into()));
        }
        Ok(())
    }
}
