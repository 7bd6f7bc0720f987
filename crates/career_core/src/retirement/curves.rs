//! Piecewise-linear sub-score curves, each mapping to 0..=100.

use rand::Rng;

/// (age, score) knots; flat at both ends.
const AGE_KNOTS: [(f32, f32); 6] =
    [(55.0, 0.0), (58.0, 10.0), (60.0, 25.0), (62.0, 45.0), (65.0, 80.0), (68.0, 100.0)];

pub const CHAMPIONSHIP_POINTS: f32 = 35.0;
pub const PLAYOFF_POINTS: f32 = 7.0;
pub const PLAYOFF_POINTS_CAP: f32 = 35.0;
pub const EMPLOYED_POINTS: f32 = 30.0;

const HEALTH_ONSET_AGE: f32 = 60.0;
const HEALTH_PER_YEAR: f32 = 3.0;
const HEALTH_DRAW_MAX: f32 = 15.0;

const TENURE_PER_YEAR: f32 = 2.0;

pub fn age_score(age: u8) -> f32 {
    let age = age as f32;
    let (first_age, first_score) = AGE_KNOTS[0];
    if age <= first_age {
        return first_score;
    }
    for pair in AGE_KNOTS.windows(2) {
        let (a0, s0) = pair[0];
        let (a1, s1) = pair[1];
        if age <= a1 {
            return (s0 + (age - a0) / (a1 - a0) * (s1 - s0)).clamp(0.0, 100.0);
        }
    }
    AGE_KNOTS[AGE_KNOTS.len() - 1].1
}

/// Linear from 0 at zero years to 100 at `force_years`.
pub fn unemployment_score(years: u8, force_years: u8) -> f32 {
    (years as f32 / force_years.max(1) as f32 * 100.0).clamp(0.0, 100.0)
}

/// Raw recent-success score. Higher means more successful; the caller
/// inverts it before weighting.
pub fn success_score(championship: bool, playoff_appearances: u8, employed: bool) -> f32 {
    let mut score = 0.0;
    if championship {
        score += CHAMPIONSHIP_POINTS;
    }
    score += (playoff_appearances as f32 * PLAYOFF_POINTS).min(PLAYOFF_POINTS_CAP);
    if employed {
        score += EMPLOYED_POINTS;
    }
    score.clamp(0.0, 100.0)
}

/// Random health pressure that rises with age.
pub fn health_score(age: u8, rng: &mut impl Rng) -> f32 {
    let age_part = (age as f32 - HEALTH_ONSET_AGE).max(0.0) * HEALTH_PER_YEAR;
    let draw = rng.gen_range(0.0..HEALTH_DRAW_MAX);
    (age_part + draw).clamp(0.0, 100.0)
}

pub fn tenure_score(total_years: u16) -> f32 {
    (total_years as f32 * TENURE_PER_YEAR).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_age_curve_knots_and_segments() {
        assert_eq!(age_score(40), 0.0);
        assert_eq!(age_score(55), 0.0);
        assert!((age_score(58) - 10.0).abs() < 1e-4);
        assert!((age_score(61) - 35.0).abs() < 1e-4);
        assert!((age_score(66) - 86.666_67).abs() < 1e-3);
        assert_eq!(age_score(68), 100.0);
        assert_eq!(age_score(80), 100.0);
    }

    #[test]
    fn test_age_curve_is_monotone() {
        let mut last = 0.0;
        for age in 40..90 {
            let s = age_score(age);
            assert!(s >= last, "age {} dropped", age);
            last = s;
        }
    }

    #[test]
    fn test_unemployment_linear_to_three() {
        assert_eq!(unemployment_score(0, 3), 0.0);
        assert!((unemployment_score(1, 3) - 33.333).abs() < 1e-2);
        assert_eq!(unemployment_score(3, 3), 100.0);
        assert_eq!(unemployment_score(9, 3), 100.0);
    }

    #[test]
    fn test_success_components() {
        assert_eq!(success_score(false, 0, false), 0.0);
        assert_eq!(success_score(false, 0, true), 30.0);
        assert_eq!(success_score(true, 3, true), 86.0);
        assert_eq!(success_score(true, 9, true), 100.0);
    }

    #[test]
    fn test_health_bias_by_age() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            let young = health_score(45, &mut rng);
            assert!((0.0..15.0).contains(&young));
            let old = health_score(66, &mut rng);
            assert!((18.0..33.0).contains(&old));
        }
    }
}
