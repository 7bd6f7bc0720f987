use super::role::Track;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Sideline skills, 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoachingSkills {
    pub play_calling: u8,
    pub player_development: u8,
    pub game_management: u8,
    pub motivation: u8,
    pub discipline: u8,
}

/// Front-office skills, 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrontOfficeSkills {
    pub talent_evaluation: u8,
    pub negotiation: u8,
    pub cap_management: u8,
    pub drafting: u8,
    pub leadership: u8,
}

impl Default for CoachingSkills {
    fn default() -> Self {
        Self {
            play_calling: 50,
            player_development: 50,
            game_management: 50,
            motivation: 50,
            discipline: 50,
        }
    }
}

impl Default for FrontOfficeSkills {
    fn default() -> Self {
        Self { talent_evaluation: 50, negotiation: 50, cap_management: 50, drafting: 50, leadership: 50 }
    }
}

impl CoachingSkills {
    pub fn average(&self) -> f32 {
        let sum = self.play_calling as u32
            + self.player_development as u32
            + self.game_management as u32
            + self.motivation as u32
            + self.discipline as u32;
        sum as f32 / 5.0
    }

    pub fn random(rng: &mut impl Rng, center: u8) -> Self {
        Self {
            play_calling: jitter(rng, center),
            player_development: jitter(rng, center),
            game_management: jitter(rng, center),
            motivation: jitter(rng, center),
            discipline: jitter(rng, center),
        }
    }
}

impl FrontOfficeSkills {
    pub fn average(&self) -> f32 {
        let sum = self.talent_evaluation as u32
            + self.negotiation as u32
            + self.cap_management as u32
            + self.drafting as u32
            + self.leadership as u32;
        sum as f32 / 5.0
    }

    pub fn random(rng: &mut impl Rng, center: u8) -> Self {
        Self {
            talent_evaluation: jitter(rng, center),
            negotiation: jitter(rng, center),
            cap_management: jitter(rng, center),
            drafting: jitter(rng, center),
            leadership: jitter(rng, center),
        }
    }
}

fn jitter(rng: &mut impl Rng, center: u8) -> u8 {
    let delta: i16 = rng.gen_range(-12..=12);
    (center as i16 + delta).clamp(0, 100) as u8
}

/// Both skill sets travel with the person; the active track decides which
/// one is read.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SkillSet {
    pub coaching: CoachingSkills,
    pub front_office: FrontOfficeSkills,
}

impl SkillSet {
    /// Average rating for a track; non-employment tracks rate zero.
    pub fn rating_for(&self, track: Track) -> f32 {
        match track {
            Track::Coaching => self.coaching.average(),
            Track::FrontOffice => self.front_office.average(),
            Track::Unemployed | Track::Retired => 0.0,
        }
    }
}

/// 지도 스타일
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoachingStyle {
    Tactician,
    Motivator,
    Developer,
    Disciplinarian,
    PlayersCoach,
}

impl CoachingStyle {
    pub fn all() -> &'static [CoachingStyle] {
        &[
            CoachingStyle::Tactician,
            CoachingStyle::Motivator,
            CoachingStyle::Developer,
            CoachingStyle::Disciplinarian,
            CoachingStyle::PlayersCoach,
        ]
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        let all = Self::all();
        all[rng.gen_range(0..all.len())]
    }
}

/// Primary style plus an optional secondary one. A secondary equal to the
/// primary is folded away so "no secondary style" has exactly one encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleProfile {
    pub primary: CoachingStyle,
    pub secondary: Option<CoachingStyle>,
}

impl StyleProfile {
    pub fn new(primary: CoachingStyle, secondary: Option<CoachingStyle>) -> Self {
        Self { primary, secondary: secondary.filter(|s| *s != primary) }
    }

    /// Random primary, secondary half of the time.
    pub fn random(rng: &mut impl Rng) -> Self {
        let primary = CoachingStyle::random(rng);
        let secondary = if rng.gen_bool(0.5) { Some(CoachingStyle::random(rng)) } else { None };
        Self::new(primary, secondary)
    }

    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }

    pub fn includes(&self, style: CoachingStyle) -> bool {
        self.primary == style || self.secondary == Some(style)
    }
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self::new(CoachingStyle::Tactician, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rating_follows_track() {
        let skills = SkillSet {
            coaching: CoachingSkills { play_calling: 80, ..CoachingSkills::default() },
            front_office: FrontOfficeSkills::default(),
        };
        assert!((skills.rating_for(Track::Coaching) - 56.0).abs() < 1e-4);
        assert!((skills.rating_for(Track::FrontOffice) - 50.0).abs() < 1e-4);
        assert_eq!(skills.rating_for(Track::Retired), 0.0);
    }

    #[test]
    fn test_secondary_style_is_optional_and_distinct() {
        let none = StyleProfile::new(CoachingStyle::Motivator, None);
        assert!(!none.has_secondary());

        let folded = StyleProfile::new(CoachingStyle::Motivator, Some(CoachingStyle::Motivator));
        assert_eq!(folded, none);

        let both = StyleProfile::new(CoachingStyle::Motivator, Some(CoachingStyle::Developer));
        assert!(both.includes(CoachingStyle::Developer));
        assert!(!both.includes(CoachingStyle::Tactician));
    }

    #[test]
    fn test_random_skills_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let s = CoachingSkills::random(&mut rng, 95);
            assert!(s.play_calling <= 100);
            let f = FrontOfficeSkills::random(&mut rng, 3);
            assert!(f.drafting <= 100);
        }
    }
}
