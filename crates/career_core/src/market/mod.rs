//! Job market: openings, the application pipeline and unsolicited offers.

pub mod candidates;
pub mod fit;
pub mod manager;
pub mod types;

pub use fit::{fit_score, profile_fit, CandidateFacts};
pub use manager::{AutoApplyOutcome, JobMarket, JobMarketState, VacancyOutcome};
pub use types::{
    AiCandidate, ApplicationStatus, FilledBy, JobApplication, JobOpening, JobRequirements, MarketSummary,
    OfferStatus, OfferedTerms, OpeningStatus, UnsolicitedOffer,
};
