use crate::career::Role;
use crate::market::ApplicationStatus;
use crate::types::{ApplicationId, OfferId, OpeningId, ProfileId, Year};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CareerError {
    #[error("Invalid transition from {from:?} to {to:?}: {reason}")]
    InvalidTransition { from: Role, to: Role, reason: String },

    #[error("Unknown profile: {0}")]
    UnknownProfile(ProfileId),

    #[error("Unknown opening: {0}")]
    UnknownOpening(OpeningId),

    #[error("Unknown application: {0}")]
    UnknownApplication(ApplicationId),

    #[error("Unknown offer: {0}")]
    UnknownOffer(OfferId),

    #[error("Opening {0} is no longer open")]
    OpeningClosed(OpeningId),

    #[error("Offer {0} is no longer open")]
    OfferExpired(OfferId),

    #[error("Application {id} cannot move from {from:?} to {to:?}")]
    InvalidApplicationState { id: ApplicationId, from: ApplicationStatus, to: ApplicationStatus },

    #[error("Duplicate application: {profile} already applied to {opening}")]
    DuplicateApplication { profile: ProfileId, opening: OpeningId },

    #[error("Malformed contract: {0}")]
    MalformedContract(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Season {year} already processed, next is {next}")]
    StaleSeason { year: Year, next: Year },
}

impl CareerError {
    pub(crate) fn transition(from: Role, to: Role, reason: impl Into<String>) -> Self {
        CareerError::InvalidTransition { from, to, reason: reason.into() }
    }

    /// Recoverable errors are skipped per profile; the rest abort the tick
    /// before it starts.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CareerError::InvalidTransition { .. } => true,
            CareerError::UnknownProfile(_) => true,
            CareerError::UnknownOpening(_) => true,
            CareerError::UnknownApplication(_) => true,
            CareerError::UnknownOffer(_) => true,
            CareerError::OpeningClosed(_) => true,
            CareerError::OfferExpired(_) => true,
            CareerError::InvalidApplicationState { .. } => true,
            CareerError::DuplicateApplication { .. } => true,
            CareerError::MalformedContract(_) => false,
            CareerError::InvalidConfig(_) => false,
            CareerError::StaleSeason { .. } => false,
        }
    }

    /// Stable machine-readable code for the JSON API.
    pub fn code(&self) -> &'static str {
        match self {
            CareerError::InvalidTransition { .. } => "INVALID_TRANSITION",
            CareerError::UnknownProfile(_) => "UNKNOWN_PROFILE",
            CareerError::UnknownOpening(_) => "UNKNOWN_OPENING",
            CareerError::UnknownApplication(_) => "UNKNOWN_APPLICATION",
            CareerError::UnknownOffer(_) => "UNKNOWN_OFFER",
            CareerError::OpeningClosed(_) => "OPENING_CLOSED",
            CareerError::OfferExpired(_) => "OFFER_EXPIRED",
            CareerError::InvalidApplicationState { .. } => "INVALID_APPLICATION_STATE",
            CareerError::DuplicateApplication { .. } => "DUPLICATE_APPLICATION",
            CareerError::MalformedContract(_) => "MALFORMED_CONTRACT",
            CareerError::InvalidConfig(_) => "INVALID_CONFIG",
            CareerError::StaleSeason { .. } => "STALE_SEASON",
        }
    }
}

pub type Result<T> = std::result::Result<T, CareerError>;
