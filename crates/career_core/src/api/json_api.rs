//! JSON API for career operations
//!
//! String-in, string-out endpoints for a UI host. Every response is wrapped
//! in [`ApiResponse`]; failures carry a stable error code.

use super::query::{OpeningView, ProfileView};
use crate::career::Track;
use crate::error::CareerError;
use crate::market::{ApplicationStatus, MarketSummary, OfferStatus};
use crate::season::{LifecycleOrchestrator, SeasonInput, SeasonReport};
use crate::types::{ApplicationId, OfferId, OpeningId, ProfileId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info, warn};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

/// Structured API error with codes and details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: None }
    }

    pub fn with_detail(mut self, key: &str, value: serde_json::Value) -> Self {
        self.details.get_or_insert_with(HashMap::new).insert(key.to_string(), value);
        self
    }
}

impl From<CareerError> for ApiError {
    fn from(e: CareerError) -> Self {
        ApiError::new(e.code(), &e.to_string())
            .with_detail("recoverable", serde_json::Value::Bool(e.is_recoverable()))
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Profile lookup request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub profile_id: ProfileId,
}

/// Opening listing request. Without a track every open position is listed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpeningsRequest {
    #[serde(default)]
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRequest {
    pub profile_id: ProfileId,
    pub opening_id: OpeningId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub application_id: ApplicationId,
    pub status: ApplicationStatus,
    pub fit_score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferDecisionRequest {
    pub application_id: ApplicationId,
    pub accept: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsolicitedDecisionRequest {
    pub offer_id: OfferId,
    pub accept: bool,
}

/// Result of answering any offer: the new offer state and the refreshed card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub accepted: bool,
    pub profile: ProfileView,
}

fn respond<T: Serialize>(result: Result<T, ApiError>) -> String {
    let response = match result {
        Ok(data) => ApiResponse::success(data),
        Err(error) => ApiResponse::error(error),
    };
    serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
}

fn parse<T: for<'de> Deserialize<'de>>(request_json: &str, what: &str) -> Result<T, ApiError> {
    serde_json::from_str(request_json).map_err(|e| {
        error!("Failed to parse {}: {}", what, e);
        ApiError::new("INVALID_JSON", &format!("Invalid JSON format: {}", e))
    })
}

fn career_failure(op: &str, e: CareerError) -> ApiError {
    if e.is_recoverable() {
        warn!("{} rejected: {}", op, e);
    } else {
        error!("{} failed: {}", op, e);
    }
    ApiError::from(e)
}

/// Fetch one profile card.
///
/// # Returns
/// JSON string containing `ApiResponse<ProfileView>`
pub fn get_profile_json(orchestrator: &LifecycleOrchestrator, request_json: &str) -> String {
    info!("Processing profile request");
    let result = parse::<ProfileRequest>(request_json, "ProfileRequest").and_then(|req| {
        orchestrator.profile_view(req.profile_id).map_err(|e| career_failure("Profile lookup", e))
    });
    respond(result)
}

pub fn get_market_summary_json(orchestrator: &LifecycleOrchestrator) -> String {
    let summary: MarketSummary = orchestrator.market_summary();
    respond::<MarketSummary>(Ok(summary))
}

/// List open positions, optionally for one track, ordered by opening id.
pub fn list_openings_json(orchestrator: &LifecycleOrchestrator, request_json: &str) -> String {
    let result = parse::<OpeningsRequest>(request_json, "OpeningsRequest").map(|req| {
        orchestrator
            .market()
            .open_openings()
            .filter(|o| req.track.map_or(true, |t| o.role.track() == t))
            .map(OpeningView::from)
            .collect::<Vec<_>>()
    });
    respond(result)
}

pub fn submit_application_json(orchestrator: &mut LifecycleOrchestrator, request_json: &str) -> String {
    info!("Processing application request");
    let result = parse::<ApplicationRequest>(request_json, "ApplicationRequest").and_then(|req| {
        let id = orchestrator
            .submit_application(req.profile_id, req.opening_id)
            .map_err(|e| career_failure("Application", e))?;
        let app = orchestrator.market().application(id).map_err(|e| career_failure("Application", e))?;
        info!("Application {} filed for {} at {}", id, req.profile_id, req.opening_id);
        Ok(ApplicationResponse { application_id: id, status: app.status, fit_score: app.fit_score })
    });
    respond(result)
}

/// Accept or decline an offer made through the application pipeline.
pub fn respond_to_offer_json(orchestrator: &mut LifecycleOrchestrator, request_json: &str) -> String {
    info!("Processing offer decision");
    let result = parse::<OfferDecisionRequest>(request_json, "OfferDecisionRequest").and_then(|req| {
        let profile = orchestrator
            .market()
            .application(req.application_id)
            .map_err(|e| career_failure("Offer decision", e))?
            .profile;
        orchestrator
            .respond_to_offer(req.application_id, req.accept)
            .map_err(|e| career_failure("Offer decision", e))?;
        let view = orchestrator.profile_view(profile).map_err(|e| career_failure("Offer decision", e))?;
        Ok(DecisionResponse { accepted: req.accept, profile: view })
    });
    respond(result)
}

pub fn respond_to_unsolicited_offer_json(
    orchestrator: &mut LifecycleOrchestrator,
    request_json: &str,
) -> String {
    info!("Processing unsolicited offer decision");
    let result = parse::<UnsolicitedDecisionRequest>(request_json, "UnsolicitedDecisionRequest").and_then(|req| {
        let profile = orchestrator.market().offer(req.offer_id).map_err(|e| career_failure("Offer", e))?.profile;
        let status = orchestrator
            .respond_to_unsolicited_offer(req.offer_id, req.accept)
            .map_err(|e| career_failure("Offer", e))?;
        let view = orchestrator.profile_view(profile).map_err(|e| career_failure("Offer", e))?;
        Ok(DecisionResponse { accepted: status == OfferStatus::Accepted, profile: view })
    });
    respond(result)
}

/// Run one season from a JSON [`SeasonInput`].
///
/// # Returns
/// JSON string containing `ApiResponse<SeasonReport>`
pub fn run_season_json(orchestrator: &mut LifecycleOrchestrator, request_json: &str) -> String {
    info!("Processing season tick request");
    let result = parse::<SeasonInput>(request_json, "SeasonInput").and_then(|input| {
        orchestrator.run_season(&input).map_err(|e| career_failure("Season tick", e))
    });
    respond::<SeasonReport>(result)
}
