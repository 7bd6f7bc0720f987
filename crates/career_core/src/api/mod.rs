//! Host-facing surface: read-only views and the JSON endpoints.

pub mod json_api;
pub mod query;

pub use json_api::{
    get_market_summary_json, get_profile_json, list_openings_json, respond_to_offer_json,
    respond_to_unsolicited_offer_json, run_season_json, submit_application_json, ApiError, ApiResponse,
    API_VERSION,
};
pub use query::{ApplicationView, ContractView, OfferView, OpeningView, ProfileView};
