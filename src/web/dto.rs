use rocket::serde::{Deserialize, Serialize};

use crate::catalog::{Network, VenueFeature, VenueKind};
use crate::engine::slippage::Confidence;
use crate::rates::RateSource;

#[derive(Deserialize, rocket::FromForm)]
pub struct QuotesQuery {
    pub amount: Option<f64>,
    /// Predicate filter on the ranked list; never changes the ranking.
    pub network: Option<String>,
    pub venue_kind: Option<String>,
}

#[derive(Serialize)]
pub struct QuoteDto {
    pub asset: String,
    pub asset_name: String,
    pub venue_id: String,
    pub venue_name: String,
    pub network: Network,
    pub venue_kind: VenueKind,
    pub features: Vec<VenueFeature>,

    pub input_amount_usd: f64,
    pub fx_rate: f64,

    pub slippage: f64,
    pub has_improvement: bool,
    pub confidence: Confidence,
    pub liquidity_estimate_eur: f64,

    pub network_fee_eur: f64,
    pub offramp_provider: String,
    pub offramp_fee_eur: f64,
    pub total_cost_eur: f64,

    pub final_eur: f64,
}

#[derive(Serialize)]
pub struct QuotesResponse {
    pub timestamp_utc: String,
    pub input_amount_usd: f64,
    pub fx_rate: f64,
    pub rate_source: RateSource,
    pub rate_as_of: String,
    /// `amount * rate` with zero friction, for comparison.
    pub frictionless_eur: f64,
    pub quotes: Vec<QuoteDto>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
