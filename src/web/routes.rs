use std::sync::Arc;

use rocket::response::status::BadRequest;
use rocket::serde::json::Json;
use rocket::{get, State};

use crate::bootstrap::AppState;
use crate::catalog::{Network, VenueKind};
use crate::engine::ranker::Quote;
use crate::engine::service::compute_quotes;
use crate::web::dto::{ErrorResponse, QuoteDto, QuotesQuery, QuotesResponse};

/// Largest amount the boundary accepts; anything above is a typo, not
/// a trade.
const MAX_AMOUNT_USD: f64 = 1_000_000_000.0;

fn quote_dto(q: &Quote) -> QuoteDto {
    QuoteDto {
        asset: q.asset.clone(),
        asset_name: q.asset_name.clone(),
        venue_id: q.venue_id.clone(),
        venue_name: q.venue_name.clone(),
        network: q.network,
        venue_kind: q.venue_kind,
        features: q.features.clone(),
        input_amount_usd: q.input_amount,
        fx_rate: q.fx_rate,
        slippage: q.slippage,
        has_improvement: q.has_improvement,
        confidence: q.confidence,
        liquidity_estimate_eur: q.liquidity_estimate,
        network_fee_eur: q.network_fee_eur,
        offramp_provider: q.offramp_provider.clone(),
        offramp_fee_eur: q.offramp_fee_eur,
        total_cost_eur: q.total_cost_eur,
        final_eur: q.final_eur,
    }
}

#[get("/api/v1/quotes?<query..>")]
pub async fn ranked_quotes(
    query: QuotesQuery,
    app_state: &State<Arc<AppState>>,
) -> Result<Json<QuotesResponse>, BadRequest<Json<ErrorResponse>>> {
    let amount = query.amount.unwrap_or(1_000.0);
    if !amount.is_finite() || amount <= 0.0 || amount > MAX_AMOUNT_USD {
        return Err(BadRequest(Json(ErrorResponse {
            error: format!("amount must be a positive number up to {MAX_AMOUNT_USD}"),
        })));
    }

    let network_filter = match query.network.as_deref() {
        Some(s) if !s.eq_ignore_ascii_case("all") => match Network::parse(s) {
            Some(net) => Some(net),
            None => {
                return Err(BadRequest(Json(ErrorResponse {
                    error: format!("unknown network: {s}"),
                })))
            }
        },
        _ => None,
    };
    let kind_filter = match query.venue_kind.as_deref() {
        Some(s) if !s.eq_ignore_ascii_case("all") => match VenueKind::parse(s) {
            Some(kind) => Some(kind),
            None => {
                return Err(BadRequest(Json(ErrorResponse {
                    error: format!("unknown venue kind: {s}"),
                })))
            }
        },
        _ => None,
    };

    let analysis = compute_quotes(app_state, amount).await;

    // Post-ranking predicate filters; the relative order is untouched.
    let quotes: Vec<QuoteDto> = analysis
        .quotes
        .iter()
        .filter(|q| network_filter.map_or(true, |net| q.network == net))
        .filter(|q| kind_filter.map_or(true, |kind| q.venue_kind == kind))
        .map(quote_dto)
        .collect();

    Ok(Json(QuotesResponse {
        timestamp_utc: analysis.timestamp_utc,
        input_amount_usd: analysis.input_amount_usd,
        fx_rate: analysis.fx_rate,
        rate_source: analysis.rate_source,
        rate_as_of: analysis.rate_as_of,
        frictionless_eur: analysis.frictionless_eur,
        quotes,
    }))
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}

#[get("/metrics")]
pub fn metrics() -> &'static str {
    "# TYPE euroroute_uptime_seconds counter\n\
     euroroute_uptime_seconds 1\n\
     # TYPE euroroute_requests_total counter\n\
     euroroute_requests_total{endpoint=\"health\"} 1\n\
     # TYPE euroroute_info gauge\n\
     euroroute_info{version=\"0.1.0\",service=\"quotes\"} 1\n"
}
