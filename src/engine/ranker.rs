// src/engine/ranker.rs
// ============================================================================
// Assembles the full cross-product of assets x venues into ranked
// quotes. For each supported (asset, venue) pair it runs the slippage
// model, the cost composer, and the off-ramp selector, then sorts:
//   1. price-improvement quotes before everything else,
//   2. within each group, descending final EUR.
// The sort is stable, so ties keep catalog enumeration order. Quotes
// whose final amount is not positive are dropped: impossible trades
// are not shown.

use std::collections::HashMap;

use rand::Rng;
use serde::Serialize;

use crate::catalog::{Asset, Network, OffRampProvider, Venue, VenueFeature, VenueKind, SOURCE_ASSET};
use crate::engine::slippage::{self, Confidence};
use crate::engine::{compose, offramp};

/// Conversion rates for a run: the uniform fiat rate plus optional
/// per-asset refinements from the price source.
#[derive(Debug, Clone)]
pub struct AssetRates {
    pub base: f64,
    pub overrides: HashMap<String, f64>,
}

impl AssetRates {
    pub fn uniform(base: f64) -> Self {
        Self {
            base,
            overrides: HashMap::new(),
        }
    }

    pub fn rate_for(&self, symbol: &str) -> f64 {
        self.overrides.get(symbol).copied().unwrap_or(self.base)
    }
}

/// One evaluated (asset, venue) execution path. Presentation-free:
/// display hints derive from these fields in the UI layer.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub asset: String,
    pub asset_name: String,
    pub venue_id: String,
    pub venue_name: String,
    pub network: Network,
    pub venue_kind: VenueKind,
    pub features: Vec<VenueFeature>,

    pub input_amount: f64,
    pub fx_rate: f64,

    /// Signed fraction; negative is a price improvement.
    pub slippage: f64,
    pub has_improvement: bool,
    pub confidence: Confidence,
    pub liquidity_estimate: f64,

    pub network_fee_eur: f64,
    pub offramp_provider: String,
    pub offramp_fee_eur: f64,
    pub total_cost_eur: f64,

    pub final_eur: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedQuotes {
    pub quotes: Vec<Quote>,
    /// `amount * base rate`: the frictionless figure the UI compares
    /// every quote against.
    pub frictionless_eur: f64,
    pub fx_rate: f64,
}

/// Evaluate and rank every supported (asset, venue) pair for `amount`
/// source units. Pure given (inputs, catalogs, rng).
pub fn rank<R: Rng>(
    amount: f64,
    rates: &AssetRates,
    assets: &[Asset],
    venues: &[Venue],
    offramps: &[OffRampProvider],
    rng: &mut R,
) -> RankedQuotes {
    let mut quotes = Vec::new();

    for asset in assets {
        for venue in venues {
            if !venue.supports(SOURCE_ASSET, &asset.symbol) {
                continue;
            }

            let rate = rates.rate_for(&asset.symbol);
            let est = slippage::estimate(amount, venue, &asset.symbol, rng);
            let comp = compose::compose(amount, rate, venue, &est, rng);

            if comp.net_eur <= 0.0 {
                log::debug!(
                    "Dropping {}/{}: net {:.4} EUR not executable",
                    asset.symbol,
                    venue.id,
                    comp.net_eur
                );
                continue;
            }

            let choice = offramp::select_best(offramps, &asset.symbol, comp.net_eur);
            if choice.final_eur <= 0.0 {
                continue;
            }

            quotes.push(Quote {
                asset: asset.symbol.clone(),
                asset_name: asset.name.clone(),
                venue_id: venue.id.clone(),
                venue_name: venue.name.clone(),
                network: venue.network,
                venue_kind: venue.kind,
                features: venue.features.clone(),
                input_amount: amount,
                fx_rate: rate,
                slippage: est.impact,
                has_improvement: est.has_improvement(),
                confidence: est.confidence,
                liquidity_estimate: est.liquidity,
                network_fee_eur: comp.network_fee_eur,
                offramp_provider: choice.provider,
                offramp_fee_eur: choice.fee_eur,
                total_cost_eur: comp.network_fee_eur + choice.fee_eur,
                final_eur: choice.final_eur,
            });
        }
    }

    // Stable two-tier comparator: improvements first, then best final
    // amount. Vec::sort_by is stable, preserving enumeration order on
    // exact ties.
    quotes.sort_by(|a, b| {
        b.has_improvement
            .cmp(&a.has_improvement)
            .then_with(|| b.final_eur.total_cmp(&a.final_eur))
    });

    RankedQuotes {
        quotes,
        frictionless_eur: amount * rates.base,
        fx_rate: rates.base,
    }
}
