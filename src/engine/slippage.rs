// src/engine/slippage.rs
// ============================================================================
// Price-impact model: given a trade size, a venue, and a target asset,
// estimate a signed impact fraction plus a confidence label.
//
// The driver is the liquidity-impact ratio (trade size / estimated
// asset liquidity). Each venue class maps the ratio through its own
// piecewise curve:
//   - BatchAuction:    probabilistic price improvement, else mild linear
//   - StableSwap:      flat in-peg regime, then two steeper regimes
//   - Concentrated:    tight while in range, blows up past the range
//   - ConstantProduct: steepest growth of the four
//
// A bounded jitter simulates market noise; the caller injects the RNG
// so tests can pin a seed and assert exact outputs.

use rand::Rng;
use serde::Serialize;

use crate::catalog::{LiquidityProfile, Network, Venue};

/// Hard ceiling on the impact magnitude. Past this the trade is
/// assumed to fail rather than execute at that price.
pub const MAX_SLIPPAGE: f64 = 0.15;

/// Irreducible cost floor for non-improvement executions.
pub const MIN_SLIPPAGE: f64 = 0.0001;

/// Largest price improvement a batch auction can surface.
pub const MAX_IMPROVEMENT: f64 = 0.002;

/// Trade sizes below this are treated as this size when forming the
/// liquidity-impact ratio, so a zero-size probe cannot divide by zero.
pub const MIN_TRADE_SIZE: f64 = 1.0;

/// Odds that a batch auction settles at a better-than-quoted price.
const IMPROVEMENT_PROBABILITY: f64 = 0.7;

/// How confident the estimate is, by liquidity-impact-ratio bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy)]
pub struct SlippageEstimate {
    /// Signed fraction; negative means price improvement.
    pub impact: f64,
    pub confidence: Confidence,
    /// Estimated tradable liquidity for the asset, in EUR.
    pub liquidity: f64,
}

impl SlippageEstimate {
    pub fn has_improvement(&self) -> bool {
        self.impact < 0.0
    }
}

/// Base impact per venue id, reflecting its typical fee tier. Unknown
/// venues get a conservative 50 bp default.
pub fn base_impact(venue_id: &str) -> f64 {
    match venue_id {
        "uniswap-v3" | "uniswap-v3-base" | "uniswap-v3-polygon" => 0.0005,
        "curve" => 0.0003,
        "aerodrome" => 0.0004,
        "cowswap" => 0.0002,
        "1inch" => 0.0008,
        "quickswap" => 0.003,
        "honeyswap" => 0.004,
        _ => 0.005,
    }
}

/// Estimated total on-chain liquidity per asset, in EUR. Unknown
/// assets get a conservative 1M default.
pub fn liquidity_estimate(asset_symbol: &str) -> f64 {
    match asset_symbol {
        "EURC" => 50_000_000.0,
        "EURS" => 25_000_000.0,
        "EURT" => 15_000_000.0,
        "EURe" => 8_000_000.0,
        "EURA" => 12_000_000.0,
        _ => 1_000_000.0,
    }
}

/// Fixed penalty on impact for networks with thinner liquidity.
pub fn network_liquidity_multiplier(network: Network) -> f64 {
    match network {
        Network::Ethereum => 1.0,
        Network::Base => 1.1,
        Network::Polygon => 1.25,
        Network::Gnosis => 1.4,
    }
}

fn confidence_for_ratio(ratio: f64) -> Confidence {
    if ratio < 0.01 {
        Confidence::High
    } else if ratio < 0.1 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Raw (pre-jitter, pre-clamp) impact for a non-improvement execution.
fn curve_impact(class: LiquidityProfile, base: f64, ratio: f64) -> f64 {
    match class {
        LiquidityProfile::BatchAuction => base * (1.0 + ratio * 10.0),
        LiquidityProfile::StableSwap => {
            if ratio < 0.01 {
                base * (1.0 + ratio * 5.0)
            } else if ratio < 0.05 {
                base * (1.0 + ratio * 25.0)
            } else {
                base * (1.0 + ratio.powf(1.3) * 120.0)
            }
        }
        LiquidityProfile::Concentrated => {
            if ratio < 0.01 {
                base * (1.0 + ratio * 20.0)
            } else if ratio < 0.1 {
                base * (1.0 + ratio * 100.0)
            } else {
                base * (1.0 + ratio * 600.0)
            }
        }
        LiquidityProfile::ConstantProduct => {
            if ratio < 0.01 {
                base * (1.0 + ratio * 40.0)
            } else if ratio < 0.1 {
                base * (1.0 + ratio * 160.0)
            } else {
                base * (1.0 + ratio * 800.0)
            }
        }
    }
}

/// Estimate price impact for trading `trade_size` (source units) into
/// `asset_symbol` on `venue`.
pub fn estimate<R: Rng>(
    trade_size: f64,
    venue: &Venue,
    asset_symbol: &str,
    rng: &mut R,
) -> SlippageEstimate {
    let liquidity = liquidity_estimate(asset_symbol);
    let ratio = trade_size.max(MIN_TRADE_SIZE) / liquidity;
    let confidence = confidence_for_ratio(ratio);
    let base = base_impact(&venue.id);

    if venue.class == LiquidityProfile::BatchAuction {
        // Improvement branch draws first so seeded runs stay stable.
        let improvement_roll: f64 = rng.gen();
        if improvement_roll < IMPROVEMENT_PROBABILITY {
            let improvement = rng.gen::<f64>() * MAX_IMPROVEMENT;
            return SlippageEstimate {
                impact: -improvement.min(MAX_IMPROVEMENT),
                confidence,
                liquidity,
            };
        }
    }

    let mut impact = curve_impact(venue.class, base, ratio);
    impact *= network_liquidity_multiplier(venue.network);
    // ±20% market noise.
    impact *= 0.8 + rng.gen::<f64>() * 0.4;
    impact = impact.clamp(MIN_SLIPPAGE, MAX_SLIPPAGE);

    SlippageEstimate {
        impact,
        confidence,
        liquidity,
    }
}
