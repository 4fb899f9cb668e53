use serde::Serialize;

use crate::catalog::SOURCE_ASSET;

/// Networks a venue can settle on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Ethereum,
    Base,
    Polygon,
    Gnosis,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Ethereum => "ethereum",
            Network::Base => "base",
            Network::Polygon => "polygon",
            Network::Gnosis => "gnosis",
        }
    }

    pub fn parse(s: &str) -> Option<Network> {
        match s.to_ascii_lowercase().as_str() {
            "ethereum" => Some(Network::Ethereum),
            "base" => Some(Network::Base),
            "polygon" => Some(Network::Polygon),
            "gnosis" => Some(Network::Gnosis),
            _ => None,
        }
    }
}

/// Whether a venue executes directly against a pool or routes through
/// several underlying pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueKind {
    Direct,
    Router,
}

impl VenueKind {
    pub fn parse(s: &str) -> Option<VenueKind> {
        match s.to_ascii_lowercase().as_str() {
            "direct" => Some(VenueKind::Direct),
            "router" => Some(VenueKind::Router),
            _ => None,
        }
    }
}

/// Optional per-venue tags surfaced to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VenueFeature {
    BatchAuction,
    MevProtection,
    Incentivized,
    UltraLowFee,
}

/// Venue class driving the shape of the price-impact curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidityProfile {
    /// Intent/batch settlement: can execute better than quote.
    BatchAuction,
    /// Pools optimized for pegged pairs; flat until liquidity runs out.
    StableSwap,
    /// Concentrated in-range liquidity; blows up past the range.
    Concentrated,
    /// Naive xy=k; the steepest impact growth.
    ConstantProduct,
}

#[derive(Debug, Clone, Serialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub network: Network,
    pub kind: VenueKind,
    pub class: LiquidityProfile,
    /// Relative gas-cost multiplier against the network base cost.
    /// Exactly 0.0 means the venue is gas-free for the trader.
    pub gas_multiplier: f64,
    /// (source, target) symbol pairs this venue quotes.
    pub supported_pairs: Vec<(String, String)>,
    pub features: Vec<VenueFeature>,
}

impl Venue {
    pub fn supports(&self, source: &str, target: &str) -> bool {
        self.supported_pairs
            .iter()
            .any(|(s, t)| s == source && t == target)
    }
}

fn pairs(targets: &[&str]) -> Vec<(String, String)> {
    targets
        .iter()
        .map(|t| (SOURCE_ASSET.to_string(), t.to_string()))
        .collect()
}

/// Tradeable venues per network. Catalog order is the enumeration
/// order the ranker preserves for ties.
pub fn builtin_venues() -> Vec<Venue> {
    vec![
        // Ethereum
        Venue {
            id: "uniswap-v3".into(),
            name: "Uniswap V3".into(),
            network: Network::Ethereum,
            kind: VenueKind::Direct,
            class: LiquidityProfile::Concentrated,
            gas_multiplier: 1.0,
            supported_pairs: pairs(&["EURC", "EURS", "EURT", "EURe", "EURA"]),
            features: vec![],
        },
        Venue {
            id: "curve".into(),
            name: "Curve".into(),
            network: Network::Ethereum,
            kind: VenueKind::Direct,
            class: LiquidityProfile::StableSwap,
            gas_multiplier: 1.3,
            supported_pairs: pairs(&["EURS", "EURT", "EURe"]),
            features: vec![],
        },
        Venue {
            id: "cowswap".into(),
            name: "CoW Swap".into(),
            network: Network::Ethereum,
            kind: VenueKind::Direct,
            class: LiquidityProfile::BatchAuction,
            gas_multiplier: 0.0, // solver settles, trader pays no gas
            supported_pairs: pairs(&["EURC", "EURS", "EURT", "EURe"]),
            features: vec![VenueFeature::BatchAuction, VenueFeature::MevProtection],
        },
        Venue {
            id: "1inch".into(),
            name: "1inch".into(),
            network: Network::Ethereum,
            kind: VenueKind::Router,
            class: LiquidityProfile::ConstantProduct,
            gas_multiplier: 1.8,
            supported_pairs: pairs(&["EURC", "EURS", "EURT", "EURe", "EURA"]),
            features: vec![],
        },
        // Base
        Venue {
            id: "aerodrome".into(),
            name: "Aerodrome".into(),
            network: Network::Base,
            kind: VenueKind::Direct,
            class: LiquidityProfile::StableSwap,
            gas_multiplier: 0.8,
            supported_pairs: pairs(&["EURC"]),
            features: vec![VenueFeature::Incentivized],
        },
        Venue {
            id: "uniswap-v3-base".into(),
            name: "Uniswap V3 (Base)".into(),
            network: Network::Base,
            kind: VenueKind::Direct,
            class: LiquidityProfile::Concentrated,
            gas_multiplier: 0.7,
            supported_pairs: pairs(&["EURC"]),
            features: vec![],
        },
        // Polygon
        Venue {
            id: "uniswap-v3-polygon".into(),
            name: "Uniswap V3 (Polygon)".into(),
            network: Network::Polygon,
            kind: VenueKind::Direct,
            class: LiquidityProfile::Concentrated,
            gas_multiplier: 0.1,
            supported_pairs: pairs(&["EURS", "EURT"]),
            features: vec![],
        },
        Venue {
            id: "quickswap".into(),
            name: "QuickSwap".into(),
            network: Network::Polygon,
            kind: VenueKind::Direct,
            class: LiquidityProfile::ConstantProduct,
            gas_multiplier: 0.1,
            supported_pairs: pairs(&["EURS"]),
            features: vec![],
        },
        // Gnosis
        Venue {
            id: "honeyswap".into(),
            name: "Honeyswap".into(),
            network: Network::Gnosis,
            kind: VenueKind::Direct,
            class: LiquidityProfile::ConstantProduct,
            gas_multiplier: 0.05,
            supported_pairs: pairs(&["EURe"]),
            features: vec![VenueFeature::UltraLowFee],
        },
    ]
}
