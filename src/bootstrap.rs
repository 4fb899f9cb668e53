use std::sync::RwLock;

use thiserror::Error;

use crate::catalog::{
    assets::builtin_assets, offramps::builtin_offramps, venues::builtin_venues, Asset,
    OffRampProvider, Venue,
};
use crate::config::Config;
use crate::rates::{FxClient, PriceClient, RateSnapshot, RateSource};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("venue {0} has an invalid gas multiplier: {1}")]
    InvalidGasMultiplier(String, f64),
    #[error("venue {0} lists unknown asset {1}")]
    UnknownPairAsset(String, String),
    #[error("off-ramp {0} has an invalid fee: {1}")]
    InvalidFee(String, f64),
    #[error("off-ramp {0} has an effective rate out of range: {1}")]
    InvalidEffectiveRate(String, f64),
    #[error("no universal off-ramp provider configured")]
    NoUniversalOffRamp,
}

pub struct AppState {
    pub assets: Vec<Asset>,
    pub venues: Vec<Venue>,
    pub offramps: Vec<OffRampProvider>,

    pub fx_client: FxClient,
    pub price_client: Option<PriceClient>,
    pub rng_seed: Option<u64>,

    rate_cache: RwLock<Option<RateSnapshot>>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let assets = builtin_assets();
        let venues = builtin_venues();
        let offramps = builtin_offramps();
        validate_catalogs(&assets, &venues, &offramps)?;

        let fx_client = FxClient::new(
            config.fx_api_url.clone(),
            config.fx_timeout_secs,
            config.fx_cache_ttl_secs,
        )?;

        let price_client = config
            .price_api_url
            .as_ref()
            .map(|url| PriceClient::new(url.clone(), config.fx_timeout_secs))
            .transpose()?;

        Ok(AppState {
            assets,
            venues,
            offramps,
            fx_client,
            price_client,
            rng_seed: config.rng_seed,
            rate_cache: RwLock::new(None),
        })
    }

    pub fn cached_rate(&self) -> Option<RateSnapshot> {
        self.rate_cache.read().ok().and_then(|guard| guard.clone())
    }

    /// Cache a live snapshot, last-writer-wins by `as_of`: a refresh
    /// that resolved an older rate never clobbers a newer one, and
    /// fallback values are never cached (they would suppress retries
    /// for a full TTL window).
    pub fn store_rate(&self, snapshot: &RateSnapshot) {
        if snapshot.source != RateSource::Live {
            return;
        }
        if let Ok(mut guard) = self.rate_cache.write() {
            let newer = match guard.as_ref() {
                Some(current) => snapshot.as_of > current.as_of,
                None => true,
            };
            if newer {
                *guard = Some(snapshot.clone());
            }
        }
    }
}

fn validate_catalogs(
    assets: &[Asset],
    venues: &[Venue],
    offramps: &[OffRampProvider],
) -> Result<(), CatalogError> {
    for venue in venues {
        if !venue.gas_multiplier.is_finite() || venue.gas_multiplier < 0.0 {
            return Err(CatalogError::InvalidGasMultiplier(
                venue.id.clone(),
                venue.gas_multiplier,
            ));
        }
        for (_, target) in &venue.supported_pairs {
            if !assets.iter().any(|a| &a.symbol == target) {
                return Err(CatalogError::UnknownPairAsset(
                    venue.id.clone(),
                    target.clone(),
                ));
            }
        }
    }

    for provider in offramps {
        if !provider.fee.is_finite() || provider.fee < 0.0 {
            return Err(CatalogError::InvalidFee(provider.name.clone(), provider.fee));
        }
        if !provider.effective_rate.is_finite()
            || provider.effective_rate <= 0.0
            || provider.effective_rate > 1.5
        {
            return Err(CatalogError::InvalidEffectiveRate(
                provider.name.clone(),
                provider.effective_rate,
            ));
        }
    }

    if !offramps.iter().any(|p| p.is_universal()) {
        return Err(CatalogError::NoUniversalOffRamp);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FeeKind, LiquidityProfile, Network, VenueKind};
    use chrono::{Duration, Utc};

    fn test_config() -> Config {
        Config {
            fx_api_url: "http://127.0.0.1:1/latest/USD".to_string(),
            price_api_url: None,
            port: 8000,
            fx_timeout_secs: 1,
            fx_cache_ttl_secs: 3600,
            rng_seed: Some(1),
        }
    }

    #[test]
    fn test_builtin_catalogs_validate() {
        let state = AppState::new(&test_config()).expect("builtin catalogs must validate");
        assert_eq!(state.assets.len(), 5);
        assert!(state.cached_rate().is_none());
    }

    #[test]
    fn test_negative_gas_multiplier_rejected() {
        let venue = Venue {
            id: "bad".into(),
            name: "Bad".into(),
            network: Network::Ethereum,
            kind: VenueKind::Direct,
            class: LiquidityProfile::Concentrated,
            gas_multiplier: -1.0,
            supported_pairs: vec![],
            features: vec![],
        };

        let err = validate_catalogs(&builtin_assets(), &[venue], &builtin_offramps());
        assert!(matches!(err, Err(CatalogError::InvalidGasMultiplier(_, _))));
    }

    #[test]
    fn test_unknown_pair_asset_rejected() {
        let venue = Venue {
            id: "bad".into(),
            name: "Bad".into(),
            network: Network::Ethereum,
            kind: VenueKind::Direct,
            class: LiquidityProfile::Concentrated,
            gas_multiplier: 1.0,
            supported_pairs: vec![("USDC".into(), "EURX".into())],
            features: vec![],
        };

        let err = validate_catalogs(&builtin_assets(), &[venue], &builtin_offramps());
        assert!(matches!(err, Err(CatalogError::UnknownPairAsset(_, _))));
    }

    #[test]
    fn test_missing_universal_offramp_rejected() {
        let only_listed = vec![OffRampProvider {
            name: "Listed".into(),
            fee: 1.0,
            fee_kind: FeeKind::Flat,
            effective_rate: 0.99,
            supported_assets: vec!["EURC".into()],
        }];

        let err = validate_catalogs(&builtin_assets(), &builtin_venues(), &only_listed);
        assert!(matches!(err, Err(CatalogError::NoUniversalOffRamp)));
    }

    #[test]
    fn test_store_rate_newer_wins() {
        let state = AppState::new(&test_config()).expect("Failed to build state");

        let older = RateSnapshot {
            rate: 0.90,
            as_of: Utc::now() - Duration::seconds(60),
            source: RateSource::Live,
        };
        let newer = RateSnapshot {
            rate: 0.93,
            as_of: Utc::now(),
            source: RateSource::Live,
        };

        state.store_rate(&newer);
        state.store_rate(&older); // stale in-flight result, discarded
        let cached = state.cached_rate().expect("snapshot missing");
        assert_eq!(cached.rate, 0.93);
    }

    #[test]
    fn test_store_rate_ignores_fallback() {
        let state = AppState::new(&test_config()).expect("Failed to build state");
        let fallback = RateSnapshot {
            rate: crate::rates::FALLBACK_USD_EUR,
            as_of: Utc::now(),
            source: RateSource::Fallback,
        };

        state.store_rate(&fallback);
        assert!(state.cached_rate().is_none());
    }
}
