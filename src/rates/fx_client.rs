use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;

/// Rate used whenever the live lookup fails and no usable snapshot is
/// cached. Documented constant per the engine contract: the pipeline
/// must always have *some* USD->EUR rate.
pub const FALLBACK_USD_EUR: f64 = 0.92;

#[derive(Debug, Deserialize)]
struct ExchangeRateResponse {
    rates: std::collections::HashMap<String, f64>,
}

/// Where the rate in a snapshot came from. Surfaced to callers so the
/// presentation layer can show an informational notice on degraded
/// precision; never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Live,
    Cached,
    Fallback,
}

/// Explicit cache value object: passed into `usd_to_eur` and handed
/// back out, instead of hiding the last-good rate in a global.
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    pub rate: f64,
    pub as_of: DateTime<Utc>,
    pub source: RateSource,
}

impl RateSnapshot {
    pub fn is_fresh(&self, ttl_secs: u64, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.as_of) < Duration::seconds(ttl_secs as i64)
    }
}

pub struct FxClient {
    client: Client,
    api_url: String,
    cache_ttl_secs: u64,
}

impl FxClient {
    pub fn new(api_url: String, timeout_secs: u64, cache_ttl_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build FX HTTP client")?;

        Ok(Self {
            client,
            api_url,
            cache_ttl_secs,
        })
    }

    /// Current USD->EUR rate. Infallible by contract: a fresh cached
    /// snapshot short-circuits the network round-trip; a failed fetch
    /// degrades to the stale snapshot, then to `FALLBACK_USD_EUR`.
    pub async fn usd_to_eur(&self, cached: Option<&RateSnapshot>) -> RateSnapshot {
        let now = Utc::now();

        if let Some(snap) = cached {
            if snap.is_fresh(self.cache_ttl_secs, now) {
                return RateSnapshot {
                    rate: snap.rate,
                    as_of: snap.as_of,
                    source: RateSource::Cached,
                };
            }
        }

        match self.fetch_eur_rate().await {
            Ok(rate) => RateSnapshot {
                rate,
                as_of: now,
                source: RateSource::Live,
            },
            Err(e) => {
                log::warn!("FX rate fetch failed, degrading: {e:#}");
                match cached {
                    Some(snap) => RateSnapshot {
                        rate: snap.rate,
                        as_of: snap.as_of,
                        source: RateSource::Cached,
                    },
                    None => RateSnapshot {
                        rate: FALLBACK_USD_EUR,
                        as_of: now,
                        source: RateSource::Fallback,
                    },
                }
            }
        }
    }

    async fn fetch_eur_rate(&self) -> Result<f64> {
        let response: ExchangeRateResponse = self
            .client
            .get(&self.api_url)
            .send()
            .await
            .context("Failed to fetch from exchange-rate API")?
            .error_for_status()
            .context("Exchange-rate API returned an error status")?
            .json()
            .await
            .context("Failed to parse exchange-rate response")?;

        let rate = *response
            .rates
            .get("EUR")
            .context("EUR rate not found in response")?;

        if !rate.is_finite() || rate <= 0.0 {
            anyhow::bail!("EUR rate out of range: {rate}");
        }
        Ok(rate)
    }
}
