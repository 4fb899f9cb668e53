use std::collections::HashMap;

use anyhow::{Context, Result};
use reqwest::Client;

/// Optional per-asset USD price lookup. When configured, the service
/// uses `1 / price_usd(asset)` as that asset's conversion rate instead
/// of the uniform fiat rate. Failure is non-fatal: callers fall back
/// to the uniform rate.
pub struct PriceClient {
    client: Client,
    api_url: String,
}

impl PriceClient {
    pub fn new(api_url: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build price HTTP client")?;

        Ok(Self { client, api_url })
    }

    /// USD prices keyed by asset symbol. Returns `None` on any
    /// failure; partial payloads are fine (missing symbols just keep
    /// the uniform rate).
    pub async fn usd_prices(&self, symbols: &[String]) -> Option<HashMap<String, f64>> {
        match self.fetch(symbols).await {
            Ok(prices) => Some(prices),
            Err(e) => {
                log::warn!("Per-asset price fetch failed, using uniform rate: {e:#}");
                None
            }
        }
    }

    async fn fetch(&self, symbols: &[String]) -> Result<HashMap<String, f64>> {
        let url = format!("{}?symbols={}", self.api_url, symbols.join(","));

        let payload: HashMap<String, f64> = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch asset prices")?
            .error_for_status()
            .context("Price API returned an error status")?
            .json()
            .await
            .context("Failed to parse price response")?;

        // Drop junk entries rather than letting them poison the rate.
        Ok(payload
            .into_iter()
            .filter(|(_, p)| p.is_finite() && *p > 0.0)
            .collect())
    }
}
