use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bootstrap::AppState;
use crate::engine::ranker::{self, AssetRates, Quote};
use crate::rates::RateSource;

/// Full result of one refresh: the ranked quote set plus the rate
/// context it was computed under.
pub struct QuoteAnalysis {
    pub timestamp_utc: String,
    pub input_amount_usd: f64,
    pub fx_rate: f64,
    pub rate_source: RateSource,
    pub rate_as_of: String,
    pub frictionless_eur: f64,
    pub quotes: Vec<Quote>,
}

/// Compute ranked quotes for `amount` USD-pegged units. Never fails:
/// every upstream lookup has a degraded fallback. The caller is
/// expected to have validated `amount > 0` at the boundary.
pub async fn compute_quotes(state: &AppState, amount: f64) -> QuoteAnalysis {
    let refresh_start = Instant::now();

    let cached = state.cached_rate();
    let symbols: Vec<String> = state.assets.iter().map(|a| a.symbol.clone()).collect();

    // Both lookups degrade independently, so fetch them concurrently.
    let (snapshot, prices) = futures::join!(
        state.fx_client.usd_to_eur(cached.as_ref()),
        async {
            match &state.price_client {
                Some(price_client) => price_client.usd_prices(&symbols).await,
                None => None,
            }
        }
    );
    log::debug!(
        "FX rate {:.4} ({:?}) resolved in {:?}",
        snapshot.rate,
        snapshot.source,
        refresh_start.elapsed()
    );

    let mut rates = AssetRates::uniform(snapshot.rate);
    if let Some(prices) = prices {
        // A euro token priced at p USD converts 1 USD into 1/p
        // tokens, i.e. roughly 1/p EUR.
        for (symbol, price_usd) in prices {
            rates.overrides.insert(symbol, 1.0 / price_usd);
        }
        log::debug!("Per-asset rate overrides: {}", rates.overrides.len());
    }

    let mut rng = match state.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let ranked = ranker::rank(
        amount,
        &rates,
        &state.assets,
        &state.venues,
        &state.offramps,
        &mut rng,
    );

    // Newer-wins cache update; a concurrent refresh that resolved a
    // fresher rate is never clobbered by this one.
    state.store_rate(&snapshot);

    log::info!(
        "Ranked {} quotes for {:.2} USD in {:?}",
        ranked.quotes.len(),
        amount,
        refresh_start.elapsed()
    );

    QuoteAnalysis {
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        input_amount_usd: amount,
        fx_rate: snapshot.rate,
        rate_source: snapshot.source,
        rate_as_of: snapshot.as_of.to_rfc3339(),
        frictionless_eur: ranked.frictionless_eur,
        quotes: ranked.quotes,
    }
}
