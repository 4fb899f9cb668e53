use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub fx_api_url: String,
    pub price_api_url: Option<String>,
    pub port: u16,

    // HTTP + cache tuning
    pub fx_timeout_secs: u64,
    pub fx_cache_ttl_secs: u64,

    /// Pins the market-noise generator for reproducible runs; unset
    /// in production (entropy-seeded per refresh).
    pub rng_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv::dotenv().ok();

        Ok(Config {
            fx_api_url: env::var("FX_API_URL")
                .unwrap_or_else(|_| "https://api.exchangerate-api.com/v4/latest/USD".to_string()),
            price_api_url: env::var("PRICE_API_URL").ok(),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),

            fx_timeout_secs: env::var("FX_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".to_string()).parse().unwrap_or(5),
            fx_cache_ttl_secs: env::var("FX_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string()).parse().unwrap_or(3600),

            rng_seed: env::var("QUOTE_RNG_SEED").ok().and_then(|s| s.parse().ok()),
        })
    }
}
