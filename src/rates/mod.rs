pub mod fx_client;
pub mod price_client;

pub use fx_client::{FxClient, RateSnapshot, RateSource, FALLBACK_USD_EUR};
pub use price_client::PriceClient;
