pub mod assets;
pub mod offramps;
pub mod venues;

pub use assets::{builtin_assets, Asset};
pub use offramps::{builtin_offramps, FeeKind, OffRampProvider};
pub use venues::{builtin_venues, LiquidityProfile, Network, Venue, VenueFeature, VenueKind};

/// The source asset every supported pair converts out of.
pub const SOURCE_ASSET: &str = "USDC";
