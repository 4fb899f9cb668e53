// src/engine/gas.rs
//
// Network fee model. No RPC: a per-network base cost (USD) scaled by
// the venue's gas multiplier plus bounded jitter. Venues with a zero
// multiplier are gas-free for the trader (a solver settles), so their
// fee is exactly 0.0, not merely small.

use rand::Rng;

use crate::catalog::{Network, Venue};

/// Typical swap cost in USD per network. Unknown networks would get
/// the Ethereum figure; the enum keeps that path unreachable today.
pub fn network_base_cost_usd(network: Network) -> f64 {
    match network {
        Network::Ethereum => 15.0,
        Network::Base => 2.0,
        Network::Polygon => 0.5,
        Network::Gnosis => 0.1,
    }
}

/// Estimated network fee for one swap on `venue`, in USD.
pub fn network_fee_usd<R: Rng>(venue: &Venue, rng: &mut R) -> f64 {
    if venue.gas_multiplier == 0.0 {
        return 0.0;
    }

    let base = network_base_cost_usd(venue.network);
    base * venue.gas_multiplier * (0.8 + rng.gen::<f64>() * 0.4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_venues;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn venue(id: &str) -> Venue {
        builtin_venues()
            .into_iter()
            .find(|v| v.id == id)
            .unwrap_or_else(|| panic!("{id} missing from catalog"))
    }

    #[test]
    fn test_gas_free_venue_is_exactly_zero() {
        let cowswap = venue("cowswap");
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..20 {
            assert_eq!(network_fee_usd(&cowswap, &mut rng), 0.0);
        }
    }

    #[test]
    fn test_fee_within_jitter_band() {
        let uni = venue("uniswap-v3");
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..50 {
            let fee = network_fee_usd(&uni, &mut rng);
            assert!(fee >= 15.0 * 0.8 - 1e-9);
            assert!(fee <= 15.0 * 1.2 + 1e-9);
        }
    }

    #[test]
    fn test_multiplier_scales_fee() {
        let quickswap = venue("quickswap"); // polygon, 0.1x
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..50 {
            let fee = network_fee_usd(&quickswap, &mut rng);
            assert!(fee <= 0.5 * 0.1 * 1.2 + 1e-9);
            assert!(fee > 0.0);
        }
    }

    #[test]
    fn test_network_base_costs_ordered() {
        assert!(network_base_cost_usd(Network::Ethereum) > network_base_cost_usd(Network::Base));
        assert!(network_base_cost_usd(Network::Base) > network_base_cost_usd(Network::Polygon));
        assert!(network_base_cost_usd(Network::Polygon) > network_base_cost_usd(Network::Gnosis));
    }
}
