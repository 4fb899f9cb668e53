// src/engine/compose.rs
//
// Cost composition for one (asset, venue) pair: gross conversion,
// signed price impact, and the network fee, all in output currency.
// Convention: each deduction is computed on the amount entering its
// stage — impact on gross, the off-ramp later charges on net.

use rand::Rng;

use crate::catalog::Venue;
use crate::engine::gas;
use crate::engine::slippage::SlippageEstimate;

#[derive(Debug, Clone, Copy)]
pub struct Composition {
    /// `amount * rate`, before any friction.
    pub gross_eur: f64,
    /// After impact and network fee.
    pub net_eur: f64,
    /// Network fee converted into output currency.
    pub network_fee_eur: f64,
}

/// Compose the net output for `amount` source units converted at
/// `rate` on `venue`, given an already-computed slippage estimate.
/// Pure apart from the injected RNG feeding the gas jitter.
pub fn compose<R: Rng>(
    amount: f64,
    rate: f64,
    venue: &Venue,
    slippage: &SlippageEstimate,
    rng: &mut R,
) -> Composition {
    let gross_eur = amount * rate;

    // Negative impact is an improvement and adds output.
    let after_slippage = gross_eur * (1.0 - slippage.impact);

    let network_fee_eur = gas::network_fee_usd(venue, rng) * rate;
    let net_eur = after_slippage - network_fee_eur;

    Composition {
        gross_eur,
        net_eur,
        network_fee_eur,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_venues;
    use crate::engine::slippage::Confidence;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn venue(id: &str) -> Venue {
        builtin_venues()
            .into_iter()
            .find(|v| v.id == id)
            .unwrap_or_else(|| panic!("{id} missing from catalog"))
    }

    fn est(impact: f64) -> SlippageEstimate {
        SlippageEstimate {
            impact,
            confidence: Confidence::High,
            liquidity: 50_000_000.0,
        }
    }

    #[test]
    fn test_positive_impact_reduces_output() {
        let mut rng = StdRng::seed_from_u64(1);
        let c = compose(1000.0, 0.92, &venue("cowswap"), &est(0.01), &mut rng);

        assert!((c.gross_eur - 920.0).abs() < 1e-9);
        // cowswap is gas-free, so net is gross minus impact only.
        assert_eq!(c.network_fee_eur, 0.0);
        assert!((c.net_eur - 920.0 * 0.99).abs() < 1e-9);
    }

    #[test]
    fn test_improvement_increases_output() {
        let mut rng = StdRng::seed_from_u64(1);
        let c = compose(1000.0, 0.92, &venue("cowswap"), &est(-0.002), &mut rng);

        assert!(c.net_eur > c.gross_eur);
        assert!((c.net_eur - 920.0 * 1.002).abs() < 1e-9);
    }

    #[test]
    fn test_network_fee_converted_at_same_rate() {
        let mut rng = StdRng::seed_from_u64(2);
        let v = venue("uniswap-v3");
        let c = compose(1000.0, 0.92, &v, &est(0.0005), &mut rng);

        // Ethereum base $15 at 1.0x, jitter 0.8..1.2, converted to EUR.
        assert!(c.network_fee_eur >= 15.0 * 0.8 * 0.92 - 1e-9);
        assert!(c.network_fee_eur <= 15.0 * 1.2 * 0.92 + 1e-9);
        assert!((c.net_eur - (c.gross_eur * (1.0 - 0.0005) - c.network_fee_eur)).abs() < 1e-9);
    }

    #[test]
    fn test_small_amount_can_go_negative_on_expensive_network() {
        // A 5 USDC trade on Ethereum cannot cover gas; the composer
        // reports the negative net and leaves policy to the ranker.
        let mut rng = StdRng::seed_from_u64(3);
        let c = compose(5.0, 0.92, &venue("uniswap-v3"), &est(0.0005), &mut rng);
        assert!(c.net_eur < 0.0);
    }
}
