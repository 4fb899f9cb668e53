// src/engine/offramp.rs
//
// Off-ramp selection: evaluate every provider eligible for the asset
// and keep the one paying out the most. Providers with an empty
// supported-asset set form the universal fallback tier used when no
// listed provider matches, so a positive amount always has a path out.

use crate::catalog::{FeeKind, OffRampProvider};

#[derive(Debug, Clone)]
pub struct OffRampChoice {
    pub provider: String,
    pub fee_eur: f64,
    pub final_eur: f64,
}

fn payout(provider: &OffRampProvider, amount: f64) -> (f64, f64) {
    let fee = match provider.fee_kind {
        FeeKind::Flat => provider.fee,
        FeeKind::Proportional => amount * provider.fee,
    };
    let final_eur = (amount * provider.effective_rate - fee).max(0.0);
    (fee, final_eur)
}

/// Best cash-out path for `amount` EUR worth of `asset`. Ties break to
/// the earliest provider in catalog order.
pub fn select_best(providers: &[OffRampProvider], asset: &str, amount: f64) -> OffRampChoice {
    let listed: Vec<&OffRampProvider> = providers.iter().filter(|p| p.accepts(asset)).collect();

    let eligible: Vec<&OffRampProvider> = if listed.is_empty() {
        providers.iter().filter(|p| p.is_universal()).collect()
    } else {
        listed
    };

    let mut best: Option<OffRampChoice> = None;
    for provider in eligible {
        let (fee_eur, final_eur) = payout(provider, amount);
        let better = match &best {
            Some(current) => final_eur > current.final_eur,
            None => true,
        };
        if better {
            best = Some(OffRampChoice {
                provider: provider.name.clone(),
                fee_eur,
                final_eur,
            });
        }
    }

    // Catalog validation guarantees a universal provider, so the only
    // way to get here empty is an empty catalog slice in tests.
    best.unwrap_or(OffRampChoice {
        provider: "none".to_string(),
        fee_eur: 0.0,
        final_eur: 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_offramps;

    #[test]
    fn test_selects_maximum_payout() {
        let providers = builtin_offramps();
        let choice = select_best(&providers, "EURS", 10_000.0);

        // No eligible provider may beat the chosen one.
        for p in providers.iter().filter(|p| p.accepts("EURS")) {
            let (_, final_eur) = payout(p, 10_000.0);
            assert!(
                final_eur <= choice.final_eur,
                "{} pays {} > chosen {}",
                p.name,
                final_eur,
                choice.final_eur
            );
        }
    }

    #[test]
    fn test_unlisted_asset_falls_back_to_universal_tier() {
        let providers = builtin_offramps();
        // EURA is listed by no provider.
        assert!(!providers.iter().any(|p| p.accepts("EURA")));

        let choice = select_best(&providers, "EURA", 5_000.0);
        let chosen = providers
            .iter()
            .find(|p| p.name == choice.provider)
            .expect("chosen provider not in catalog");
        assert!(chosen.is_universal());
        assert!(choice.final_eur > 0.0);
    }

    #[test]
    fn test_flat_vs_proportional_crossover() {
        let providers = vec![
            OffRampProvider {
                name: "Flat5".to_string(),
                fee: 5.0,
                fee_kind: FeeKind::Flat,
                effective_rate: 1.0,
                supported_assets: vec![],
            },
            OffRampProvider {
                name: "OnePercent".to_string(),
                fee: 0.01,
                fee_kind: FeeKind::Proportional,
                effective_rate: 1.0,
                supported_assets: vec![],
            },
        ];

        // Below 500 EUR the proportional fee is cheaper, above it the
        // flat fee wins.
        assert_eq!(select_best(&providers, "EURC", 100.0).provider, "OnePercent");
        assert_eq!(select_best(&providers, "EURC", 10_000.0).provider, "Flat5");
    }

    #[test]
    fn test_payout_floors_at_zero() {
        let providers = vec![OffRampProvider {
            name: "Flat5".to_string(),
            fee: 5.0,
            fee_kind: FeeKind::Flat,
            effective_rate: 0.997,
            supported_assets: vec![],
        }];

        let choice = select_best(&providers, "EURC", 2.0);
        assert_eq!(choice.final_eur, 0.0);
    }

    #[test]
    fn test_tie_breaks_to_catalog_order() {
        let twin = |name: &str| OffRampProvider {
            name: name.to_string(),
            fee: 1.0,
            fee_kind: FeeKind::Flat,
            effective_rate: 1.0,
            supported_assets: vec![],
        };
        let providers = vec![twin("First"), twin("Second")];

        let choice = select_best(&providers, "EURC", 1_000.0);
        assert_eq!(choice.provider, "First");
    }
}
