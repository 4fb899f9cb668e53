use serde::Serialize;

/// How a provider's fee is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeKind {
    /// Fixed EUR amount per withdrawal.
    Flat,
    /// Fraction of the amount entering the off-ramp.
    Proportional,
}

/// A fiat cash-out path. `supported_assets` empty means the provider
/// accepts any asset and acts as the universal fallback tier.
#[derive(Debug, Clone, Serialize)]
pub struct OffRampProvider {
    pub name: String,
    /// Flat EUR value or a fraction, depending on `fee_kind`.
    pub fee: f64,
    pub fee_kind: FeeKind,
    /// Multiplier applied to the amount before the fee; models the
    /// provider's exchange-rate haircut.
    pub effective_rate: f64,
    pub supported_assets: Vec<String>,
}

impl OffRampProvider {
    fn new(name: &str, fee: f64, fee_kind: FeeKind, effective_rate: f64, assets: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            fee,
            fee_kind,
            effective_rate,
            supported_assets: assets.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn accepts(&self, asset: &str) -> bool {
        self.supported_assets.iter().any(|a| a == asset)
    }

    pub fn is_universal(&self) -> bool {
        self.supported_assets.is_empty()
    }
}

/// Cash-out providers in tie-break order. Proportional fees are
/// fractions (0.0149 = 1.49%), flat fees are EUR.
pub fn builtin_offramps() -> Vec<OffRampProvider> {
    vec![
        OffRampProvider::new("Coinbase", 0.0149, FeeKind::Proportional, 0.998, &["EURC", "EURS"]),
        OffRampProvider::new("Kraken", 0.009, FeeKind::Proportional, 0.9975, &["EURC", "EURS", "EURT"]),
        OffRampProvider::new("Monerium", 2.0, FeeKind::Flat, 0.999, &["EURe"]),
        OffRampProvider::new("Wise", 3.2, FeeKind::Flat, 0.9985, &["EURC", "EURT", "EURe"]),
        // Universal fallback tier: pricier, but takes anything.
        OffRampProvider::new("Revolut", 2.5, FeeKind::Flat, 0.997, &[]),
        OffRampProvider::new("OTC Desk", 0.025, FeeKind::Proportional, 0.995, &[]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_offramps_have_universal_fallback() {
        let providers = builtin_offramps();
        assert!(
            providers.iter().any(|p| p.is_universal()),
            "at least one universal provider is required"
        );
    }

    #[test]
    fn test_accepts_membership() {
        let providers = builtin_offramps();
        let kraken = providers
            .iter()
            .find(|p| p.name == "Kraken")
            .expect("Kraken missing");

        assert!(kraken.accepts("EURT"));
        assert!(!kraken.accepts("EURA"));
        assert!(!kraken.is_universal());
    }

    #[test]
    fn test_fee_values_sane() {
        for p in builtin_offramps() {
            assert!(p.fee.is_finite() && p.fee >= 0.0, "{} fee invalid", p.name);
            assert!(
                p.effective_rate > 0.0 && p.effective_rate <= 1.5,
                "{} effective rate out of range",
                p.name
            );
            if p.fee_kind == FeeKind::Proportional {
                assert!(p.fee < 1.0, "{} proportional fee must be a fraction", p.name);
            }
        }
    }
}
