use serde::Serialize;

/// A fiat-pegged token. Addresses are carried as opaque strings for
/// display/reference only; nothing here validates or calls them.
#[derive(Debug, Clone, Serialize)]
pub struct Asset {
    pub symbol: String,
    pub name: String,
    pub address: String,
}

impl Asset {
    fn new(symbol: &str, name: &str, address: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            address: address.to_string(),
        }
    }
}

/// Euro stablecoins the engine quotes into. Order matters: it is the
/// enumeration order used by the ranker and the tie-break order for
/// equal quotes.
pub fn builtin_assets() -> Vec<Asset> {
    vec![
        Asset::new("EURC", "EURC (Circle)", "0x1abaea1f7c830bd89acc67ec4af516284b1bc33c"),
        Asset::new("EURS", "Stasis Euro (EURS)", "0xdb25f211ab05b1c97d595516f45794528a807ad8"),
        Asset::new("EURT", "Euro Tether (EURT)", "0xc581b735a1688071a1746c968e0798d642ede491"),
        Asset::new("EURe", "Monerium EUR emoney", "0x3231cb76718cdef2155fc47b5286d82e6eda273f"),
        Asset::new("EURA", "EURA (Angle)", "0x1a7e4e63778b4f12a199c062f3efdd288afcbce8"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_assets_unique_symbols() {
        let assets = builtin_assets();
        assert_eq!(assets.len(), 5);

        let mut symbols: Vec<&str> = assets.iter().map(|a| a.symbol.as_str()).collect();
        symbols.sort();
        symbols.dedup();
        assert_eq!(symbols.len(), 5, "asset symbols must be unique keys");
    }

    #[test]
    fn test_builtin_assets_have_addresses() {
        for asset in builtin_assets() {
            assert!(asset.address.starts_with("0x"), "{} missing address", asset.symbol);
            assert!(!asset.name.is_empty());
        }
    }
}
