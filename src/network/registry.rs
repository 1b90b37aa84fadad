// src/network/registry.rs
//
// Name → NetworkParams table, built from presets or a TOML document.

use super::params::NetworkParams;
use crate::error::{WalletError, WalletResult};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct NetworkFile {
    #[serde(default, rename = "network")]
    networks: Vec<NetworkParams>,
}

/// Immutable-after-build table of supported networks.
///
/// Built once at startup and passed to whatever needs it; lookups never
/// mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkRegistry {
    networks: BTreeMap<String, NetworkParams>,
}

impl NetworkRegistry {
    /// Registry holding every preset in [`NetworkParams`]
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        for params in [
            NetworkParams::bitcoin(),
            NetworkParams::bitcoin_testnet(),
            NetworkParams::litecoin(),
            NetworkParams::dogecoin(),
            NetworkParams::ravencoin(),
            NetworkParams::horizen(),
            NetworkParams::ripple(),
        ] {
            registry.networks.insert(params.name.clone(), params);
        }
        registry
    }

    /// Parse a TOML document of `[[network]]` tables:
    ///
    /// ```toml
    /// [[network]]
    /// name = "bitcoin"
    /// wif_prefix = 0x80
    /// versions = [
    ///   { kind = "p2pkh", prefix = [0x00] },
    ///   { kind = "p2sh", prefix = [0x05] },
    /// ]
    /// ```
    pub fn from_toml_str(document: &str) -> WalletResult<Self> {
        let file: NetworkFile = toml::from_str(document)
            .map_err(|e| WalletError::Config(format!("Failed to parse network table: {}", e)))?;

        let mut registry = Self::default();
        for params in file.networks {
            registry.insert(params)?;
        }
        tracing::debug!(count = registry.networks.len(), "loaded network table");
        Ok(registry)
    }

    /// Add one network. Rejects duplicates and unusable version lists.
    pub fn insert(&mut self, params: NetworkParams) -> WalletResult<()> {
        validate(&params)?;
        if self.networks.contains_key(&params.name) {
            return Err(WalletError::Config(format!(
                "Duplicate network '{}'",
                params.name
            )));
        }
        self.networks.insert(params.name.clone(), params);
        Ok(())
    }

    pub fn get(&self, name: &str) -> WalletResult<&NetworkParams> {
        self.networks
            .get(name)
            .ok_or_else(|| WalletError::Config(format!("Unknown network '{}'", name)))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

fn validate(params: &NetworkParams) -> WalletResult<()> {
    if params.name.trim().is_empty() {
        return Err(WalletError::Config("Network name is empty".to_string()));
    }
    if params.versions.is_empty() {
        return Err(WalletError::Config(format!(
            "Network '{}' has no address versions",
            params.name
        )));
    }
    for (i, version) in params.versions.iter().enumerate() {
        if version.prefix.is_empty() {
            return Err(WalletError::Config(format!(
                "Network '{}' has an empty version prefix",
                params.name
            )));
        }
        // the same prefix under two kinds would make decoding ambiguous
        if params.versions[..i].iter().any(|v| v.prefix == version.prefix) {
            return Err(WalletError::Config(format!(
                "Network '{}' lists prefix {} twice",
                params.name,
                hex::encode(&version.prefix)
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::params::AddressKind;

    const TABLE: &str = r#"
        [[network]]
        name = "bitcoin"
        wif_prefix = 0x80
        versions = [
            { kind = "p2pkh", prefix = [0x00] },
            { kind = "p2sh", prefix = [0x05] },
        ]

        [[network]]
        name = "horizen"
        versions = [
            { kind = "p2pkh", prefix = [0x20, 0x89] },
            { kind = "p2sh", prefix = [0x20, 0x96] },
        ]
    "#;

    #[test]
    fn test_builtin_lookup() {
        let registry = NetworkRegistry::builtin();
        assert_eq!(registry.len(), 7);
        assert_eq!(registry.get("bitcoin").unwrap(), &NetworkParams::bitcoin());
        assert!(matches!(
            registry.get("monero"),
            Err(WalletError::Config(_))
        ));
    }

    #[test]
    fn test_toml_matches_presets() {
        let registry = NetworkRegistry::from_toml_str(TABLE).unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["bitcoin", "horizen"]);
        assert_eq!(registry.get("bitcoin").unwrap(), &NetworkParams::bitcoin());

        let zen = registry.get("horizen").unwrap();
        assert_eq!(zen.version(AddressKind::PubKeyHash), Some(&[0x20, 0x89][..]));
        assert_eq!(zen.wif_prefix, None);
    }

    #[test]
    fn test_rejects_bad_tables() {
        let duplicate = format!("{}\n{}", TABLE, TABLE);
        assert!(matches!(
            NetworkRegistry::from_toml_str(&duplicate),
            Err(WalletError::Config(_))
        ));

        let no_versions = "[[network]]\nname = \"x\"\nversions = []\n";
        assert!(NetworkRegistry::from_toml_str(no_versions).is_err());

        let clash = r#"
            [[network]]
            name = "x"
            versions = [
                { kind = "p2pkh", prefix = [0x01] },
                { kind = "p2sh", prefix = [0x01] },
            ]
        "#;
        assert!(NetworkRegistry::from_toml_str(clash).is_err());

        assert!(NetworkRegistry::from_toml_str("not = [toml").is_err());
    }

    #[test]
    fn test_empty_document() {
        let registry = NetworkRegistry::from_toml_str("").unwrap();
        assert!(registry.is_empty());
    }
}
