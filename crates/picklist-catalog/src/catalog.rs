#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::Digest;

use crate::builtin;
use crate::error::CatalogError;
use crate::rule::{
    ExpansionRule, MultiSizeRule, NamedBundleRule, RuleClass, RuleLine, SingleSizeRule,
};

/// Immutable set of expansion rules.
///
/// Built once (from the shipped tables or a TOML file), validated, then
/// shared read-only with the engine.
///
/// ```toml
/// [[single_size]]
/// key = '(10" x 7") 5pc'
/// sku = "1152"
/// multiplier = 1
///
/// [[multi_size]]
/// key = "(3 SIZES, 5s)"
/// lines = [{ sku = "1152", multiplier = 1 }, { sku = "1153", multiplier = 1 }]
///
/// [[named_bundle]]
/// key = "RCK-FULLSET"
/// match = "exact_sku"
/// lines = [{ sku = "74", multiplier = 1 }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCatalog {
    #[serde(default)]
    single_size: Vec<SingleSizeRule>,
    #[serde(default)]
    multi_size: Vec<MultiSizeRule>,
    #[serde(default, rename = "named_bundle")]
    named_bundles: Vec<NamedBundleRule>,
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleCatalog {
    /// Catalog compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            single_size: builtin::single_size(),
            multi_size: builtin::multi_size(),
            named_bundles: builtin::named_bundles(),
        }
    }

    /// Builds and validates a catalog from explicit tables.
    pub fn new(
        single_size: Vec<SingleSizeRule>,
        multi_size: Vec<MultiSizeRule>,
        named_bundles: Vec<NamedBundleRule>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            single_size,
            multi_size,
            named_bundles,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        let catalog: Self = toml::from_str(&text).map_err(|source| CatalogError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        check_class(
            RuleClass::SingleSize,
            self.single_size
                .iter()
                .map(|rule| (rule.key.as_str(), std::slice::from_ref(&rule.line))),
        )?;
        check_class(
            RuleClass::MultiSizeBundle,
            self.multi_size
                .iter()
                .map(|rule| (rule.key.as_str(), rule.lines.as_slice())),
        )?;
        check_class(
            RuleClass::NamedBundle,
            self.named_bundles
                .iter()
                .map(|rule| (rule.key.as_str(), rule.lines.as_slice())),
        )
    }

    /// Line for an exact pack-size label.
    pub fn single_size(&self, key: &str) -> Option<&RuleLine> {
        self.single_size
            .iter()
            .find(|rule| rule.key == key)
            .map(|rule| &rule.line)
    }

    /// Lines for an exact multi-size bundle label.
    pub fn multi_size(&self, key: &str) -> Option<&[RuleLine]> {
        self.multi_size
            .iter()
            .find(|rule| rule.key == key)
            .map(|rule| rule.lines.as_slice())
    }

    /// First named bundle matching the row, in catalog order.
    pub fn named_bundle(&self, order_id: &str, sku: &str) -> Option<&NamedBundleRule> {
        self.named_bundles
            .iter()
            .find(|rule| rule.match_mode.matches(&rule.key, order_id, sku))
    }

    /// True when `sku` is a SKU the catalog produces, i.e. an already expanded pick line.
    pub fn is_target_sku(&self, sku: &str) -> bool {
        !sku.is_empty()
            && self
                .rules()
                .any(|rule| rule.lines().iter().any(|line| line.sku == sku))
    }

    /// Every rule, grouped by class in precedence order.
    pub fn rules(&self) -> impl Iterator<Item = ExpansionRule<'_>> {
        self.single_size
            .iter()
            .map(ExpansionRule::SingleSize)
            .chain(self.multi_size.iter().map(ExpansionRule::MultiSizeBundle))
            .chain(self.named_bundles.iter().map(ExpansionRule::NamedBundle))
    }

    pub fn len(&self) -> usize {
        self.single_size.len() + self.multi_size.len() + self.named_bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// SHA-256 of the canonical JSON form; identifies the catalog version in logs.
    pub fn fingerprint(&self) -> Result<String, CatalogError> {
        let canonical =
            serde_json::to_vec(self).map_err(|source| CatalogError::Serialize { source })?;
        Ok(hex::encode(sha2::Sha256::digest(&canonical)))
    }
}

fn check_class<'a>(
    class: RuleClass,
    rules: impl Iterator<Item = (&'a str, &'a [RuleLine])>,
) -> Result<(), CatalogError> {
    let mut seen = BTreeSet::new();
    for (key, lines) in rules {
        if key.trim().is_empty() {
            return Err(CatalogError::EmptyKey { class });
        }
        if !seen.insert(key) {
            return Err(CatalogError::DuplicateKey {
                class,
                key: key.to_string(),
            });
        }
        if lines.is_empty() {
            return Err(CatalogError::EmptyBundle {
                class,
                key: key.to_string(),
            });
        }
        for line in lines {
            if line.sku.trim().is_empty() {
                return Err(CatalogError::EmptySku {
                    class,
                    key: key.to_string(),
                });
            }
            if line.multiplier == 0 {
                return Err(CatalogError::InvalidMultiplier {
                    class,
                    key: key.to_string(),
                    sku: line.sku.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::NamedMatch;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = RuleCatalog::builtin();
        catalog.validate().expect("builtin catalog validates");
        assert_eq!(catalog.len(), 16 + 4 + 3);
    }

    #[test]
    fn lookups_are_exact() {
        let catalog = RuleCatalog::builtin();
        assert_eq!(
            catalog.single_size("(10\" x 7\") 10pc"),
            Some(&RuleLine::new("1152", 2))
        );
        assert_eq!(catalog.single_size("(10\" X 7\") 10pc"), None);
        assert_eq!(catalog.multi_size("(3 SIZES, 15s)").map(<[RuleLine]>::len), Some(3));
        assert_eq!(catalog.multi_size("(4 SIZES, 15s)"), None);
    }

    #[test]
    fn named_bundles_follow_catalog_order() {
        let catalog = RuleCatalog::builtin();
        let rule = catalog
            .named_bundle("Boot Polishing Pack promo", "RCK-FULLSET")
            .expect("bundle");
        assert_eq!(rule.key, "RCK-FULLSET");
        assert_eq!(rule.match_mode, NamedMatch::ExactSku);
        let rule = catalog
            .named_bundle("Shoe care: Pouch and Stick", "")
            .expect("bundle");
        assert_eq!(rule.key, "Pouch and Stick");
        assert!(catalog.named_bundle("RCK-FULLSET order", "RCK").is_none());
    }

    #[test]
    fn target_skus_cover_every_class() {
        let catalog = RuleCatalog::builtin();
        assert!(catalog.is_target_sku("1318"));
        assert!(catalog.is_target_sku("1154"));
        assert!(catalog.is_target_sku("6425"));
        assert!(!catalog.is_target_sku("RCK-FULLSET"));
        assert!(!catalog.is_target_sku(""));
    }

    #[test]
    fn rejects_zero_multiplier() {
        let err = RuleCatalog::new(
            vec![SingleSizeRule {
                key: "(1\" x 1\") 1pc".to_string(),
                line: RuleLine::new("1", 0),
            }],
            Vec::new(),
            Vec::new(),
        )
        .expect_err("zero multiplier");
        assert!(matches!(err, CatalogError::InvalidMultiplier { .. }));
    }

    #[test]
    fn rejects_duplicate_keys() {
        let rule = MultiSizeRule {
            key: "(2 SIZES, 5s)".to_string(),
            lines: vec![RuleLine::new("1152", 1)],
        };
        let err = RuleCatalog::new(Vec::new(), vec![rule.clone(), rule], Vec::new())
            .expect_err("duplicate");
        assert!(matches!(
            err,
            CatalogError::DuplicateKey {
                class: RuleClass::MultiSizeBundle,
                ..
            }
        ));
    }

    #[test]
    fn fingerprint_tracks_content() {
        let builtin = RuleCatalog::builtin().fingerprint().expect("fingerprint");
        assert_eq!(
            builtin,
            RuleCatalog::builtin().fingerprint().expect("fingerprint")
        );
        assert_eq!(builtin.len(), 64);
        let smaller = RuleCatalog::new(Vec::new(), Vec::new(), Vec::new()).expect("empty");
        assert_ne!(builtin, smaller.fingerprint().expect("fingerprint"));
    }

    #[test]
    fn fingerprint_hashes_canonical_json() {
        let catalog = RuleCatalog::builtin();
        let canonical = serde_json::to_vec(&catalog).expect("json");
        assert!(!canonical.is_empty());
        assert_eq!(
            catalog.fingerprint().expect("fingerprint"),
            hex::encode(sha2::Sha256::digest(&canonical))
        );
    }
}
