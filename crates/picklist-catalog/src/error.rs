#![deny(unsafe_code)]

use std::path::PathBuf;

use crate::rule::RuleClass;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize catalog: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("{class} rule has an empty key")]
    EmptyKey { class: RuleClass },

    #[error("duplicate {class} rule key: {key}")]
    DuplicateKey { class: RuleClass, key: String },

    #[error("{class} rule {key} produces no lines")]
    EmptyBundle { class: RuleClass, key: String },

    #[error("{class} rule {key} has a line with an empty SKU")]
    EmptySku { class: RuleClass, key: String },

    #[error("{class} rule {key}: multiplier for SKU {sku} must be at least 1")]
    InvalidMultiplier {
        class: RuleClass,
        key: String,
        sku: String,
    },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
