#![deny(unsafe_code)]

use std::fmt;

use serde::{Deserialize, Serialize};

/// One produced pick line: a SKU and the units per ordered item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleLine {
    pub sku: String,
    pub multiplier: u32,
}

impl RuleLine {
    pub fn new(sku: impl Into<String>, multiplier: u32) -> Self {
        Self {
            sku: sku.into(),
            multiplier,
        }
    }
}

/// Pack-size label rewritten in place, e.g. `(10" x 7") 10pc` -> `1152 x 2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleSizeRule {
    pub key: String,
    #[serde(flatten)]
    pub line: RuleLine,
}

/// Multi-size bundle label expanded into one row per size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiSizeRule {
    pub key: String,
    pub lines: Vec<RuleLine>,
}

/// How a named bundle key is matched against a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedMatch {
    /// The SKU cell equals the key.
    ExactSku,
    /// The SKU or order cell contains the key.
    Contains,
}

impl NamedMatch {
    pub fn as_str(self) -> &'static str {
        match self {
            NamedMatch::ExactSku => "exact_sku",
            NamedMatch::Contains => "contains",
        }
    }

    pub fn matches(self, key: &str, order_id: &str, sku: &str) -> bool {
        match self {
            NamedMatch::ExactSku => sku == key,
            NamedMatch::Contains => sku.contains(key) || order_id.contains(key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedBundleRule {
    pub key: String,
    #[serde(rename = "match")]
    pub match_mode: NamedMatch,
    pub lines: Vec<RuleLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleClass {
    SingleSize,
    MultiSizeBundle,
    NamedBundle,
}

impl RuleClass {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleClass::SingleSize => "single-size",
            RuleClass::MultiSizeBundle => "multi-size bundle",
            RuleClass::NamedBundle => "named bundle",
        }
    }
}

impl fmt::Display for RuleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view over any catalog rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionRule<'a> {
    SingleSize(&'a SingleSizeRule),
    MultiSizeBundle(&'a MultiSizeRule),
    NamedBundle(&'a NamedBundleRule),
}

impl<'a> ExpansionRule<'a> {
    pub fn class(&self) -> RuleClass {
        match self {
            ExpansionRule::SingleSize(_) => RuleClass::SingleSize,
            ExpansionRule::MultiSizeBundle(_) => RuleClass::MultiSizeBundle,
            ExpansionRule::NamedBundle(_) => RuleClass::NamedBundle,
        }
    }

    pub fn key(&self) -> &'a str {
        match self {
            ExpansionRule::SingleSize(rule) => &rule.key,
            ExpansionRule::MultiSizeBundle(rule) => &rule.key,
            ExpansionRule::NamedBundle(rule) => &rule.key,
        }
    }

    pub fn lines(&self) -> &'a [RuleLine] {
        match self {
            ExpansionRule::SingleSize(rule) => std::slice::from_ref(&rule.line),
            ExpansionRule::MultiSizeBundle(rule) => &rule.lines,
            ExpansionRule::NamedBundle(rule) => &rule.lines,
        }
    }
}
