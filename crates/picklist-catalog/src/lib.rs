#![deny(unsafe_code)]

mod builtin;
pub mod catalog;
pub mod error;
pub mod rule;

pub use crate::catalog::RuleCatalog;
pub use crate::error::CatalogError;
pub use crate::rule::{
    ExpansionRule, MultiSizeRule, NamedBundleRule, NamedMatch, RuleClass, RuleLine,
    SingleSizeRule,
};
