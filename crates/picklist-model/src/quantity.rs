//! Order quantities.
//!
//! At the table boundary a quantity is always the string `Quantity: <n>`.
//! Internally it is an unsigned 32-bit integer; scaling by a rule multiplier
//! is checked and never wraps.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Label that prefixes every quantity cell.
pub const QUANTITY_PREFIX: &str = "Quantity: ";

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);
    pub const ONE: Quantity = Quantity(1);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Parses a quantity cell such as `Quantity: 3`.
    ///
    /// The prefix is optional so that a bare `3` is accepted too. Anything that
    /// is not a non-negative integer after the prefix is an error; callers decide
    /// how to degrade.
    pub fn parse_cell(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix(QUANTITY_PREFIX.trim_end())
            .unwrap_or(trimmed)
            .trim();
        digits
            .parse::<u32>()
            .map(Quantity)
            .map_err(|_| ModelError::InvalidQuantity {
                raw: raw.to_string(),
            })
    }

    /// `multiplier * self`, or `None` when the product does not fit in `u32`.
    pub fn checked_scale(self, multiplier: u32) -> Option<Self> {
        self.0.checked_mul(multiplier).map(Quantity)
    }

    /// Cell text for the table boundary.
    pub fn to_cell(self) -> String {
        self.to_string()
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{QUANTITY_PREFIX}{}", self.0)
    }
}
