use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpansionError {
    /// `multiplier * quantity` does not fit in a `u32`; the run stops before any write.
    #[error("row {row}: quantity {quantity} x {multiplier} for SKU {sku} overflows u32")]
    QuantityOverflow {
        row: usize,
        sku: String,
        multiplier: u32,
        quantity: u32,
    },
}
