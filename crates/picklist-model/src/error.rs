use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid quantity cell: {raw:?}")]
    InvalidQuantity { raw: String },
    #[error("column index {0} is outside the A-D layout")]
    UnknownColumn(usize),
}

pub type Result<T> = std::result::Result<T, ModelError>;
