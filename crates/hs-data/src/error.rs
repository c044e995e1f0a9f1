use thiserror::Error;

use hs_core::PackageId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    #[error("address {0:?} is not in the distance index")]
    AddressNotFound(String),

    #[error("no distance recorded between {from:?} and {to:?}")]
    MissingDistance { from: String, to: String },

    #[error("package {0} not found")]
    PackageNotFound(PackageId),

    #[error("package {0} appears more than once")]
    DuplicatePackage(PackageId),

    #[error("distance {from:?} → {to:?} is {forward} but the reverse is {backward:?}")]
    Asymmetric {
        from:     String,
        to:       String,
        forward:  f64,
        backward: Option<f64>,
    },

    #[error("source cell {from:?} → {to:?} reads {cell} but the index holds {indexed}")]
    ConflictingCell {
        from:    String,
        to:      String,
        cell:    f64,
        indexed: f64,
    },

    #[error("data parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Io(e.to_string())
    }
}

pub type DataResult<T> = Result<T, DataError>;
