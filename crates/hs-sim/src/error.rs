use hs_core::PackageId;
use hs_data::DataError;
use hs_route::RouteError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("fleet configuration error: {0}")]
    Config(String),

    #[error("{needed} batches leave without waiting but only {drivers} drivers are available")]
    NotEnoughDrivers {
        drivers: usize,
        needed:  usize,
    },

    #[error("batch name {0:?} is used more than once")]
    DuplicateBatch(String),

    #[error("package {package} is assigned to both {first:?} and {second:?}")]
    DuplicateAssignment {
        package: PackageId,
        first:   String,
        second:  String,
    },

    #[error("route planning failed: {0}")]
    Route(#[from] RouteError),

    #[error(transparent)]
    Data(#[from] DataError),
}

pub type SimResult<T> = Result<T, SimError>;
