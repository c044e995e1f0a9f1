//! Route-planning error type.

use thiserror::Error;

use hs_core::PackageId;
use hs_data::DataError;

/// Errors produced by `hs-route`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    #[error("package {0} listed twice in one batch")]
    DuplicatePackage(PackageId),

    #[error(transparent)]
    Data(#[from] DataError),
}

pub type RouteResult<T> = Result<T, RouteError>;
