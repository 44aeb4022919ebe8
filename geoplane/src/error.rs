//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
///
/// Only configuration operations of the converter can fail. Numeric degeneracies met during
/// conversions are resolved in place and never reported through this type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeoplaneError {
    /// Latitude or longitude source is missing when binding a reference point.
    #[error("reference point is not bound: missing {0} source")]
    UnboundReference(&'static str),
    /// Earth radius must be a finite positive number of meters.
    #[error("invalid earth radius: {0}")]
    InvalidRadius(f64),
}
