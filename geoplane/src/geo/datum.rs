use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::GeoplaneError;

/// Spherical model of the earth.
///
/// Only the sphere radius is modelled; there is no flattening. A datum read from a configuration
/// file is not checked until it is handed to a converter, see [`Datum::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Datum<N = f64> {
    radius: N,
}

impl<N: Float> Datum<N> {
    /// Default earth radius in meters.
    pub const EARTH_RADIUS: f64 = 6_378_137.0;

    /// Creates a sphere with the given radius in meters.
    ///
    /// Fails if the radius is not a finite positive number.
    pub fn new(radius: N) -> Result<Self, GeoplaneError> {
        Self { radius }.validate()
    }

    /// Sphere with the default earth radius.
    pub fn earth() -> Self {
        Self {
            radius: N::from(Self::EARTH_RADIUS).expect("const conversion failed"),
        }
    }

    /// Radius of the sphere in meters.
    pub fn radius(&self) -> N {
        self.radius
    }

    /// Returns the datum back if its radius is a finite positive number.
    pub fn validate(self) -> Result<Self, GeoplaneError> {
        if self.radius.is_finite() && self.radius > N::zero() {
            Ok(self)
        } else {
            Err(GeoplaneError::InvalidRadius(
                self.radius.to_f64().unwrap_or(f64::NAN),
            ))
        }
    }
}

impl<N: Float> Default for Datum<N> {
    fn default() -> Self {
        Self::earth()
    }
}
