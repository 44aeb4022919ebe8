use approx::AbsDiffEq;
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::geo::traits::point::{GeoPoint, NewGeoPoint};

/// 2d point on the surface of a celestial body.
///
/// Coordinates are stored in degrees. The usual `[-90, 90]` latitude and `[-180, 180]` longitude
/// ranges are not enforced: conversions accept any value and return mathematically defined, if
/// physically meaningless, results for out-of-range input.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d<N = f64> {
    lat: N,
    lon: N,
}

impl<N: Float> GeoPoint for GeoPoint2d<N> {
    type Num = N;

    fn lat(&self) -> N {
        self.lat
    }

    fn lon(&self) -> N {
        self.lon
    }
}

impl<N: Float> NewGeoPoint<N> for GeoPoint2d<N> {
    fn latlon(lat: N, lon: N) -> Self {
        Self { lat, lon }
    }
}

impl<N: Float> GeoPoint2d<N> {
    /// Creates a new point from another.
    pub fn from(other: &impl GeoPoint<Num = N>) -> Self {
        Self {
            lat: other.lat(),
            lon: other.lon(),
        }
    }

    /// The map origin, `(0°, 0°)`.
    pub fn origin() -> Self {
        Self {
            lat: N::zero(),
            lon: N::zero(),
        }
    }
}

impl<N> AbsDiffEq for GeoPoint2d<N>
where
    N: AbsDiffEq<N, Epsilon = N> + Copy,
{
    type Epsilon = N;

    fn default_epsilon() -> Self::Epsilon {
        N::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.lat.abs_diff_eq(&other.lat, epsilon) && self.lon.abs_diff_eq(&other.lon, epsilon)
    }
}

/// Creates a new `f64` [`GeoPoint2d`] from latitude and longitude values (in degrees).
///
/// ```
/// use geoplane::geo::GeoPoint;
/// use geoplane::latlon;
///
/// let point = latlon!(50.774987, 6.085083);
/// assert_eq!(point.lat(), 50.774987);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        <$crate::geo::impls::GeoPoint2d<f64> as $crate::geo::NewGeoPoint<f64>>::latlon($lat, $lon)
    };
}
