//! Geographic coordinates (latitude and longitude, see [`GeoPoint`]), the spherical earth model
//! ([`Datum`]) and the [`Projection`] trait used to move points between geographic and planar
//! spaces.

mod datum;
pub mod impls;
mod traits;

pub use datum::Datum;
pub use traits::point::{GeoPoint, NewGeoPoint};
pub use traits::projection::Projection;
