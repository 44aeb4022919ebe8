//! Conversion between geographic coordinates and a local planar frame.
//!
//! [`GeodesicConverter`] places GPS-tagged entities on a flat canvas: it turns latitude and
//! longitude into meters east and north of a reference point (the "map center"), turns such
//! offsets back into coordinates and measures great-circle distances. The earth is modelled as
//! a sphere of configurable radius ([`geo::Datum`]).
//!
//! The reference point is observed, not copied. Bind the converter to shared storage (see
//! [`reference`]) and every conversion uses the value stored there at call time:
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use geoplane::GeodesicConverter;
//! use geoplane::cartesian::CartesianPoint2d;
//!
//! let center_lat = Rc::new(Cell::new(0.0_f64));
//! let center_lon = Rc::new(Cell::new(0.0_f64));
//! let converter = GeodesicConverter::bound(center_lat.clone(), center_lon.clone());
//!
//! let from_origin = converter.forward(50.774987, 6.085083);
//! assert!((from_origin.y() - 5_660_373.96).abs() < 0.01);
//!
//! center_lat.set(50.0);
//! center_lon.set(6.0);
//! let from_center = converter.forward(50.774987, 6.085083);
//! assert!((from_center.y() - 86_274.58).abs() < 0.01);
//! ```
//!
//! The converter is generic over the float type (`f32`, `f64` or any [`num_traits::Float`]) and
//! all trigonometry runs in that precision.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod cartesian;
mod converter;
pub mod error;
pub mod geo;
pub mod reference;

pub use converter::{GeodesicConverter, GeodesicConverterF32, GeodesicConverterF64};
pub use error::GeoplaneError;
