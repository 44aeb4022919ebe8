//! Points in the local planar frame: meters east (`x`) and north (`y`) of a reference point.

mod impls;
mod traits;

pub use impls::PlanarPoint;
pub use traits::*;
