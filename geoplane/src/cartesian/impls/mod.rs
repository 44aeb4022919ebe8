mod point;

pub use point::PlanarPoint;
