use approx::AbsDiffEq;
use nalgebra::{Point2, Scalar};
use serde::{Deserialize, Serialize};

use crate::cartesian::traits::{CartesianPoint2d, NewCartesianPoint2d};

/// Offset in meters from the reference point of a planar frame. `x` grows to the east, `y` to
/// the north.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint<Num = f64> {
    x: Num,
    y: Num,
}

impl<Num> PlanarPoint<Num> {
    /// Creates a new point with the given coordinates.
    pub const fn new(x: Num, y: Num) -> Self {
        Self { x, y }
    }

    /// Returns coordinates of the point as an array of `Num`.
    pub fn coords(&self) -> [Num; 2]
    where
        Num: Copy,
    {
        [self.x, self.y]
    }
}

impl<Num: num_traits::Num + Copy + PartialOrd> CartesianPoint2d for PlanarPoint<Num> {
    type Num = Num;

    fn x(&self) -> Num {
        self.x
    }

    fn y(&self) -> Num {
        self.y
    }
}

impl<Num: num_traits::Num + Copy + PartialOrd> NewCartesianPoint2d<Num> for PlanarPoint<Num> {
    fn new(x: Num, y: Num) -> Self {
        PlanarPoint { x, y }
    }
}

impl<Num> AbsDiffEq for PlanarPoint<Num>
where
    Num: AbsDiffEq<Num, Epsilon = Num> + Copy,
{
    type Epsilon = Num;

    fn default_epsilon() -> Self::Epsilon {
        Num::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl<Num: Scalar + num_traits::Num + Copy + PartialOrd> CartesianPoint2d for Point2<Num> {
    type Num = Num;

    fn x(&self) -> Num {
        self.x
    }

    fn y(&self) -> Num {
        self.y
    }
}

impl<Num: Scalar + num_traits::Num + Copy + PartialOrd> NewCartesianPoint2d<Num> for Point2<Num> {
    fn new(x: Num, y: Num) -> Self {
        Point2::new(x, y)
    }
}

impl<Num: Scalar> From<PlanarPoint<Num>> for Point2<Num> {
    fn from(value: PlanarPoint<Num>) -> Self {
        Point2::new(value.x, value.y)
    }
}
