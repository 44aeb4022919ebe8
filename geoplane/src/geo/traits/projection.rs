/// Conversion between two coordinate spaces.
pub trait Projection {
    /// Type of the point in the source space.
    type InPoint;
    /// Type of the point in the target space.
    type OutPoint;

    /// Projects a point into the target space. Returns `None` if the point cannot be projected.
    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint>;
    /// Projects a point from the target space back into the source space.
    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint>;
}
