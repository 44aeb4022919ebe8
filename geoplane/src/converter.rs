//! Conversion between geographic coordinates and a local planar frame centered at a movable
//! reference point, see [`GeodesicConverter`].

use std::fmt;

use num_traits::Float;

use crate::cartesian::{CartesianPoint2d, PlanarPoint};
use crate::error::GeoplaneError;
use crate::geo::impls::GeoPoint2d;
use crate::geo::{Datum, GeoPoint, NewGeoPoint, Projection};
use crate::reference::{CoordinateSource, Fixed};

/// Converts geographic coordinates into meters east/north of a reference point and back, and
/// measures great-circle distances, on a spherical earth.
///
/// The reference point ("map center") is read from its [`CoordinateSource`]s on every call, so
/// moving the underlying value moves the planar frame with it. An unbound converter uses the map
/// origin `(0°, 0°)`.
///
/// Degenerate numeric cases never fail: a planar axis that evaluates to NaN is reported as `0`,
/// and a zero offset converts back to the reference point exactly. Input coordinates are not
/// range-checked.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use geoplane::GeodesicConverter;
///
/// let latitude = Rc::new(Cell::new(0.0));
/// let longitude = Rc::new(Cell::new(0.0));
/// let converter = GeodesicConverter::bound(latitude.clone(), longitude.clone());
///
/// latitude.set(50.0);
/// longitude.set(6.0);
///
/// let offset = converter.forward(50.0, 6.0);
/// assert_eq!(offset.coords(), [0.0, 0.0]);
/// ```
pub struct GeodesicConverter<N: Float + 'static = f64> {
    latitude: Box<dyn CoordinateSource<N>>,
    longitude: Box<dyn CoordinateSource<N>>,
    datum: Datum<N>,
}

/// Single precision converter.
pub type GeodesicConverterF32 = GeodesicConverter<f32>;
/// Double precision converter.
pub type GeodesicConverterF64 = GeodesicConverter<f64>;

impl<N: Float + 'static> GeodesicConverter<N> {
    /// Creates a converter centered at the map origin with the default earth radius.
    pub fn new() -> Self {
        Self {
            latitude: Box::new(Fixed(N::zero())),
            longitude: Box::new(Fixed(N::zero())),
            datum: Datum::earth(),
        }
    }

    /// Creates a converter centered at the point stored in the given sources.
    pub fn bound(
        latitude: impl CoordinateSource<N> + 'static,
        longitude: impl CoordinateSource<N> + 'static,
    ) -> Self {
        Self {
            latitude: Box::new(latitude),
            longitude: Box::new(longitude),
            datum: Datum::earth(),
        }
    }

    /// Replaces the earth model. Fails if the datum radius is not a finite positive number.
    pub fn with_datum(mut self, datum: Datum<N>) -> Result<Self, GeoplaneError> {
        self.datum = datum.validate().map_err(rejected)?;
        Ok(self)
    }

    /// Rebinds the reference point to new sources.
    ///
    /// Fails if either source is missing; the previous binding stays in effect in that case.
    pub fn bind<La, Lo>(
        &mut self,
        latitude: Option<La>,
        longitude: Option<Lo>,
    ) -> Result<(), GeoplaneError>
    where
        La: CoordinateSource<N> + 'static,
        Lo: CoordinateSource<N> + 'static,
    {
        let (latitude, longitude) = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => (latitude, longitude),
            (None, _) => return Err(rejected(GeoplaneError::UnboundReference("latitude"))),
            (_, None) => return Err(rejected(GeoplaneError::UnboundReference("longitude"))),
        };

        self.latitude = Box::new(latitude);
        self.longitude = Box::new(longitude);
        let reference = self.reference();
        log::debug!(
            "Reference point rebound, now at ({}, {})",
            reference.lat().to_f64().unwrap_or(f64::NAN),
            reference.lon().to_f64().unwrap_or(f64::NAN)
        );

        Ok(())
    }

    /// Current coordinates of the reference point.
    pub fn reference(&self) -> GeoPoint2d<N> {
        GeoPoint2d::latlon(self.latitude.current(), self.longitude.current())
    }

    /// Earth radius in meters.
    pub fn earth_radius(&self) -> N {
        self.datum.radius()
    }

    /// Earth model used by the converter.
    pub fn datum(&self) -> Datum<N> {
        self.datum
    }

    /// Sets the earth radius in meters. Fails, keeping the previous radius, if the value is not
    /// a finite positive number.
    pub fn set_earth_radius(&mut self, radius: N) -> Result<(), GeoplaneError> {
        self.datum = Datum::new(radius).map_err(rejected)?;
        log::debug!(
            "Earth radius set to {} m",
            radius.to_f64().unwrap_or(f64::NAN)
        );
        Ok(())
    }

    /// Converts a geographic point into meters east (`x`) and north (`y`) of the reference point.
    pub fn forward(&self, latitude: N, longitude: N) -> PlanarPoint<N> {
        let reference = self.reference();
        offset(
            reference.lat_rad(),
            reference.lon_rad(),
            latitude.to_radians(),
            longitude.to_radians(),
            self.earth_radius(),
        )
    }

    /// Same as [`forward`](Self::forward) for a point type.
    pub fn forward_point(&self, point: &impl GeoPoint<Num = N>) -> PlanarPoint<N> {
        self.forward(point.lat(), point.lon())
    }

    /// Converts an offset in meters from the reference point back into geographic coordinates.
    ///
    /// A zero offset returns the reference point itself. When the reference point sits on or
    /// beyond a pole the longitude is taken from the bearing of the offset alone.
    pub fn inverse(&self, x: N, y: N) -> GeoPoint2d<N> {
        let reference = self.reference();
        let radius = self.earth_radius();

        let x2 = x / radius;
        let y2 = y / radius;
        let c = (x2 * x2 + y2 * y2).sqrt();
        if c.is_zero() {
            return reference;
        }

        let ref_lat = reference.lat_rad();
        let a = ref_lat.cos();
        let b = ref_lat.sin();
        let sin_c = c.sin();
        let cos_c = c.cos();

        let sin_lat = cos_c * b + (y2 * sin_c * a) / c;
        let latitude = sin_lat.max(-N::one()).min(N::one()).asin().to_degrees();

        let ninety = constant::<N>(90.0);
        let bearing = if reference.lat() >= ninety {
            (-x2 / y2).atan()
        } else if reference.lat() <= -ninety {
            (x2 / y2).atan()
        } else {
            ((x2 * sin_c) / (c * a * cos_c - y2 * b * sin_c)).atan()
        };

        GeoPoint2d::latlon(latitude, reference.lon() + nan_to_zero(bearing).to_degrees())
    }

    /// Same as [`inverse`](Self::inverse) for a point type.
    pub fn inverse_point(&self, point: &impl CartesianPoint2d<Num = N>) -> GeoPoint2d<N> {
        self.inverse(point.x(), point.y())
    }

    /// Offset of the reference point from the map origin `(0°, 0°)`.
    pub fn to_origin(&self) -> PlanarPoint<N> {
        let reference = self.reference();
        self.to_origin_from(reference.lat(), reference.lon())
    }

    /// Offset of the given point from the map origin `(0°, 0°)`.
    pub fn to_origin_from(&self, latitude: N, longitude: N) -> PlanarPoint<N> {
        let latitude = latitude.to_radians();
        let longitude = longitude.to_radians();

        let cos_lat = latitude.cos();
        let sin_lat = latitude.sin();

        let c = (cos_lat * longitude.cos()).acos();
        let k = c / c.sin();
        let radius = self.earth_radius();

        PlanarPoint::new(
            nan_to_zero(k * cos_lat * longitude.sin() * radius),
            nan_to_zero(k * sin_lat * radius),
        )
    }

    /// Great-circle distance in meters between two points. Does not depend on the reference
    /// point.
    pub fn distance(
        &self,
        start_latitude: N,
        start_longitude: N,
        end_latitude: N,
        end_longitude: N,
    ) -> N {
        let [x, y] = self
            .distances(start_latitude, start_longitude, end_latitude, end_longitude)
            .coords();
        (x * x + y * y).sqrt()
    }

    /// East and north components in meters of the way from the start point to the end point, as
    /// seen from the start point. Does not depend on the reference point.
    pub fn distances(
        &self,
        start_latitude: N,
        start_longitude: N,
        end_latitude: N,
        end_longitude: N,
    ) -> PlanarPoint<N> {
        offset(
            start_latitude.to_radians(),
            start_longitude.to_radians(),
            end_latitude.to_radians(),
            end_longitude.to_radians(),
            self.earth_radius(),
        )
    }
}

impl<N: Float + 'static> Default for GeodesicConverter<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Float + 'static> fmt::Debug for GeodesicConverter<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reference = self.reference();
        f.debug_struct("GeodesicConverter")
            .field("reference_lat", &reference.lat().to_f64())
            .field("reference_lon", &reference.lon().to_f64())
            .field("earth_radius", &self.earth_radius().to_f64())
            .finish()
    }
}

impl<N: Float + 'static> Projection for GeodesicConverter<N> {
    type InPoint = GeoPoint2d<N>;
    type OutPoint = PlanarPoint<N>;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        Some(self.forward_point(input))
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        Some(self.inverse_point(input))
    }
}

/// Azimuthal equidistant offset of `(lat, lon)` as seen from `(ref_lat, ref_lon)`, all in
/// radians.
fn offset<N: Float>(ref_lat: N, ref_lon: N, lat: N, lon: N, radius: N) -> PlanarPoint<N> {
    let a = ref_lat.cos();
    let b = ref_lat.sin();
    let c_lat = lat.cos();
    let d = lat.sin();
    let delta_lon = lon - ref_lon;
    let e = delta_lon.cos();

    // c == 0 for coincident points makes k a 0/0
    let c = (b * d + a * c_lat * e).acos();
    let k = c / c.sin();

    PlanarPoint::new(
        nan_to_zero(k * c_lat * delta_lon.sin() * radius),
        nan_to_zero(k * (a * d - b * c_lat * e) * radius),
    )
}

fn nan_to_zero<N: Float>(value: N) -> N {
    if value.is_nan() {
        log::trace!("Degenerate conversion, substituting 0 for NaN");
        N::zero()
    } else {
        value
    }
}

fn constant<N: Float>(value: f64) -> N {
    N::from(value).expect("const conversion failed")
}

fn rejected(error: GeoplaneError) -> GeoplaneError {
    log::warn!("Converter configuration rejected: {error}");
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latlon;
    use crate::reference::Accessor;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use assert_matches::assert_matches;
    use std::cell::Cell;
    use std::rc::Rc;

    const AACHEN: (f64, f64) = (50.774987, 6.085083);

    fn centered_at(lat: f64, lon: f64) -> GeodesicConverter {
        GeodesicConverter::bound(Fixed(lat), Fixed(lon))
    }

    #[test]
    fn unbound_converter_uses_origin() {
        let converter = GeodesicConverterF64::new();
        assert_eq!(converter.reference(), GeoPoint2d::origin());
        assert_eq!(converter.earth_radius(), 6_378_137.0);
    }

    #[test]
    fn forward_from_origin() {
        let converter = GeodesicConverterF64::new();
        let offset = converter.forward(AACHEN.0, AACHEN.1);
        assert_abs_diff_eq!(offset, PlanarPoint::new(489_808.0742, 5_660_373.9621), epsilon = 1e-3);
    }

    #[test]
    fn forward_from_moved_center() {
        let converter = centered_at(50.0, 6.0);
        let offset = converter.forward(AACHEN.0, AACHEN.1);
        assert_abs_diff_eq!(offset, PlanarPoint::new(5_989.5850, 86_274.5779), epsilon = 1e-3);
    }

    #[test]
    fn forward_of_reference_is_exactly_zero() {
        for (lat, lon) in [(0.0, 0.0), (50.0, 6.0), (90.0, 0.0), (-90.0, 45.0), (-33.9, 151.2)] {
            let offset = centered_at(lat, lon).forward(lat, lon);
            assert_eq!(offset.coords(), [0.0, 0.0], "reference ({lat}, {lon})");
        }
    }

    #[test]
    fn forward_of_reference_is_zero_in_single_precision() {
        for (lat, lon) in [(0.0f32, 0.0f32), (50.774987, 6.085083), (90.0, 0.0), (-90.0, -180.0)] {
            let converter = GeodesicConverterF32::bound(Fixed(lat), Fixed(lon));
            let offset = converter.forward(lat, lon);
            assert!(!offset.x().is_nan() && !offset.y().is_nan());
            assert_eq!(offset.coords(), [0.0, 0.0]);
        }
    }

    #[test]
    fn inverse_of_zero_is_reference() {
        for (lat, lon) in [(0.0, 0.0), (50.0, 6.0), (90.0, 10.0), (-90.0, -10.0)] {
            assert_eq!(centered_at(lat, lon).inverse(0.0, 0.0), latlon!(lat, lon));
        }
    }

    #[test]
    fn inverse_from_moved_center() {
        let point = centered_at(50.0, 6.0).inverse(1000.0, 2000.0);
        assert_abs_diff_eq!(point, latlon!(50.017965466, 6.013980530), epsilon = 1e-8);
    }

    #[test]
    fn round_trip_near_reference() {
        let converter = centered_at(50.0, 6.0);
        for (lat, lon) in [AACHEN, (49.2, 5.1), (51.5, 7.9), (50.0, 4.0), (48.3, 6.0)] {
            let offset = converter.forward(lat, lon);
            let back = converter.inverse(offset.x(), offset.y());
            assert_abs_diff_eq!(back, latlon!(lat, lon), epsilon = 1e-6);
        }
    }

    #[test]
    fn inverse_at_poles_uses_offset_bearing() {
        // Pole branch is inclusive: a reference at or past +-90 picks the polar formula.
        let north = centered_at(90.0, 0.0).inverse(1000.0, 2000.0);
        assert_abs_diff_eq!(north, latlon!(89.97991306, -26.56505118), epsilon = 1e-7);

        let south = centered_at(-90.0, 0.0).inverse(1000.0, 2000.0);
        assert_abs_diff_eq!(south, latlon!(-89.97991306, 26.56505118), epsilon = 1e-7);

        let past_pole = centered_at(90.5, 0.0).inverse(1000.0, 2000.0);
        assert_abs_diff_eq!(past_pole.lon(), -26.56505118, epsilon = 1e-7);
    }

    #[test]
    fn inverse_across_pole_does_not_produce_nan() {
        let converter = centered_at(89.0, 20.0);
        let radius = converter.earth_radius();
        let point = converter.inverse(0.0, 1.0f64.to_radians() * radius);
        assert!(!point.lat().is_nan());
        assert!(!point.lon().is_nan());
        assert_abs_diff_eq!(point.lat(), 90.0, epsilon = 1e-5);
    }

    #[test]
    fn distance_matches_haversine() {
        let converter = GeodesicConverterF64::new();
        let distance = converter.distance(AACHEN.0, AACHEN.1, 51.774987, 7.085083);
        assert_abs_diff_eq!(distance, 131_304.7315, epsilon = 1e-3);

        let components = converter.distances(AACHEN.0, AACHEN.1, 51.774987, 7.085083);
        assert_abs_diff_eq!(components, PlanarPoint::new(68_880.4602, 111_787.3638), epsilon = 1e-3);
    }

    #[test]
    fn distance_is_symmetric() {
        let converter = GeodesicConverterF64::new();
        let pairs = [
            (AACHEN, (51.774987, 7.085083)),
            ((0.0, 0.0), (10.0, -20.0)),
            ((-33.9, 151.2), (40.7, -74.0)),
            ((89.0, 0.0), (-10.0, 179.0)),
        ];
        for ((lat_a, lon_a), (lat_b, lon_b)) in pairs {
            assert_relative_eq!(
                converter.distance(lat_a, lon_a, lat_b, lon_b),
                converter.distance(lat_b, lon_b, lat_a, lon_a),
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn distance_ignores_reference() {
        let moved = centered_at(-12.0, 100.0);
        let origin = GeodesicConverterF64::new();
        assert_eq!(
            moved.distance(AACHEN.0, AACHEN.1, 51.0, 7.0),
            origin.distance(AACHEN.0, AACHEN.1, 51.0, 7.0)
        );
        assert_eq!(moved.distance(1.0, 2.0, 1.0, 2.0), 0.0);
    }

    #[test]
    fn distance_scales_with_radius() {
        let mut converter = GeodesicConverterF64::new();
        converter.set_earth_radius(6_371_000.0).expect("valid radius");
        let distance = converter.distance(0.0, 0.0, 0.0, 90.0);
        assert_relative_eq!(distance, 6_371_000.0 * std::f64::consts::FRAC_PI_2, max_relative = 1e-12);
    }

    #[test]
    fn to_origin_matches_forward_from_origin() {
        let origin = GeodesicConverterF64::new();
        for (lat, lon) in [(50.0, 6.0), (-33.9, 151.2), (0.0, -45.0), (0.0, 0.0)] {
            let converter = centered_at(lat, lon);
            assert_eq!(converter.to_origin(), origin.forward(lat, lon));
            assert_eq!(converter.to_origin_from(lat, lon), converter.to_origin());
        }
        assert_abs_diff_eq!(
            centered_at(50.0, 6.0).to_origin(),
            PlanarPoint::new(488_880.1734, 5_573_837.8308),
            epsilon = 1e-3
        );
    }

    #[test]
    fn conversions_follow_moved_reference() {
        let latitude = Rc::new(Cell::new(0.0));
        let longitude = Rc::new(Cell::new(0.0));
        let converter = GeodesicConverter::bound(latitude.clone(), longitude.clone());
        let at_origin = converter.forward(AACHEN.0, AACHEN.1);

        latitude.set(AACHEN.0);
        longitude.set(AACHEN.1);

        assert_eq!(converter.reference(), latlon!(AACHEN.0, AACHEN.1));
        assert_eq!(converter.forward(AACHEN.0, AACHEN.1).coords(), [0.0, 0.0]);
        assert_ne!(converter.forward(0.0, 0.0), at_origin);
    }

    #[test]
    fn bind_replaces_reference() {
        let position = Rc::new(Cell::new(latlon!(50.0, 6.0)));
        let lat_source = position.clone();
        let lon_source = position.clone();

        let mut converter = GeodesicConverterF64::new();
        converter
            .bind(
                Some(Accessor(move || lat_source.get().lat())),
                Some(Accessor(move || lon_source.get().lon())),
            )
            .expect("both sources given");
        assert_eq!(converter.reference(), latlon!(50.0, 6.0));

        position.set(latlon!(-1.0, -2.0));
        assert_eq!(converter.reference(), latlon!(-1.0, -2.0));
    }

    #[test]
    fn bind_rejects_missing_source() {
        let mut converter = centered_at(50.0, 6.0);
        let longitude = Rc::new(Cell::new(1.0));

        assert_matches!(
            converter.bind(None::<Fixed<f64>>, Some(longitude.clone())),
            Err(GeoplaneError::UnboundReference("latitude"))
        );
        assert_matches!(
            converter.bind(Some(Fixed(1.0)), None::<Fixed<f64>>),
            Err(GeoplaneError::UnboundReference("longitude"))
        );
        assert_eq!(converter.reference(), latlon!(50.0, 6.0));
    }

    #[test]
    fn set_earth_radius_rejects_non_positive() {
        let mut converter = GeodesicConverterF64::new();
        converter.set_earth_radius(6_371_000.0).expect("valid radius");

        assert_matches!(converter.set_earth_radius(-5.0), Err(GeoplaneError::InvalidRadius(r)) if r == -5.0);
        assert_matches!(converter.set_earth_radius(0.0), Err(GeoplaneError::InvalidRadius(_)));
        assert_matches!(converter.set_earth_radius(f64::NAN), Err(GeoplaneError::InvalidRadius(_)));
        assert_eq!(converter.earth_radius(), 6_371_000.0);
    }

    #[test]
    fn with_datum() {
        let datum = Datum::new(1000.0).expect("valid radius");
        let converter = GeodesicConverterF64::new().with_datum(datum).expect("valid datum");
        assert_eq!(converter.datum(), datum);

        let invalid: Datum = serde_json::from_str(r#"{"radius": 0.0}"#).expect("valid json");
        assert!(GeodesicConverterF64::new().with_datum(invalid).is_err());
    }

    #[test]
    fn projection_trait() {
        let converter = centered_at(50.0, 6.0);
        let point = latlon!(AACHEN.0, AACHEN.1);
        let projected = converter.project(&point).expect("always projects");
        assert_eq!(projected, converter.forward(AACHEN.0, AACHEN.1));

        let unprojected = converter.unproject(&projected).expect("always unprojects");
        assert_abs_diff_eq!(unprojected, point, epsilon = 1e-6);
    }

    #[test]
    fn inverse_accepts_nalgebra_points() {
        let converter = centered_at(50.0, 6.0);
        let point = nalgebra::Point2::new(1000.0, 2000.0);
        assert_eq!(converter.inverse_point(&point), converter.inverse(1000.0, 2000.0));
    }

    #[test]
    fn single_precision_round_trip() {
        let converter = GeodesicConverterF32::bound(Fixed(50.0), Fixed(6.0));
        let offset = converter.forward(50.1, 6.1);
        let back = converter.inverse(offset.x(), offset.y());
        assert_abs_diff_eq!(back, GeoPoint2d::latlon(50.1f32, 6.1), epsilon = 1e-3);
    }
}
