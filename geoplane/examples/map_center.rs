//! This example walks through the converter API with a map center that moves while the
//! converter is alive.
//!
//! ```shell
//! RUST_LOG=debug cargo run --example map_center
//! ```

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use geoplane::cartesian::{CartesianPoint2d, CartesianPoint2dFloat};
use geoplane::geo::GeoPoint;
use geoplane::GeodesicConverterF32;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Map center, can be moved at any moment
    let center_lat = Rc::new(Cell::new(0.0f32));
    let center_lon = Rc::new(Cell::new(0.0f32));

    let mut converter = GeodesicConverterF32::bound(center_lat.clone(), center_lon.clone());

    let point = converter.forward(50.774987, 6.085083);
    println!("X: {:.2}m", point.x());
    println!("Y: {:.2}m", point.y());

    center_lat.set(50.0);
    center_lon.set(6.0);

    let coordinates = converter.inverse(1000.0, 2000.0);
    println!("Latitude: {:.9}°", coordinates.lat());
    println!("Longitude: {:.9}°", coordinates.lon());

    let origin = converter.to_origin();
    println!("Center from origin: ({:.2}m, {:.2}m)", origin.x(), origin.y());

    let (start_lat, start_lon) = (50.774987, 6.085083);
    let (end_lat, end_lon) = (51.774987, 7.085083);

    let distance = converter.distance(start_lat, start_lon, end_lat, end_lon);
    println!("Distance: {distance:.2}m");

    let distances = converter.distances(start_lat, start_lon, end_lat, end_lon);
    println!("Distance in X: {:.2}m", distances.x());
    println!("Distance in Y: {:.2}m", distances.y());
    println!("Magnitude: {:.2}m", distances.magnitude());

    converter.set_earth_radius(6_371_000.0)?;
    let distance = converter.distance(start_lat, start_lon, end_lat, end_lon);
    println!("Distance on a 6371 km sphere: {distance:.2}m");

    Ok(())
}
