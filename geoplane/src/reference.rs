//! Live sources of the reference point coordinates.
//!
//! A converter never copies its reference point. It keeps a [`CoordinateSource`] for the latitude
//! and another for the longitude and reads them on every conversion, so an object moving across
//! the map can serve as the reference point without rebuilding the converter.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

/// Provides the current value of a coordinate, in degrees.
pub trait CoordinateSource<N> {
    /// Reads the value stored at the source right now.
    fn current(&self) -> N;
}

impl<N: Copy> CoordinateSource<N> for Rc<Cell<N>> {
    fn current(&self) -> N {
        self.get()
    }
}

impl<N: Copy> CoordinateSource<N> for Arc<RwLock<N>> {
    fn current(&self) -> N {
        *self.read()
    }
}

impl<N: Copy> CoordinateSource<N> for Arc<Mutex<N>> {
    fn current(&self) -> N {
        *self.lock()
    }
}

/// Coordinate that never changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fixed<N>(pub N);

impl<N: Copy> CoordinateSource<N> for Fixed<N> {
    fn current(&self) -> N {
        self.0
    }
}

/// Coordinate pulled from a closure on every read.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use geoplane::reference::{Accessor, CoordinateSource};
///
/// let position = Rc::new(Cell::new((50.0, 6.0)));
/// let shared = position.clone();
/// let latitude = Accessor(move || shared.get().0);
///
/// position.set((51.0, 7.0));
/// assert_eq!(latitude.current(), 51.0);
/// ```
#[derive(Clone, Copy)]
pub struct Accessor<F>(pub F);

impl<N, F: Fn() -> N> CoordinateSource<N> for Accessor<F> {
    fn current(&self) -> N {
        (self.0)()
    }
}

impl<F> std::fmt::Debug for Accessor<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Accessor(..)")
    }
}
