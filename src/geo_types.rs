//! Conversions between [`Coord`] and [`geo_types`] coordinates and points.
//!
//! ```rust
//! # use approx::assert_relative_eq;
//! use proj_ctx::{Context, Coord};
//!
//! let pj = Context::new()
//!     .new_crs_to_crs("EPSG:2230", "EPSG:26946", None)
//!     .unwrap();
//! let result = pj
//!     .forward(Coord::from(geo_types::coord! { x: 4760096.421921f64, y: 3744293.729449f64 }))
//!     .unwrap();
//! let result: geo_types::Coord<f64> = result.to_geo();
//! assert_relative_eq!(result.x, 1450880.29f64, epsilon = 1.0e-2);
//! assert_relative_eq!(result.y, 1141263.01f64, epsilon = 1.0e-2);
//! ```

use crate::coord::Coord;
use geo_types::CoordFloat;
use num_traits::NumCast;

fn to_f64<T: CoordFloat>(value: T) -> f64 {
    <f64 as NumCast>::from(value).unwrap_or(f64::NAN)
}

fn from_f64<T: CoordFloat>(value: f64) -> T {
    <T as NumCast>::from(value).unwrap_or_else(T::nan)
}

impl<T: CoordFloat> From<geo_types::Coord<T>> for Coord {
    fn from(coord: geo_types::Coord<T>) -> Self {
        Coord::new(to_f64(coord.x), to_f64(coord.y), 0.0, 0.0)
    }
}

impl<T: CoordFloat> From<geo_types::Point<T>> for Coord {
    fn from(point: geo_types::Point<T>) -> Self {
        Coord::from(point.0)
    }
}

impl Coord {
    /// The first two components as a `geo_types` coordinate. Values that do not fit
    /// `T` become NaN.
    pub fn to_geo<T: CoordFloat>(self) -> geo_types::Coord<T> {
        geo_types::Coord {
            x: from_f64(self.x()),
            y: from_f64(self.y()),
        }
    }

    /// The first two components as a `geo_types` point.
    pub fn to_geo_point<T: CoordFloat>(self) -> geo_types::Point<T> {
        geo_types::Point(self.to_geo())
    }
}
