//! WGS84 to Web Mercator conversion
//!
//! Corridor geometry runs in Web Mercator metres (EPSG:3857), where the
//! axis order is (x, y) = (easting, northing), i.e. (lng, lat). This module
//! is the only place that order is swapped; callers everywhere else deal in
//! [`Position`] with its (lat, lng) fields.

use crate::Position;
use geo::Coord;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

/// Maximum latitude representable in Web Mercator.
pub const MAX_LATITUDE: f64 = 85.05112878;

/// Spherical earth radius in metres used by the projection.
const EARTH_RADIUS_M: f64 = 6378137.0;

/// Project a position to Web Mercator metres.
///
/// Latitude is clamped to the Web Mercator range before projecting.
#[inline]
pub fn to_mercator(position: Position) -> Coord<f64> {
    let lat = position.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    Coord {
        x: EARTH_RADIUS_M * position.lng.to_radians(),
        y: EARTH_RADIUS_M * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln(),
    }
}

/// Invert [`to_mercator`].
#[inline]
pub fn from_mercator(coord: Coord<f64>) -> Position {
    Position::new(
        (2.0 * (coord.y / EARTH_RADIUS_M).exp().atan() - FRAC_PI_2).to_degrees(),
        (coord.x / EARTH_RADIUS_M).to_degrees(),
    )
}

/// Factor by which Web Mercator stretches ground distance at `lat` degrees.
///
/// 1.0 at the equator, ~1.4 at 45°, 2.0 at 60°. Ground-distance radii must
/// be multiplied by this before being used as Mercator lengths.
#[inline]
pub fn length_scale(lat: f64) -> f64 {
    1.0 / lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians().cos()
}
