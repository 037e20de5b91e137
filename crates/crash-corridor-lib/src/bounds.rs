//! Axis-aligned bounding boxes over coordinate sequences
//!
//! The host uses a route's bounding box to query its spatial store for
//! candidate crashes before the corridor filter runs the precise test.

use crate::{CorridorError, Position, Result};

/// Kilometres per degree of latitude (and of longitude at the equator).
const KM_PER_DEGREE: f64 = 111.0;

/// Minimal axis-aligned box enclosing a set of positions.
///
/// A single-point input yields a degenerate box with min == max on both
/// axes; downstream code accepts that as a valid (empty-area) box.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Compute the bounding box of a non-empty coordinate sequence.
    ///
    /// Single O(n) pass: the first position seeds all four scalars, the rest
    /// widen them elementwise.
    ///
    /// # Errors
    ///
    /// [`CorridorError::EmptyInput`] if the sequence is empty.
    pub fn from_positions(positions: &[Position]) -> Result<Self> {
        let first = positions.first().ok_or(CorridorError::EmptyInput)?;

        let mut bounds = Self {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lng: first.lng,
            max_lng: first.lng,
        };

        for position in &positions[1..] {
            bounds.min_lat = bounds.min_lat.min(position.lat);
            bounds.max_lat = bounds.max_lat.max(position.lat);
            bounds.min_lng = bounds.min_lng.min(position.lng);
            bounds.max_lng = bounds.max_lng.max(position.lng);
        }

        Ok(bounds)
    }

    /// The box covering a circle of `radius_km` around `centre`.
    ///
    /// Used to fit the map view to a circular search area.
    pub fn around(centre: Position, radius_km: f64) -> Self {
        Self {
            min_lat: centre.lat,
            max_lat: centre.lat,
            min_lng: centre.lng,
            max_lng: centre.lng,
        }
        .padded_by_km(radius_km)
    }

    /// Widen the box by `pad_km` on every side.
    ///
    /// The longitude pad grows with latitude (degrees of longitude shrink
    /// towards the poles); above the Web Mercator latitude cap the latitude
    /// pad is reused as-is.
    pub fn padded_by_km(&self, pad_km: f64) -> Self {
        let lat_pad = pad_km / KM_PER_DEGREE;

        let mid_lat = (self.min_lat + self.max_lat) / 2.0;
        let lng_pad = if mid_lat.abs() > crate::projection::MAX_LATITUDE {
            lat_pad
        } else {
            pad_km / (KM_PER_DEGREE * mid_lat.to_radians().cos())
        };

        Self {
            min_lat: self.min_lat - lat_pad,
            max_lat: self.max_lat + lat_pad,
            min_lng: self.min_lng - lng_pad,
            max_lng: self.max_lng + lng_pad,
        }
    }

    /// Whether `position` lies inside the box, boundary included.
    pub fn contains(&self, position: Position) -> bool {
        (self.min_lat..=self.max_lat).contains(&position.lat)
            && (self.min_lng..=self.max_lng).contains(&position.lng)
    }

    /// The centre of the box.
    pub fn centre(&self) -> Position {
        Position::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag_route() -> Vec<Position> {
        vec![
            Position::new(0.0, 0.0),
            Position::new(0.0, 1.0),
            Position::new(1.0, 1.0),
        ]
    }

    #[test]
    fn test_empty_input_fails() {
        let result = BoundingBox::from_positions(&[]);
        assert!(matches!(result, Err(CorridorError::EmptyInput)));
    }

    #[test]
    fn test_single_point_yields_degenerate_box() {
        let bounds = BoundingBox::from_positions(&[Position::new(10.0, 20.0)]).unwrap();
        assert_eq!(bounds.min_lat, 10.0);
        assert_eq!(bounds.max_lat, 10.0);
        assert_eq!(bounds.min_lng, 20.0);
        assert_eq!(bounds.max_lng, 20.0);
    }

    #[test]
    fn test_bounds_contain_every_input() {
        let positions = vec![
            Position::new(-43.52, 172.58),
            Position::new(-43.61, 172.71),
            Position::new(-43.48, 172.49),
        ];
        let bounds = BoundingBox::from_positions(&positions).unwrap();

        assert!(bounds.min_lat <= bounds.max_lat);
        assert!(bounds.min_lng <= bounds.max_lng);
        for position in &positions {
            assert!(bounds.contains(*position));
        }
    }

    #[test]
    fn test_bounds_are_minimal() {
        let bounds = BoundingBox::from_positions(&zigzag_route()).unwrap();
        assert_eq!(bounds.min_lat, 0.0);
        assert_eq!(bounds.max_lat, 1.0);
        assert_eq!(bounds.min_lng, 0.0);
        assert_eq!(bounds.max_lng, 1.0);
    }

    #[test]
    fn test_padding_widens_every_side() {
        let bounds = BoundingBox::from_positions(&zigzag_route()).unwrap();
        let padded = bounds.padded_by_km(111.0);

        // 111 km is one degree of latitude.
        assert!((padded.min_lat - -1.0).abs() < 1e-9);
        assert!((padded.max_lat - 2.0).abs() < 1e-9);
        assert!(padded.min_lng < bounds.min_lng);
        assert!(padded.max_lng > bounds.max_lng);
    }

    #[test]
    fn test_longitude_pad_widens_towards_poles() {
        let equator = BoundingBox::around(Position::new(0.0, 10.0), 10.0);
        let north = BoundingBox::around(Position::new(60.0, 10.0), 10.0);

        let equator_span = equator.max_lng - equator.min_lng;
        let north_span = north.max_lng - north.min_lng;
        // cos(60°) = 0.5, so the span roughly doubles.
        assert!(north_span > equator_span * 1.9);
    }

    #[test]
    fn test_centre_of_degenerate_box_is_the_point() {
        let bounds = BoundingBox::from_positions(&[Position::new(10.0, 20.0)]).unwrap();
        assert_eq!(bounds.centre(), Position::new(10.0, 20.0));
    }
}
