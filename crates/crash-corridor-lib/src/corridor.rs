//! Corridor membership around the selected route
//!
//! A corridor is the region within a fixed buffer distance of the route's
//! path. It is built once per route selection as a low-fidelity buffer: one
//! rectangle per path segment plus one square cap per waypoint, in Web
//! Mercator metres. The square caps circumscribe the exact round joins and
//! end caps, so the region is a conservative superset of the true buffer at
//! the corners and exact along the segments.
//!
//! Membership is a boundary-inclusive point-in-polygon test against any part
//! of the region, delegated to [`geo::Intersects`]. Parts overlap freely,
//! which makes a union operation unnecessary.

use crate::{projection, BoundingBox, CorridorError, Position, Result};
use geo::{Coord, Intersects, LineString, MultiPolygon, Point, Polygon};

/// Default corridor half-width in kilometres for route crash analysis.
pub const DEFAULT_BUFFER_KM: f64 = 0.05;

/// Holds at most one corridor, derived from the most recently selected
/// route.
///
/// Selecting a new route replaces the corridor in a single assignment, so a
/// membership query never sees a mix of old and new geometry. Use an
/// exclusive reference (or wrap the filter in a lock) if route selection and
/// filtering can race.
#[derive(Debug, Default)]
pub struct CorridorFilter {
    current: Option<Corridor>,
}

impl CorridorFilter {
    /// Create a filter with no route selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a route is currently selected.
    #[inline]
    pub fn has_route(&self) -> bool {
        self.current.is_some()
    }

    /// Build the corridor for a newly selected route, replacing any
    /// previous one.
    ///
    /// The path through `waypoints` is buffered outward by `buffer_km`
    /// kilometres of ground distance on all sides.
    ///
    /// # Errors
    ///
    /// - [`CorridorError::DegenerateRoute`] if fewer than 2 waypoints are
    ///   supplied; a corridor around a single point is not meaningful.
    /// - [`CorridorError::InvalidBufferDistance`] if `buffer_km` is not a
    ///   positive finite number.
    pub fn set_route(&mut self, waypoints: &[Position], buffer_km: f64) -> Result<()> {
        if waypoints.len() < 2 {
            return Err(CorridorError::DegenerateRoute {
                points: waypoints.len(),
            });
        }
        if !buffer_km.is_finite() || buffer_km <= 0.0 {
            return Err(CorridorError::InvalidBufferDistance(buffer_km));
        }

        for waypoint in waypoints {
            if !waypoint.is_valid() {
                tracing::warn!(
                    "route waypoint outside WGS84 bounds: ({}, {})",
                    waypoint.lat,
                    waypoint.lng
                );
            }
        }

        let bounds = BoundingBox::from_positions(waypoints)?;
        // Mercator inflates ground distance away from the equator; widen the
        // radius so the corridor keeps its ground width at the route's
        // latitude.
        let radius_m = buffer_km * 1000.0 * projection::length_scale(bounds.centre().lat);

        self.current = Some(Corridor::build(waypoints, radius_m));
        Ok(())
    }

    /// Discard the current route and corridor.
    ///
    /// Subsequent [`filter_within`](Self::filter_within) calls fail with
    /// [`CorridorError::NoRoute`] until a route is selected again.
    pub fn clear_route(&mut self) {
        self.current = None;
    }

    /// Indices of the candidates inside the current corridor, ascending.
    ///
    /// Boundary points count as inside. The input is not mutated; indices
    /// are 0-based positions in `candidates`.
    ///
    /// # Errors
    ///
    /// [`CorridorError::NoRoute`] if no route is currently selected.
    pub fn filter_within(&self, candidates: &[Position]) -> Result<Vec<usize>> {
        let corridor = self.current.as_ref().ok_or(CorridorError::NoRoute)?;

        Ok(candidates
            .iter()
            .enumerate()
            .filter(|(_, candidate)| corridor.contains(**candidate))
            .map(|(index, _)| index)
            .collect())
    }
}

/// The buffered region around one route, in Web Mercator metres.
#[derive(Clone, Debug)]
struct Corridor {
    region: MultiPolygon<f64>,
}

impl Corridor {
    fn build(waypoints: &[Position], radius_m: f64) -> Self {
        let path: Vec<Coord<f64>> = waypoints
            .iter()
            .map(|&waypoint| projection::to_mercator(waypoint))
            .collect();

        let mut parts = Vec::with_capacity(path.len() * 2 - 1);
        for &vertex in &path {
            parts.push(square_around(vertex, radius_m));
        }
        for pair in path.windows(2) {
            if let Some(quad) = segment_quad(pair[0], pair[1], radius_m) {
                parts.push(quad);
            }
        }

        Self {
            region: MultiPolygon::new(parts),
        }
    }

    fn contains(&self, position: Position) -> bool {
        let point = Point::from(projection::to_mercator(position));
        self.region.intersects(&point)
    }
}

/// Axis-aligned square cap centred on a waypoint.
fn square_around(centre: Coord<f64>, half_width: f64) -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![
            (centre.x - half_width, centre.y - half_width),
            (centre.x + half_width, centre.y - half_width),
            (centre.x + half_width, centre.y + half_width),
            (centre.x - half_width, centre.y + half_width),
        ]),
        vec![],
    )
}

/// Rectangle extending `half_width` to each side of one path segment.
///
/// Returns `None` for a zero-length segment (consecutive duplicate
/// waypoints); the vertex cap already covers that spot.
fn segment_quad(start: Coord<f64>, end: Coord<f64>, half_width: f64) -> Option<Polygon<f64>> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length = dx.hypot(dy);
    if length == 0.0 {
        return None;
    }

    let nx = -dy / length * half_width;
    let ny = dx / length * half_width;
    Some(Polygon::new(
        LineString::from(vec![
            (start.x + nx, start.y + ny),
            (end.x + nx, end.y + ny),
            (end.x - nx, end.y - ny),
            (start.x - nx, start.y - ny),
        ]),
        vec![],
    ))
}
