//! The route currently selected on the map
//!
//! A route is the ordered coordinate path the routing service returned for
//! the user's start and end addresses. It is replaced wholesale whenever a
//! new route is selected, and cleared explicitly when the analysis ends.

use crate::Position;

/// An ordered sequence of waypoints from a start to an end point.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectedRoute {
    waypoints: Vec<Position>,
}

impl SelectedRoute {
    /// Create a route from waypoints in order, first to last.
    pub fn new(waypoints: Vec<Position>) -> Self {
        Self { waypoints }
    }

    /// Create a route directly between two geocoded endpoints.
    pub fn between(start: Position, end: Position) -> Self {
        Self {
            waypoints: vec![start, end],
        }
    }

    /// Append a waypoint to the end of the route.
    pub fn append(&mut self, point: Position) {
        self.waypoints.push(point);
    }

    /// Drop all waypoints.
    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    /// The waypoints in order.
    #[inline]
    pub fn waypoints(&self) -> &[Position] {
        &self.waypoints
    }

    /// Number of waypoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the route has no waypoints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_builds_two_point_route() {
        let route = SelectedRoute::between(Position::new(-43.52, 172.58), Position::new(-43.53, 172.62));
        assert_eq!(route.len(), 2);
        assert_eq!(route.waypoints()[0], Position::new(-43.52, 172.58));
    }

    #[test]
    fn test_append_preserves_order() {
        let mut route = SelectedRoute::default();
        route.append(Position::new(0.0, 0.0));
        route.append(Position::new(0.0, 1.0));
        route.append(Position::new(1.0, 1.0));

        let lats: Vec<f64> = route.waypoints().iter().map(|p| p.lat).collect();
        assert_eq!(lats, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_clear_empties_route() {
        let mut route = SelectedRoute::between(Position::new(1.0, 2.0), Position::new(3.0, 4.0));
        route.clear();
        assert!(route.is_empty());
    }
}
