//! Crash Corridor Library - Route Corridor Analysis for Crash Map Data
//!
//! This library decides which crash locations lie along a route chosen on the
//! map. The host supplies the selected route's waypoints; the library answers
//! with a bounding box for querying candidate crashes from a spatial store,
//! and then filters those candidates down to the ones inside a buffered
//! corridor around the route's path.
//!
//! # Architecture
//!
//! - **[`Position`]**: WGS84 latitude/longitude value type
//! - **[`SelectedRoute`]**: the ordered waypoints of the current route
//! - **[`BoundingBox`]**: minimal axis-aligned box around a coordinate sequence
//! - **[`CorridorFilter`]**: owns the corridor of the current route and tests
//!   candidate membership
//!
//! The filter holds at most one corridor at a time. Selecting a new route
//! replaces the corridor wholesale, so a membership query always runs against
//! the corridor of the most recently selected route, never a stale or mixed
//! one.
//!
//! All geometry runs internally in Web Mercator metres with (x, y) =
//! (easting, northing); the latitude/longitude order used by callers is
//! converted exactly once, in [`projection`].

mod bounds;
mod corridor;
mod position;
pub mod projection;
mod route;

// Public API exports
pub use bounds::BoundingBox;
pub use corridor::{CorridorFilter, DEFAULT_BUFFER_KM};
pub use position::Position;
pub use route::SelectedRoute;

/// Error types for corridor analysis
#[derive(Debug, thiserror::Error)]
pub enum CorridorError {
    #[error("empty coordinate sequence")]
    EmptyInput,

    #[error("a route needs at least 2 waypoints, got {points}")]
    DegenerateRoute { points: usize },

    #[error("buffer distance must be a positive number of kilometres, got {0}")]
    InvalidBufferDistance(f64),

    #[error("no route selected")]
    NoRoute,
}

pub type Result<T> = std::result::Result<T, CorridorError>;
