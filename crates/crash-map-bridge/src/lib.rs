//! Crash Map Bridge - Host and Widget Glue for Route Crash Analysis
//!
//! This crate sits between three parties:
//!
//! - the **host application**, which owns the crash records and their
//!   spatial store;
//! - the **map widget**, which renders markers, heat layers, circles and
//!   routes (consumed through the [`MapWidget`] trait — no widget is
//!   rendered in-process);
//! - the **geometry core** in `crash-corridor-lib`, which answers the one
//!   nontrivial question: which crashes lie within the corridor around the
//!   selected route.
//!
//! [`MapSession`] drives the whole exchange as an explicit synchronous
//! pipeline: route selected → bounding box returned to the host → host
//! queries candidates → candidates filtered → matching indices returned and
//! drawn. [`Geolocator`] resolves the start/end addresses the user typed
//! into positions before a route is requested.

mod geocode;
mod session;
mod severity;
mod widget;

// Public API exports
pub use geocode::Geolocator;
pub use session::{AreaSearch, CrashPoint, MapSession, ViewMode};
pub use severity::Severity;
pub use widget::{MapCommand, MapWidget, TransportMode};

/// Error types for the bridge layer
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Corridor(#[from] crash_corridor_lib::CorridorError),

    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no location found for address: {address}")]
    AddressNotFound { address: String },

    #[error("geocoder returned HTTP status {status}")]
    GeocoderStatus { status: u16 },

    #[error("malformed route selection payload: {0}")]
    RoutePayload(#[from] serde_json::Error),

    #[error("unknown crash severity: {0}")]
    UnknownSeverity(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
