//! Commands consumed by the interactive map widget
//!
//! The widget (a Leaflet view, an egui map, a test double) receives plain
//! draw/clear instructions. Commands carry geometry only; tile sources,
//! icons, clustering and other styling stay on the widget's side. There are
//! no invariants beyond last write wins.

use crash_corridor_lib::{BoundingBox, Position};
use serde::{Deserialize, Serialize};

/// Travel profile forwarded to the routing service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Car,
    Bike,
    Walk,
}

impl TransportMode {
    /// The vehicle parameter understood by the routing backend.
    pub fn vehicle(&self) -> &'static str {
        match self {
            TransportMode::Car => "car",
            TransportMode::Bike => "bike",
            TransportMode::Walk => "walk",
        }
    }
}

/// A single draw or clear instruction for the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MapCommand {
    /// Stage crash markers at the given positions.
    AddCrashMarkers(Vec<Position>),
    /// Make the staged crash markers visible.
    ShowCrashMarkers,
    /// Remove all crash markers from the map.
    RemoveCrashMarkers,

    /// Stage one heat point; `weight` is in [0, 1], 1 being most severe.
    AddHeatPoint { position: Position, weight: f64 },
    /// Display the heat layer over a circular search area.
    ShowHeatLayer { centre: Position, radius_km: f64 },
    /// Remove the heat layer.
    RemoveHeatLayer,

    /// Display the circular search area.
    ShowAreaCircle { centre: Position, radius_km: f64 },
    /// Remove the circular search area.
    RemoveAreaCircle,

    /// Request and display a route through the waypoints.
    ShowRoute {
        waypoints: Vec<Position>,
        mode: TransportMode,
    },
    /// Remove the displayed route, if any.
    RemoveRoute,

    /// Fit the visible view to the given bounds.
    FitBounds(BoundingBox),
}

/// Rendering surface for the crash map.
///
/// Implementations apply each command to whatever actually draws the map.
pub trait MapWidget {
    fn apply(&mut self, command: MapCommand);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_mode_vehicle_names() {
        assert_eq!(TransportMode::Car.vehicle(), "car");
        assert_eq!(TransportMode::Bike.vehicle(), "bike");
        assert_eq!(TransportMode::Walk.vehicle(), "walk");
    }

    #[test]
    fn test_transport_mode_serializes_lowercase() {
        let json = serde_json::to_string(&TransportMode::Bike).unwrap();
        assert_eq!(json, "\"bike\"");
    }

    #[test]
    fn test_commands_roundtrip_through_json() {
        let command = MapCommand::ShowHeatLayer {
            centre: Position::new(-43.52, 172.58),
            radius_km: 5.0,
        };
        let json = serde_json::to_string(&command).unwrap();
        let back: MapCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, command);
    }
}
