//! Map session state and the host-facing analysis pipeline
//!
//! One session owns the map widget, the corridor filter and the current
//! view mode. The host drives it synchronously:
//!
//! 1. [`MapSession::select_route`] shows the route request on the map;
//! 2. the routing service answers with a concrete path and the host calls
//!    [`MapSession::bounds_of_route`], which rebuilds the corridor and
//!    returns the box to query the spatial store with;
//! 3. the host passes the candidates from that query to
//!    [`MapSession::crashes_on_route`], which returns the indices of the
//!    crashes actually on the route and draws them.
//!
//! Steps 2 and 3 are the host boundary contract; everything else is
//! presentation.

use crate::{MapCommand, MapWidget, Result, Severity, TransportMode};
use crash_corridor_lib::{
    BoundingBox, CorridorFilter, DEFAULT_BUFFER_KM, Position, SelectedRoute,
};

/// How crashes are presented on the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Nothing drawn yet.
    #[default]
    Empty,
    /// Clustered crash markers over a circular search area.
    Cluster,
    /// Severity-weighted heat layer over a circular search area.
    Heatmap,
    /// Plain markers for an already-filtered crash set.
    FilterPoints,
}

/// A crash with the metadata the map needs to draw it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrashPoint {
    pub position: Position,
    pub severity: Severity,
}

/// The circular search area selected by the user.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaSearch {
    pub centre: Position,
    pub radius_km: f64,
}

/// Owns the widget, the corridor filter and the current view state.
pub struct MapSession<W: MapWidget> {
    widget: W,
    corridor: CorridorFilter,
    view_mode: ViewMode,
    area: Option<AreaSearch>,
    buffer_km: f64,
}

impl<W: MapWidget> MapSession<W> {
    /// Create a session drawing on `widget`, with the default corridor
    /// width.
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            corridor: CorridorFilter::new(),
            view_mode: ViewMode::default(),
            area: None,
            buffer_km: DEFAULT_BUFFER_KM,
        }
    }

    /// Override the corridor half-width in kilometres.
    pub fn with_buffer_km(mut self, buffer_km: f64) -> Self {
        self.buffer_km = buffer_km;
        self
    }

    /// The current view mode.
    #[inline]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// The current circular search area, if one is set.
    #[inline]
    pub fn area(&self) -> Option<AreaSearch> {
        self.area
    }

    /// Show a route request between the given waypoints on the map.
    ///
    /// Clears previous layers, fits the view to the waypoints and asks the
    /// widget's routing layer for a path. The corridor is not built yet;
    /// that happens in [`bounds_of_route`](Self::bounds_of_route) once the
    /// routing service has picked the actual path.
    pub fn select_route(&mut self, route: &SelectedRoute, mode: TransportMode) -> Result<()> {
        self.clear_display();
        self.view_mode = ViewMode::Empty;

        let bounds = BoundingBox::from_positions(route.waypoints())?;
        self.widget.apply(MapCommand::FitBounds(bounds));
        self.widget.apply(MapCommand::ShowRoute {
            waypoints: route.waypoints().to_vec(),
            mode,
        });
        Ok(())
    }

    /// The routing service selected a concrete path: rebuild the corridor
    /// around it and return the box for the host's candidate query.
    ///
    /// Stale markers from a previous analysis are removed before the
    /// corridor is replaced, so nothing drawn ever reflects a mix of the
    /// two routes.
    pub fn bounds_of_route(&mut self, route: &SelectedRoute) -> Result<BoundingBox> {
        self.widget.apply(MapCommand::RemoveCrashMarkers);
        self.corridor.set_route(route.waypoints(), self.buffer_km)?;
        let bounds = BoundingBox::from_positions(route.waypoints())?;
        tracing::debug!(waypoints = route.len(), "corridor rebuilt for selected route");
        Ok(bounds)
    }

    /// [`bounds_of_route`](Self::bounds_of_route) for a serialized
    /// route-selection event: a JSON array of `{"lat": .., "lng": ..}`
    /// objects in path order.
    pub fn bounds_of_route_json(&mut self, payload: &str) -> Result<BoundingBox> {
        let waypoints: Vec<Position> = serde_json::from_str(payload)?;
        self.bounds_of_route(&SelectedRoute::new(waypoints))
    }

    /// Filter the host's candidate batch down to the crashes on the route.
    ///
    /// Returns ascending 0-based indices into `candidates`; the matching
    /// positions are drawn as crash markers. The host maps the indices back
    /// to its own crash records.
    pub fn crashes_on_route(&mut self, candidates: &[Position]) -> Result<Vec<usize>> {
        let inside = self.corridor.filter_within(candidates)?;
        let markers: Vec<Position> = inside.iter().map(|&index| candidates[index]).collect();
        tracing::debug!(
            candidates = candidates.len(),
            matched = markers.len(),
            "corridor filter applied"
        );

        self.widget.apply(MapCommand::AddCrashMarkers(markers));
        self.widget.apply(MapCommand::ShowCrashMarkers);
        self.mark_filtered();
        Ok(inside)
    }

    /// Discard the current route, its corridor and its map layer.
    pub fn clear_route(&mut self) {
        self.corridor.clear_route();
        self.widget.apply(MapCommand::RemoveRoute);
    }

    /// Start an area analysis around `centre`.
    pub fn set_area(&mut self, centre: Position, radius_km: f64, view_mode: ViewMode) {
        self.area = Some(AreaSearch { centre, radius_km });
        self.view_mode = view_mode;
    }

    /// Redraw the given crashes according to the current view mode.
    ///
    /// Crashes at exactly (0, 0) have no recorded location and are skipped.
    pub fn refresh(&mut self, crashes: &[CrashPoint]) {
        match self.view_mode {
            ViewMode::Empty => {}
            ViewMode::Cluster => {
                self.clear_display();
                let markers = located_positions(crashes);
                self.widget.apply(MapCommand::AddCrashMarkers(markers));
                self.widget.apply(MapCommand::ShowCrashMarkers);
                self.show_area_circle();
            }
            ViewMode::Heatmap => {
                self.clear_display();
                for crash in crashes.iter().filter(|crash| is_located(crash)) {
                    self.widget.apply(MapCommand::AddHeatPoint {
                        position: crash.position,
                        weight: crash.severity.heat_weight(),
                    });
                }
                if let Some(area) = self.area {
                    self.widget.apply(MapCommand::ShowHeatLayer {
                        centre: area.centre,
                        radius_km: area.radius_km,
                    });
                    self.widget
                        .apply(MapCommand::FitBounds(BoundingBox::around(
                            area.centre,
                            area.radius_km,
                        )));
                }
            }
            ViewMode::FilterPoints => {
                self.widget.apply(MapCommand::RemoveCrashMarkers);
                let markers = located_positions(crashes);
                self.widget.apply(MapCommand::AddCrashMarkers(markers));
                self.widget.apply(MapCommand::ShowCrashMarkers);
            }
        }
    }

    /// Once a route filter has been applied, cluster and empty views become
    /// plain filtered points.
    fn mark_filtered(&mut self) {
        if matches!(self.view_mode, ViewMode::Cluster | ViewMode::Empty) {
            self.view_mode = ViewMode::FilterPoints;
        }
    }

    fn show_area_circle(&mut self) {
        if let Some(area) = self.area {
            self.widget.apply(MapCommand::ShowAreaCircle {
                centre: area.centre,
                radius_km: area.radius_km,
            });
            self.widget
                .apply(MapCommand::FitBounds(BoundingBox::around(
                    area.centre,
                    area.radius_km,
                )));
        }
    }

    fn clear_display(&mut self) {
        self.widget.apply(MapCommand::RemoveCrashMarkers);
        self.widget.apply(MapCommand::RemoveHeatLayer);
        self.widget.apply(MapCommand::RemoveAreaCircle);
    }
}

fn is_located(crash: &CrashPoint) -> bool {
    crash.position.lat != 0.0 || crash.position.lng != 0.0
}

fn located_positions(crashes: &[CrashPoint]) -> Vec<Position> {
    crashes
        .iter()
        .filter(|crash| is_located(crash))
        .map(|crash| crash.position)
        .collect()
}
