use tracing::{debug, trace};

use crate::core::{GeoPoint, OverlayGeometry, ScreenPoint};
use crate::error::SyncResult;
use crate::extensions::SyncEvent;
use crate::host::{CameraTarget, ChartWidget, SceneView};
use crate::interaction::{DragAction, DragCommand, DragEvent, DragInput, DragPhase, EventDisposition};
use crate::query::PendingQuery;

use super::SyncEngine;
use super::validation::{validate_screen_point, validate_zoom};

/// Result of forwarding one scene drag event.
#[derive(Debug, Clone, PartialEq)]
pub struct DragOutcome {
    pub disposition: EventDisposition,
    /// Query issued when a buffer drag ends on a known point.
    pub query: Option<PendingQuery>,
}

impl DragOutcome {
    fn propagate() -> Self {
        Self {
            disposition: EventDisposition::Propagate,
            query: None,
        }
    }

    fn stop() -> Self {
        Self {
            disposition: EventDisposition::StopPropagation,
            query: None,
        }
    }
}

impl<S: SceneView, C: ChartWidget> SyncEngine<S, C> {
    #[must_use]
    pub fn point_of_interest(&self) -> Option<GeoPoint> {
        self.core.geo.point_of_interest()
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.core.geo.zoom()
    }

    #[must_use]
    pub fn overlay(&self) -> Option<&OverlayGeometry> {
        self.core.overlay.as_ref()
    }

    #[must_use]
    pub fn drag_phase(&self) -> DragPhase {
        self.core.geo.drag_phase()
    }

    #[must_use]
    pub fn zoom_update_pending(&self) -> bool {
        self.core.geo.zoom_update_pending()
    }

    /// First view-ready callback: centre on the default point, draw the
    /// overlay and issue the initial query.
    pub fn view_ready(&mut self) -> SyncResult<PendingQuery> {
        let point = self.core.config.default_point;
        let zoom = self.core.config.default_zoom;
        self.core.geo.set_zoom(zoom);
        self.scene.go_to(CameraTarget::Center {
            point,
            zoom: Some(zoom),
        });
        self.select_point(point)
    }

    /// Plain click on the globe. Clicks that hit no map coordinate are ignored.
    pub fn on_map_click(&mut self, screen: ScreenPoint) -> SyncResult<Option<PendingQuery>> {
        let screen = validate_screen_point(screen)?;
        let Some(point) = self.scene.screen_to_map(screen) else {
            trace!(x = screen.x, y = screen.y, "click hit no map coordinate");
            return Ok(None);
        };
        let snapped = point.snapped_to_grid(self.core.config.grid_step_degrees);
        self.select_point(snapped).map(Some)
    }

    /// Search result chosen: same as a click at `point`, plus a recentre.
    pub fn on_search_select(&mut self, point: GeoPoint) -> SyncResult<PendingQuery> {
        let snapped = point
            .validate()?
            .snapped_to_grid(self.core.config.grid_step_degrees);
        let pending = self.select_point(snapped)?;
        self.scene.go_to(CameraTarget::Center {
            point: snapped,
            zoom: None,
        });
        Ok(pending)
    }

    /// Scene drag event. The host must stop native camera handling when the
    /// outcome says `StopPropagation`.
    pub fn on_drag(&mut self, event: DragEvent) -> SyncResult<DragOutcome> {
        match event.action {
            DragAction::Start => {
                let screen = validate_screen_point(event.screen)?;
                if self.camera_snapshot.take().is_some() {
                    debug!("previous drag never ended, dropping its camera snapshot");
                }
                let DragCommand::ResolveContainment(start) =
                    self.core.geo.drag_transition(DragInput::Start(screen))
                else {
                    return Ok(DragOutcome::propagate());
                };
                let inside = match (&self.core.overlay, self.scene.screen_to_map(start)) {
                    (Some(overlay), Some(point)) => overlay.contains(point),
                    _ => false,
                };
                match self
                    .core
                    .geo
                    .drag_transition(DragInput::ContainmentResolved { inside })
                {
                    DragCommand::CaptureGesture => {
                        self.camera_snapshot = Some(self.scene.camera_snapshot());
                        debug!("drag captured inside buffer");
                        Ok(DragOutcome::stop())
                    }
                    _ => Ok(DragOutcome::propagate()),
                }
            }
            DragAction::Update => {
                let capturing = self.core.geo.drag_phase() == DragPhase::DraggingInsideBuffer;
                let point = self.scene.screen_to_map(event.screen);
                if let DragCommand::MoveOverlay(point) =
                    self.core.geo.drag_transition(DragInput::Update(point))
                {
                    self.core.geo.set_point_of_interest(point);
                    self.redraw_overlay();
                }
                Ok(if capturing {
                    DragOutcome::stop()
                } else {
                    DragOutcome::propagate()
                })
            }
            DragAction::End => match self.core.geo.drag_transition(DragInput::End) {
                DragCommand::Finish { last_known } => {
                    if let Some(camera) = self.camera_snapshot.take() {
                        self.scene.go_to(CameraTarget::Snapshot(camera));
                    }
                    let query = last_known
                        .map(|point| self.select_point(point))
                        .transpose()?;
                    Ok(DragOutcome {
                        disposition: EventDisposition::StopPropagation,
                        query,
                    })
                }
                _ => Ok(DragOutcome::propagate()),
            },
        }
    }

    /// Zoom level changed. With a point selected the overlay resize is
    /// debounced through `advance_timers`; zoom never re-queries data.
    pub fn on_zoom_changed(&mut self, zoom: f64) -> SyncResult<()> {
        let zoom = validate_zoom(zoom)?;
        if self.core.geo.point_of_interest().is_some() {
            self.core.geo.push_zoom(zoom);
        } else {
            self.core.geo.set_zoom(zoom);
        }
        Ok(())
    }

    /// Advances timers that run regardless of playback state.
    ///
    /// Currently this is only the zoom debounce. Called by `tick`; a paused
    /// host drives it from its own timer. Returns `true` when the overlay was
    /// resized.
    pub fn advance_timers(&mut self, delta_ms: f64) -> bool {
        let Some(zoom) = self.core.geo.step_zoom_debounce(delta_ms) else {
            return false;
        };
        self.core.geo.set_zoom(zoom);
        self.redraw_overlay();
        true
    }

    fn select_point(&mut self, point: GeoPoint) -> SyncResult<PendingQuery> {
        let point = point.validate()?;
        self.core.geo.set_point_of_interest(point);
        self.redraw_overlay();
        self.emit_event(SyncEvent::PointSelected { point });
        self.issue_query(point)
    }

    fn redraw_overlay(&mut self) {
        let Some(center) = self.core.geo.point_of_interest() else {
            return;
        };
        let overlay = OverlayGeometry::build(center, self.core.geo.zoom(), self.core.config.overlay);
        self.scene.draw_overlay(&overlay);
        let radius_km = overlay.radius_km;
        debug!(
            longitude = center.longitude,
            latitude = center.latitude,
            radius_km,
            "overlay recomputed"
        );
        self.core.overlay = Some(overlay);
        self.emit_event(SyncEvent::OverlayUpdated { radius_km });
    }
}
