mod debounce;
mod drag;
mod touch;

pub use debounce::Debouncer;
pub use drag::{DragCommand, DragInput, DragMachine, DragPhase};
pub use touch::{TouchGesture, TouchPhase, TouchTracker};

use serde::{Deserialize, Serialize};

use crate::core::{GeoPoint, ScreenPoint};

/// Drag event actions forwarded by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragAction {
    Start,
    Update,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragEvent {
    pub action: DragAction,
    pub screen: ScreenPoint,
}

impl DragEvent {
    #[must_use]
    pub fn new(action: DragAction, x: f64, y: f64) -> Self {
        Self {
            action,
            screen: ScreenPoint::new(x, y),
        }
    }
}

/// Whether the host should let the scene handle an event natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventDisposition {
    Propagate,
    StopPropagation,
}

/// Geo-interaction state: point of interest, current zoom and drag machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoInteractionState {
    point_of_interest: Option<GeoPoint>,
    zoom: f64,
    drag: DragMachine,
    zoom_debounce: Debouncer<f64>,
}

impl GeoInteractionState {
    #[must_use]
    pub fn new(initial_zoom: f64, zoom_debounce_ms: f64) -> Self {
        Self {
            point_of_interest: None,
            zoom: initial_zoom,
            drag: DragMachine::default(),
            zoom_debounce: Debouncer::new(zoom_debounce_ms),
        }
    }

    #[must_use]
    pub fn point_of_interest(self) -> Option<GeoPoint> {
        self.point_of_interest
    }

    pub fn set_point_of_interest(&mut self, point: GeoPoint) {
        self.point_of_interest = Some(point);
    }

    #[must_use]
    pub fn zoom(self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    #[must_use]
    pub fn drag_phase(self) -> DragPhase {
        self.drag.phase()
    }

    pub fn drag_transition(&mut self, input: DragInput) -> DragCommand {
        self.drag.transition(input)
    }

    pub fn push_zoom(&mut self, zoom: f64) {
        self.zoom_debounce.push(zoom);
    }

    #[must_use]
    pub fn zoom_update_pending(self) -> bool {
        self.zoom_debounce.is_pending()
    }

    /// Advances the zoom debouncer; returns the settled zoom level.
    pub fn step_zoom_debounce(&mut self, delta_ms: f64) -> Option<f64> {
        self.zoom_debounce.tick(delta_ms)
    }
}
