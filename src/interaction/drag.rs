use serde::{Deserialize, Serialize};

use crate::core::{GeoPoint, ScreenPoint};

/// Phase of the globe drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Drag started; waiting for the buffer containment answer.
    ConsideringDragStart,
    DraggingInsideBuffer,
    /// Native camera pan owns the gesture.
    DraggingOutside,
}

/// Inputs accepted by the drag state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragInput {
    Start(ScreenPoint),
    /// Result of converting the start point and testing it against the overlay.
    ContainmentResolved { inside: bool },
    /// Pointer moved; `point` is the map coordinate under it, if any.
    Update(Option<GeoPoint>),
    End,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragCommand {
    /// Test whether the start point falls inside the current overlay.
    ResolveContainment(ScreenPoint),
    /// Stop the scene's native camera drag and snapshot the camera.
    CaptureGesture,
    /// Move the overlay to a new point while the camera stays put.
    MoveOverlay(GeoPoint),
    /// Restore the snapshotted camera and query the last known point.
    Finish { last_known: Option<GeoPoint> },
    /// Let the scene handle the event natively.
    Propagate,
}

/// Explicit drag state machine with a single transition function.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragMachine {
    phase: DragPhase,
    last_known: Option<GeoPoint>,
}

impl DragMachine {
    #[must_use]
    pub fn phase(self) -> DragPhase {
        self.phase
    }

    #[must_use]
    pub fn last_known(self) -> Option<GeoPoint> {
        self.last_known
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn transition(&mut self, input: DragInput) -> DragCommand {
        match (self.phase, input) {
            // A start in any phase begins a new gesture; a previous one whose
            // end was never delivered is abandoned.
            (_, DragInput::Start(screen)) => {
                self.phase = DragPhase::ConsideringDragStart;
                self.last_known = None;
                DragCommand::ResolveContainment(screen)
            }
            (DragPhase::ConsideringDragStart, DragInput::ContainmentResolved { inside: true }) => {
                self.phase = DragPhase::DraggingInsideBuffer;
                DragCommand::CaptureGesture
            }
            (DragPhase::ConsideringDragStart, DragInput::ContainmentResolved { inside: false }) => {
                self.phase = DragPhase::DraggingOutside;
                DragCommand::Propagate
            }
            (DragPhase::DraggingInsideBuffer, DragInput::Update(Some(point))) => {
                self.last_known = Some(point);
                DragCommand::MoveOverlay(point)
            }
            (DragPhase::DraggingInsideBuffer, DragInput::End) => {
                let last_known = self.last_known.take();
                self.phase = DragPhase::Idle;
                DragCommand::Finish { last_known }
            }
            (DragPhase::ConsideringDragStart, DragInput::End)
            | (DragPhase::DraggingOutside, DragInput::End) => {
                self.phase = DragPhase::Idle;
                DragCommand::Propagate
            }
            _ => DragCommand::Propagate,
        }
    }
}
