use serde::{Deserialize, Serialize};

use crate::core::ScreenPoint;

/// Touch phases forwarded from the chart surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TouchPhase {
    Start(ScreenPoint),
    Move(ScreenPoint),
    End,
    Cancel,
}

/// Classification of a finished touch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TouchGesture {
    /// No move between start and end: pick at the start position.
    Tap(ScreenPoint),
    /// At least one move: the user scrolled the chart.
    Scroll,
}

/// Distinguishes chart taps from horizontal scrolling on small screens.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchTracker {
    start: Option<ScreenPoint>,
    moved: bool,
}

impl TouchTracker {
    #[must_use]
    pub fn is_active(self) -> bool {
        self.start.is_some()
    }

    /// Feeds one phase; returns a gesture when a sequence completes.
    pub fn on_phase(&mut self, phase: TouchPhase) -> Option<TouchGesture> {
        match phase {
            TouchPhase::Start(position) => {
                self.start = Some(position);
                self.moved = false;
                None
            }
            TouchPhase::Move(_) => {
                if self.start.is_some() {
                    self.moved = true;
                }
                None
            }
            TouchPhase::End => {
                let start = self.start.take()?;
                let moved = std::mem::take(&mut self.moved);
                Some(if moved {
                    TouchGesture::Scroll
                } else {
                    TouchGesture::Tap(start)
                })
            }
            TouchPhase::Cancel => {
                *self = Self::default();
                None
            }
        }
    }
}
