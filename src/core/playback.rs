use serde::{Deserialize, Serialize};

use crate::core::{Frame, TimelineConfig};
use crate::error::SyncResult;

/// Public playback state snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current_frame: Frame,
}

/// Result of a clock tick that moved the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameAdvance {
    pub frame: Frame,
    pub frames_advanced: u32,
    /// The timeline ran past its end and restarted at frame 0.
    pub wrapped: bool,
}

/// Discrete playback clock with an explicit `start/stop/tick(delta_ms)` scheduler.
///
/// The clock never touches media or the chart itself; callers push the
/// returned frame to the synchronizers within the same callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackClock {
    timeline: TimelineConfig,
    is_playing: bool,
    current_frame: Frame,
    accumulated_ms: f64,
}

impl PlaybackClock {
    pub fn new(timeline: TimelineConfig) -> SyncResult<Self> {
        Ok(Self {
            timeline: timeline.validate()?,
            is_playing: false,
            current_frame: 0,
            accumulated_ms: 0.0,
        })
    }

    #[must_use]
    pub fn timeline(self) -> TimelineConfig {
        self.timeline
    }

    #[must_use]
    pub fn state(self) -> PlaybackState {
        PlaybackState {
            is_playing: self.is_playing,
            current_frame: self.current_frame,
        }
    }

    #[must_use]
    pub fn is_playing(self) -> bool {
        self.is_playing
    }

    #[must_use]
    pub fn current_frame(self) -> Frame {
        self.current_frame
    }

    pub fn start(&mut self) {
        self.is_playing = true;
        self.accumulated_ms = 0.0;
    }

    /// Stops scheduling; the pending partial tick is dropped.
    pub fn stop(&mut self) {
        self.is_playing = false;
        self.accumulated_ms = 0.0;
    }

    /// Flips play/pause. On pause, `authoritative_frame` (read from the active
    /// media resource) replaces the internal counter to absorb drift.
    pub fn toggle(&mut self, authoritative_frame: Option<Frame>) -> bool {
        if self.is_playing {
            self.stop();
            if let Some(frame) = authoritative_frame {
                self.current_frame = frame % self.timeline.total_frames;
            }
        } else {
            self.start();
        }
        self.is_playing
    }

    pub fn set_current_frame(&mut self, frame: Frame) -> SyncResult<Frame> {
        self.current_frame = self.timeline.check_frame(frame)?;
        Ok(self.current_frame)
    }

    pub fn step_forward(&mut self, step: u32) -> Frame {
        self.current_frame = self.timeline.wrap_forward(self.current_frame, step);
        self.current_frame
    }

    pub fn step_backward(&mut self, step: u32) -> Frame {
        self.current_frame = self.timeline.wrap_backward(self.current_frame, step);
        self.current_frame
    }

    /// Accumulates elapsed real time and advances by
    /// `floor(accumulated / frame_duration)` frames in a single step.
    ///
    /// Returns `None` while paused or when less than one frame elapsed.
    pub fn tick(&mut self, delta_ms: f64) -> Option<FrameAdvance> {
        if !self.is_playing || !delta_ms.is_finite() || delta_ms <= 0.0 {
            return None;
        }
        self.accumulated_ms += delta_ms;
        let duration = self.timeline.frame_duration_ms;
        if self.accumulated_ms < duration {
            return None;
        }

        let steps = (self.accumulated_ms / duration).floor();
        self.accumulated_ms -= steps * duration;
        let steps = steps.min(f64::from(u32::MAX)) as u32;

        let next = u64::from(self.current_frame) + u64::from(steps);
        let wrapped = next >= u64::from(self.timeline.total_frames);
        self.current_frame = if wrapped { 0 } else { next as Frame };

        Some(FrameAdvance {
            frame: self.current_frame,
            frames_advanced: steps,
            wrapped,
        })
    }
}
