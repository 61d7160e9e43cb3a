use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};

/// Discrete position on the shared animation timeline, in `[0, total_frames)`.
pub type Frame = u32;

pub const DEFAULT_TOTAL_FRAMES: u32 = 150;
pub const DEFAULT_FRAMES_PER_SECOND: f64 = 1.0;
/// Real-time pacing step of the animation loop (1000ms / 5).
pub const DEFAULT_TIME_STEP_MS: f64 = 1000.0 / 5.0;
pub const DEFAULT_MANUAL_STEP_SIZE: u32 = 10;

/// Timeline constants shared by the clock, media and chart synchronizers.
///
/// `frame_duration_ms` paces the animation loop, while `frames_per_second`
/// maps a frame index to media seconds and chart indices. The two are
/// configured independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default = "default_total_frames")]
    pub total_frames: u32,
    #[serde(default = "default_frames_per_second")]
    pub frames_per_second: f64,
    #[serde(default = "default_frame_duration_ms")]
    pub frame_duration_ms: f64,
    #[serde(default = "default_manual_step_size")]
    pub manual_step_size: u32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            total_frames: DEFAULT_TOTAL_FRAMES,
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
            frame_duration_ms: default_frame_duration_ms(),
            manual_step_size: DEFAULT_MANUAL_STEP_SIZE,
        }
    }
}

impl TimelineConfig {
    pub fn validate(self) -> SyncResult<Self> {
        if self.total_frames == 0 {
            return Err(SyncError::InvalidConfig(
                "timeline total_frames must be > 0".to_owned(),
            ));
        }
        if !self.frames_per_second.is_finite() || self.frames_per_second <= 0.0 {
            return Err(SyncError::InvalidConfig(
                "timeline frames_per_second must be finite and > 0".to_owned(),
            ));
        }
        if !self.frame_duration_ms.is_finite() || self.frame_duration_ms <= 0.0 {
            return Err(SyncError::InvalidConfig(
                "timeline frame_duration_ms must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Media position (seconds) for a frame.
    #[must_use]
    pub fn frame_to_seconds(self, frame: Frame) -> f64 {
        f64::from(frame) / self.frames_per_second
    }

    /// Frame for a media position, wrapped into the timeline.
    #[must_use]
    pub fn seconds_to_frame(self, seconds: f64) -> Frame {
        if !seconds.is_finite() || seconds <= 0.0 {
            return 0;
        }
        let raw = (seconds * self.frames_per_second).floor();
        let total = f64::from(self.total_frames);
        (raw % total) as Frame
    }

    /// Chart index for a frame: `clamp(floor(frame / fps), 0, len - 1)`.
    ///
    /// Returns `None` for an empty series.
    #[must_use]
    pub fn frame_to_index(self, frame: Frame, series_len: usize) -> Option<usize> {
        if series_len == 0 {
            return None;
        }
        let raw = (f64::from(frame) / self.frames_per_second).floor();
        let max = (series_len - 1) as f64;
        Some(raw.clamp(0.0, max) as usize)
    }

    /// Frame for a chart index (`index * fps`), clamped to the last frame.
    #[must_use]
    pub fn index_to_frame(self, index: usize) -> Frame {
        let raw = (index as f64 * self.frames_per_second).floor();
        let last = f64::from(self.total_frames - 1);
        raw.clamp(0.0, last) as Frame
    }

    /// Adds `step` frames with wraparound.
    #[must_use]
    pub fn wrap_forward(self, frame: Frame, step: u32) -> Frame {
        let total = u64::from(self.total_frames);
        ((u64::from(frame) + u64::from(step)) % total) as Frame
    }

    /// Subtracts `step` frames; negative results wrap to
    /// `total_frames - |remainder|`.
    #[must_use]
    pub fn wrap_backward(self, frame: Frame, step: u32) -> Frame {
        let total = i64::from(self.total_frames);
        let remainder = (i64::from(frame) - i64::from(step)) % total;
        if remainder < 0 {
            (total + remainder) as Frame
        } else {
            remainder as Frame
        }
    }

    pub fn check_frame(self, frame: Frame) -> SyncResult<Frame> {
        if frame >= self.total_frames {
            return Err(SyncError::InvalidFrame {
                frame,
                total_frames: self.total_frames,
            });
        }
        Ok(frame)
    }
}

fn default_total_frames() -> u32 {
    DEFAULT_TOTAL_FRAMES
}

fn default_frames_per_second() -> f64 {
    DEFAULT_FRAMES_PER_SECOND
}

fn default_frame_duration_ms() -> f64 {
    DEFAULT_TIME_STEP_MS / DEFAULT_FRAMES_PER_SECOND
}

fn default_manual_step_size() -> u32 {
    DEFAULT_MANUAL_STEP_SIZE
}
