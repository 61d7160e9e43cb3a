use tracing::{debug, trace};

use crate::core::{Frame, FrameAdvance, PlaybackState};
use crate::extensions::SyncEvent;
use crate::host::{ChartWidget, SceneView};

use super::{MediaSyncReport, SyncEngine};

impl<S: SceneView, C: ChartWidget> SyncEngine<S, C> {
    #[must_use]
    pub fn playback_state(&self) -> PlaybackState {
        self.core.clock.state()
    }

    #[must_use]
    pub fn current_frame(&self) -> Frame {
        self.core.clock.current_frame()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.core.clock.is_playing()
    }

    /// Report of the most recent media scrub.
    #[must_use]
    pub fn last_media_report(&self) -> MediaSyncReport {
        self.core.last_media_report
    }

    /// Host per-frame callback while playing.
    ///
    /// Runs `advance_timers`, then advances the clock. Media and chart are
    /// updated within this same call whenever the frame moves. Hosts that stop
    /// their animation loop on pause must keep calling `advance_timers`.
    pub fn tick(&mut self, delta_ms: f64) -> Option<FrameAdvance> {
        self.advance_timers(delta_ms);

        let advance = self.core.clock.tick(delta_ms)?;
        trace!(
            frame = advance.frame,
            frames_advanced = advance.frames_advanced,
            wrapped = advance.wrapped,
            "playback advanced"
        );
        self.propagate_frame(advance.frame, advance.wrapped);
        Some(advance)
    }

    /// Flips play/pause and returns the new playing flag.
    ///
    /// Pausing adopts the active media resource's position as the current
    /// frame so the clock never drifts from what is on screen.
    pub fn toggle_play_pause(&mut self) -> bool {
        let authoritative = if self.core.clock.is_playing() {
            self.core
                .media
                .active_frame(&self.core.selection, self.core.config.timeline)
        } else {
            None
        };
        let is_playing = self.core.clock.toggle(authoritative);
        debug!(
            is_playing,
            frame = self.core.clock.current_frame(),
            "playback toggled"
        );
        if !is_playing {
            self.propagate_frame(self.core.clock.current_frame(), false);
        }
        self.emit_event(SyncEvent::PlaybackToggled { is_playing });
        is_playing
    }

    /// Steps forward by the configured manual step size.
    pub fn step_forward(&mut self) -> Frame {
        self.step_forward_by(self.core.config.timeline.manual_step_size)
    }

    /// Steps backward by the configured manual step size.
    pub fn step_backward(&mut self) -> Frame {
        self.step_backward_by(self.core.config.timeline.manual_step_size)
    }

    pub fn step_forward_by(&mut self, frames: u32) -> Frame {
        let frame = self.core.clock.step_forward(frames);
        self.propagate_frame(frame, false);
        frame
    }

    pub fn step_backward_by(&mut self, frames: u32) -> Frame {
        let frame = self.core.clock.step_backward(frames);
        self.propagate_frame(frame, false);
        frame
    }

    /// Pushes a new frame to media and chart in the caller's callback.
    pub(super) fn propagate_frame(&mut self, frame: Frame, wrapped: bool) {
        let timeline = self.core.config.timeline;
        self.core.last_media_report = if wrapped {
            self.core.media.rewind_all()
        } else {
            self.core.media.sync_all(frame, timeline)
        };
        self.core.chart.on_frame_advance(frame, timeline);
        self.flush_chart();
        self.emit_event(SyncEvent::FrameAdvanced { frame, wrapped });
    }
}
