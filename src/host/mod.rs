//! Contracts for the external collaborators the engine drives.
//!
//! The engine never renders a globe, decodes video or draws a chart itself.
//! Hosts implement these traits over their scene, media and charting stacks;
//! `headless` provides recording implementations for tests and tooling.

mod chart_frame;
mod headless;

pub use chart_frame::{ChartSeriesSet, LabeledLine};
pub use headless::{
    HeadlessCamera, HeadlessChart, HeadlessMedia, HeadlessScene, MemoryTourStore,
};

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{GeoPoint, OverlayGeometry, ScreenPoint};

/// Layer registered on the scene at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneLayer {
    /// Georeferenced video covering the whole globe.
    Media { id: String, video: Option<String> },
    /// Graphics layer holding the buffer and crosshair overlay.
    Overlay { id: String },
}

impl SceneLayer {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Media { id, .. } | Self::Overlay { id } => id,
        }
    }
}

/// Camera destination for `SceneView::go_to`.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraTarget<C> {
    Center { point: GeoPoint, zoom: Option<f64> },
    /// Restore a previously snapshotted camera without animation.
    Snapshot(C),
}

/// 3D scene/map collaborator.
pub trait SceneView {
    type Camera: Clone;

    /// Checks hardware rendering support; an `Err` is terminal for the session.
    fn check_capabilities(&self) -> Result<(), String>;
    fn add_layer(&mut self, layer: SceneLayer);
    fn set_layer_opacity(&mut self, layer_id: &str, opacity: f64);
    fn screen_to_map(&self, screen: ScreenPoint) -> Option<GeoPoint>;
    fn draw_overlay(&mut self, overlay: &OverlayGeometry);
    fn camera_snapshot(&self) -> Self::Camera;
    fn go_to(&mut self, target: CameraTarget<Self::Camera>);
}

/// Browser-style media readiness ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum MediaReadiness {
    #[default]
    HaveNothing,
    HaveMetadata,
    HaveCurrentData,
    HaveFutureData,
    HaveEnoughData,
}

impl MediaReadiness {
    #[must_use]
    pub fn is_ready(self) -> bool {
        self >= Self::HaveMetadata
    }
}

/// Interval a media resource can jump to without stalling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeekableRange {
    pub start: f64,
    pub end: f64,
}

impl SeekableRange {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn contains(self, seconds: f64) -> bool {
        self.start <= seconds && seconds <= self.end
    }
}

/// Video-like resource scrubbed by the media synchronizer.
pub trait MediaElement {
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    fn readiness(&self) -> MediaReadiness;
    fn seekable(&self) -> Vec<SeekableRange>;
}

impl<M: MediaElement> MediaElement for Rc<RefCell<M>> {
    fn current_time(&self) -> f64 {
        self.borrow().current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.borrow_mut().set_current_time(seconds);
    }

    fn readiness(&self) -> MediaReadiness {
        self.borrow().readiness()
    }

    fn seekable(&self) -> Vec<SeekableRange> {
        self.borrow().seekable()
    }
}

/// Charting widget collaborator.
pub trait ChartWidget {
    fn set_series(&mut self, series: &ChartSeriesSet);
    fn set_active_element(&mut self, series_index: usize, point_index: usize);
    /// Nearest data index to a screen position, without requiring intersection.
    fn nearest_point_to(&self, screen: ScreenPoint) -> Option<usize>;
}

/// Persistent storage for the single "tour completed" flag.
pub trait TourStore {
    fn tour_completed(&self) -> bool;
    fn set_tour_completed(&mut self, completed: bool);
}
