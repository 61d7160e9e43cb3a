use std::cell::Cell;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::core::{GeoPoint, OverlayGeometry, ScreenPoint};

use super::{
    CameraTarget, ChartSeriesSet, ChartWidget, MediaElement, MediaReadiness, SceneLayer,
    SceneView, SeekableRange, TourStore,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessCamera {
    pub center: GeoPoint,
    pub zoom: f64,
}

/// Recording scene with an equirectangular screen projection.
///
/// Screen `(0, 0)` maps to (-180, 90) and `(width, height)` to (180, -90);
/// positions outside the viewport hit "sky" and map to nothing.
#[derive(Debug)]
pub struct HeadlessScene {
    pub width: f64,
    pub height: f64,
    pub capability_error: Option<String>,
    pub camera: HeadlessCamera,
    pub layers: Vec<SceneLayer>,
    pub opacities: IndexMap<String, f64>,
    pub last_overlay: Option<OverlayGeometry>,
    pub overlay_draw_count: usize,
    pub camera_snapshot_count: Cell<usize>,
    pub camera_restore_count: usize,
    pub recenter_count: usize,
}

impl HeadlessScene {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            capability_error: None,
            camera: HeadlessCamera {
                center: GeoPoint::new(-80.0, 40.0),
                zoom: 1.0,
            },
            layers: Vec::new(),
            opacities: IndexMap::new(),
            last_overlay: None,
            overlay_draw_count: 0,
            camera_snapshot_count: Cell::new(0),
            camera_restore_count: 0,
            recenter_count: 0,
        }
    }

    /// Scene whose capability check fails, e.g. without hardware rendering.
    #[must_use]
    pub fn without_3d(width: f64, height: f64) -> Self {
        Self {
            capability_error: Some("WebGL2 is not available".to_owned()),
            ..Self::new(width, height)
        }
    }

    /// Inverse of `screen_to_map`, handy for building test input.
    #[must_use]
    pub fn map_to_screen(&self, point: GeoPoint) -> ScreenPoint {
        ScreenPoint::new(
            (point.longitude + 180.0) / 360.0 * self.width,
            (90.0 - point.latitude) / 180.0 * self.height,
        )
    }

    #[must_use]
    pub fn layer_opacity(&self, layer_id: &str) -> Option<f64> {
        self.opacities.get(layer_id).copied()
    }
}

impl SceneView for HeadlessScene {
    type Camera = HeadlessCamera;

    fn check_capabilities(&self) -> Result<(), String> {
        match &self.capability_error {
            Some(message) => Err(message.clone()),
            None => Ok(()),
        }
    }

    fn add_layer(&mut self, layer: SceneLayer) {
        self.opacities.insert(layer.id().to_owned(), 1.0);
        self.layers.push(layer);
    }

    fn set_layer_opacity(&mut self, layer_id: &str, opacity: f64) {
        if let Some(slot) = self.opacities.get_mut(layer_id) {
            *slot = opacity;
        }
    }

    fn screen_to_map(&self, screen: ScreenPoint) -> Option<GeoPoint> {
        if !screen.is_finite()
            || !(0.0..=self.width).contains(&screen.x)
            || !(0.0..=self.height).contains(&screen.y)
        {
            return None;
        }
        Some(GeoPoint::new(
            screen.x / self.width * 360.0 - 180.0,
            90.0 - screen.y / self.height * 180.0,
        ))
    }

    fn draw_overlay(&mut self, overlay: &OverlayGeometry) {
        self.last_overlay = Some(overlay.clone());
        self.overlay_draw_count += 1;
    }

    fn camera_snapshot(&self) -> Self::Camera {
        self.camera_snapshot_count
            .set(self.camera_snapshot_count.get() + 1);
        self.camera
    }

    fn go_to(&mut self, target: CameraTarget<Self::Camera>) {
        match target {
            CameraTarget::Center { point, zoom } => {
                self.camera.center = point;
                if let Some(zoom) = zoom {
                    self.camera.zoom = zoom;
                }
                self.recenter_count += 1;
            }
            CameraTarget::Snapshot(camera) => {
                self.camera = camera;
                self.camera_restore_count += 1;
            }
        }
    }
}

/// In-memory media resource with explicit seekable ranges.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeadlessMedia {
    pub current_time: f64,
    pub readiness: MediaReadiness,
    pub seekable: Vec<SeekableRange>,
    pub seek_count: usize,
}

impl HeadlessMedia {
    /// Fully buffered resource of `duration_seconds`.
    #[must_use]
    pub fn buffered(duration_seconds: f64) -> Self {
        Self {
            current_time: 0.0,
            readiness: MediaReadiness::HaveEnoughData,
            seekable: vec![SeekableRange::new(0.0, duration_seconds)],
            seek_count: 0,
        }
    }

    #[must_use]
    pub fn with_seekable(mut self, ranges: Vec<SeekableRange>) -> Self {
        self.seekable = ranges;
        self
    }
}

impl MediaElement for HeadlessMedia {
    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds;
        self.seek_count += 1;
    }

    fn readiness(&self) -> MediaReadiness {
        self.readiness
    }

    fn seekable(&self) -> Vec<SeekableRange> {
        self.seekable.clone()
    }
}

/// Recording chart widget laying points out evenly across `width_px`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeadlessChart {
    pub width_px: f64,
    pub series: Option<ChartSeriesSet>,
    pub set_series_count: usize,
    pub active: Option<(usize, usize)>,
    pub set_active_count: usize,
}

impl HeadlessChart {
    #[must_use]
    pub fn new(width_px: f64) -> Self {
        Self {
            width_px,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn point_x(&self, index: usize) -> Option<f64> {
        let len = self.series.as_ref()?.labels.len();
        if index >= len {
            return None;
        }
        if len == 1 {
            return Some(0.0);
        }
        Some(index as f64 * self.width_px / (len - 1) as f64)
    }
}

impl ChartWidget for HeadlessChart {
    fn set_series(&mut self, series: &ChartSeriesSet) {
        self.series = Some(series.clone());
        self.set_series_count += 1;
    }

    fn set_active_element(&mut self, series_index: usize, point_index: usize) {
        self.active = Some((series_index, point_index));
        self.set_active_count += 1;
    }

    fn nearest_point_to(&self, screen: ScreenPoint) -> Option<usize> {
        let len = self.series.as_ref()?.labels.len();
        (0..len)
            .filter_map(|index| self.point_x(index).map(|x| (index, x)))
            .min_by_key(|(_, x)| OrderedFloat((x - screen.x).abs()))
            .map(|(index, _)| index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryTourStore {
    pub completed: bool,
}

impl TourStore for MemoryTourStore {
    fn tour_completed(&self) -> bool {
        self.completed
    }

    fn set_tour_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}
