use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::GeoPoint;
use crate::error::{SyncError, SyncResult};

/// Kilometers spanned by one degree of latitude.
const KM_PER_DEGREE: f64 = 111.32;
/// Length of one corner-bracket arm (degrees).
const CORNER_ARM_DEGREES: f64 = 1.0;
/// Gap between the buffer square and its corner brackets (degrees).
const CORNER_OFFSET_DEGREES: f64 = 0.2;

/// Zoom-adaptive buffer sizing.
///
/// `radius = clamp(base / 2^max(zoom - reference_zoom, 0), min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlaySizing {
    #[serde(default = "default_base_radius_km")]
    pub base_radius_km: f64,
    #[serde(default = "default_reference_zoom")]
    pub reference_zoom: f64,
    #[serde(default = "default_min_radius_km")]
    pub min_radius_km: f64,
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,
    #[serde(default = "default_ring_vertices")]
    pub ring_vertices: usize,
}

impl Default for OverlaySizing {
    fn default() -> Self {
        Self {
            base_radius_km: default_base_radius_km(),
            reference_zoom: default_reference_zoom(),
            min_radius_km: default_min_radius_km(),
            max_radius_km: default_max_radius_km(),
            ring_vertices: default_ring_vertices(),
        }
    }
}

impl OverlaySizing {
    pub fn validate(self) -> SyncResult<Self> {
        let radii = [self.base_radius_km, self.min_radius_km, self.max_radius_km];
        if radii.iter().any(|r| !r.is_finite() || *r <= 0.0) {
            return Err(SyncError::InvalidConfig(
                "overlay radii must be finite and > 0".to_owned(),
            ));
        }
        if self.min_radius_km > self.max_radius_km {
            return Err(SyncError::InvalidConfig(
                "overlay min_radius_km must be <= max_radius_km".to_owned(),
            ));
        }
        if !self.reference_zoom.is_finite() {
            return Err(SyncError::InvalidConfig(
                "overlay reference_zoom must be finite".to_owned(),
            ));
        }
        if self.ring_vertices < 3 {
            return Err(SyncError::InvalidConfig(
                "overlay ring needs at least 3 vertices".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn radius_km_for_zoom(self, zoom: f64) -> f64 {
        let zoom = if zoom.is_finite() {
            zoom
        } else {
            self.reference_zoom
        };
        let levels = (zoom - self.reference_zoom).max(0.0);
        (self.base_radius_km / 2f64.powf(levels)).clamp(self.min_radius_km, self.max_radius_km)
    }
}

/// One corner-bracket stroke drawn around the selected point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerSegment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// Buffer and crosshair shapes derived from the point of interest and zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayGeometry {
    pub center: GeoPoint,
    pub radius_km: f64,
    pub zoom: f64,
    /// Closed geodesic ring (first vertex repeated at the end).
    pub ring: Vec<GeoPoint>,
    pub corners: SmallVec<[CornerSegment; 8]>,
}

impl OverlayGeometry {
    #[must_use]
    pub fn build(center: GeoPoint, zoom: f64, sizing: OverlaySizing) -> Self {
        let radius_km = sizing.radius_km_for_zoom(zoom);
        let vertices = sizing.ring_vertices.max(3);
        let mut ring = Vec::with_capacity(vertices + 1);
        for i in 0..vertices {
            let bearing = 360.0 * i as f64 / vertices as f64;
            ring.push(center.destination(bearing, radius_km));
        }
        if let Some(first) = ring.first().copied() {
            ring.push(first);
        }

        let side_length = 2.0 * radius_km / KM_PER_DEGREE;
        Self {
            center,
            radius_km,
            zoom,
            ring,
            corners: corner_brackets(center, side_length),
        }
    }

    /// Geodesic-disk containment test.
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.center.distance_km(point) <= self.radius_km
    }
}

/// Eight bracket strokes framing a square of `side_length` degrees.
#[must_use]
pub fn corner_brackets(center: GeoPoint, side_length: f64) -> SmallVec<[CornerSegment; 8]> {
    let half = side_length / 2.0;
    let arm = CORNER_ARM_DEGREES;
    let off = CORNER_OFFSET_DEGREES;
    let (x, y) = (center.longitude, center.latitude);

    let mut corners = SmallVec::new();
    // (corner x sign, corner y sign)
    for (sx, sy) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
        let cx = x + sx * (half + off);
        let cy = y + sy * (half + off);
        corners.push(CornerSegment {
            from: (cx, cy),
            to: (cx - sx * arm, cy),
        });
        corners.push(CornerSegment {
            from: (cx, cy),
            to: (cx, cy - sy * arm),
        });
    }
    corners
}

fn default_base_radius_km() -> f64 {
    560.0
}

fn default_reference_zoom() -> f64 {
    1.0
}

fn default_min_radius_km() -> f64 {
    35.0
}

fn default_max_radius_km() -> f64 {
    560.0
}

fn default_ring_vertices() -> usize {
    64
}
