use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};

/// Mean Earth radius used for great-circle math (kilometers).
pub const EARTH_RADIUS_KM: f64 = 6_371.008_8;

/// WKID of WGS84 geographic coordinates.
pub const WGS84_WKID: u32 = 4326;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpatialReference {
    pub wkid: u32,
}

impl Default for SpatialReference {
    fn default() -> Self {
        Self { wkid: WGS84_WKID }
    }
}

/// Geographic point of interest in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default)]
    pub spatial_reference: SpatialReference,
}

impl GeoPoint {
    #[must_use]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            spatial_reference: SpatialReference::default(),
        }
    }

    pub fn validate(self) -> SyncResult<Self> {
        if !self.longitude.is_finite() || !self.latitude.is_finite() {
            return Err(SyncError::InvalidInput(
                "geographic coordinates must be finite".to_owned(),
            ));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(SyncError::InvalidInput(format!(
                "latitude {} is outside [-90, 90]",
                self.latitude
            )));
        }
        Ok(self)
    }

    /// Snaps both coordinates to the sampling grid: `round(coord / step) * step`.
    ///
    /// With the default quarter-degree step this is `round(coord * 4) / 4`.
    #[must_use]
    pub fn snapped_to_grid(self, step_degrees: f64) -> Self {
        Self {
            longitude: snap_to_grid(self.longitude, step_degrees),
            latitude: snap_to_grid(self.latitude, step_degrees),
            spatial_reference: self.spatial_reference,
        }
    }

    /// Great-circle (haversine) distance in kilometers.
    #[must_use]
    pub fn distance_km(self, other: Self) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
    }

    /// Point reached travelling `distance_km` along `bearing_deg` (clockwise from north).
    #[must_use]
    pub fn destination(self, bearing_deg: f64, distance_km: f64) -> Self {
        let angular = distance_km / EARTH_RADIUS_KM;
        let bearing = bearing_deg.to_radians();
        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();

        let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
        let lon2 = lon1
            + (bearing.sin() * angular.sin() * lat1.cos())
                .atan2(angular.cos() - lat1.sin() * lat2.sin());

        Self {
            longitude: normalize_longitude(lon2.to_degrees()),
            latitude: lat2.to_degrees(),
            spatial_reference: self.spatial_reference,
        }
    }
}

/// Screen-space position in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Geographic bounding box used by statistics queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
    #[serde(default)]
    pub spatial_reference: SpatialReference,
}

impl Envelope {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> SyncResult<Self> {
        if ![xmin, ymin, xmax, ymax].iter().all(|v| v.is_finite()) {
            return Err(SyncError::InvalidInput(
                "envelope bounds must be finite".to_owned(),
            ));
        }
        if xmin > xmax || ymin > ymax {
            return Err(SyncError::InvalidInput(
                "envelope min bounds must not exceed max bounds".to_owned(),
            ));
        }
        Ok(Self {
            xmin,
            ymin,
            xmax,
            ymax,
            spatial_reference: SpatialReference::default(),
        })
    }
}

#[must_use]
pub fn snap_to_grid(value: f64, step_degrees: f64) -> f64 {
    (value / step_degrees).round() * step_degrees
}

#[must_use]
pub fn normalize_longitude(longitude: f64) -> f64 {
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && longitude > 0.0 {
        180.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::{GeoPoint, normalize_longitude, snap_to_grid};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn quarter_degree_snapping() {
        assert_close(snap_to_grid(12.37, 0.25), 12.25, 1e-12);
        assert_close(snap_to_grid(12.38, 0.25), 12.5, 1e-12);
        assert_close(snap_to_grid(-77.0369, 0.25), -77.0, 1e-12);
    }

    #[test]
    fn distance_of_one_degree_on_equator() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        assert_close(a.distance_km(b), 111.195, 0.01);
    }

    #[test]
    fn destination_round_trips_distance() {
        let origin = GeoPoint::new(-77.0369, 38.9072);
        let target = origin.destination(45.0, 560.0);
        assert_close(origin.distance_km(target), 560.0, 1e-6);
    }

    #[test]
    fn longitudes_wrap_into_range() {
        assert_close(normalize_longitude(190.0), -170.0, 1e-12);
        assert_close(normalize_longitude(-190.0), 170.0, 1e-12);
        assert_close(normalize_longitude(180.0), 180.0, 1e-12);
    }
}
