pub mod catalog;
pub mod geo;
pub mod overlay;
pub mod playback;
pub mod series;
pub mod statistics;
pub mod timeline;

pub use catalog::{Catalog, Dataset, DatasetSelection, TemperatureUnit, UnitKind, Variable};
pub use geo::{Envelope, GeoPoint, ScreenPoint, SpatialReference, snap_to_grid};
pub use overlay::{CornerSegment, OverlayGeometry, OverlaySizing};
pub use playback::{FrameAdvance, PlaybackClock, PlaybackState};
pub use series::{ChartData, Milestone, ScenarioSample, TimeSeriesPoint};
pub use statistics::{BandStatistics, VitalsSummary};
pub use timeline::{Frame, TimelineConfig};
