#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{TimeZone, Utc};
use climate_mapper::api::{MediaBinding, SyncEngine, SyncEngineConfig, SyncEngineParts};
use climate_mapper::core::Catalog;
use climate_mapper::host::{HeadlessChart, HeadlessMedia, HeadlessScene, MemoryTourStore};
use serde_json::json;

pub const KEYS: [&str; 3] = ["heatmax_ssp126", "heatmax_ssp245", "heatmax_ssp370"];
pub const LAYERS: [&str; 3] = ["Low", "Intermediate", "High"];

pub const CATALOG: &str = r#"{
    "datasets": [
        {
            "name": "Max Temperature",
            "variables": [
                { "name": "Low", "key": "heatmax_ssp126", "service_url": "https://svc.test/heatmax/ImageServer", "video": "heatmax_126.mp4" },
                { "name": "Intermediate", "key": "heatmax_ssp245", "service_url": "https://svc.test/heatmax/ImageServer", "video": "heatmax_245.mp4" },
                { "name": "High", "key": "heatmax_ssp370", "service_url": "https://svc.test/heatmax/ImageServer", "video": "heatmax_370.mp4" }
            ]
        },
        {
            "name": "Heat Index",
            "variables": [
                { "name": "HI Low", "key": "heatindex_ssp126", "service_url": "https://svc.test/heatindex/ImageServer" },
                { "name": "HI High", "key": "heatindex_ssp370", "service_url": "https://svc.test/heatindex/ImageServer" }
            ]
        }
    ]
}"#;

pub type Engine = SyncEngine<HeadlessScene, HeadlessChart>;

pub struct Harness {
    pub engine: Engine,
    pub media: Vec<Rc<RefCell<HeadlessMedia>>>,
}

/// Engine over a 360x180 scene (one pixel per degree) and a 200px chart.
pub fn harness() -> Harness {
    harness_with(SyncEngineConfig::default(), |_| {})
}

pub fn harness_with(
    config: SyncEngineConfig,
    tweak_media: impl Fn(&mut Vec<HeadlessMedia>),
) -> Harness {
    let mut resources: Vec<HeadlessMedia> =
        LAYERS.iter().map(|_| HeadlessMedia::buffered(150.0)).collect();
    tweak_media(&mut resources);
    let media: Vec<Rc<RefCell<HeadlessMedia>>> = resources
        .into_iter()
        .map(|m| Rc::new(RefCell::new(m)))
        .collect();

    let bindings = LAYERS
        .iter()
        .zip(&media)
        .map(|(layer, resource)| MediaBinding::new(*layer, resource.clone()))
        .collect();

    let engine = SyncEngine::new(
        SyncEngineParts {
            scene: HeadlessScene::new(360.0, 180.0),
            chart: HeadlessChart::new(200.0),
            media: bindings,
            catalog: Catalog::from_json_str(CATALOG).expect("catalog"),
            tour_store: Box::new(MemoryTourStore::default()),
        },
        config,
    )
    .expect("engine init");

    Harness { engine, media }
}

pub fn year_millis(year: i32) -> i64 {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .expect("valid year")
        .timestamp_millis()
}

/// `getSamples` body with one sample per entry, values as numeric strings.
pub fn samples_body(rows: &[(i64, [f64; 3])]) -> String {
    let samples: Vec<_> = rows
        .iter()
        .map(|(timestamp_ms, values)| {
            json!({
                "attributes": {
                    "StdTime": timestamp_ms,
                    (KEYS[0]): values[0].to_string(),
                    (KEYS[1]): values[1].to_string(),
                    (KEYS[2]): values[2].to_string(),
                }
            })
        })
        .collect();
    json!({ "samples": samples }).to_string()
}

/// One sample per year starting at `first_year`, values rising by one.
pub fn yearly_body(first_year: i32, years: usize) -> String {
    let rows: Vec<(i64, [f64; 3])> = (0..years)
        .map(|offset| {
            let base = 80.0 + offset as f64;
            (
                year_millis(first_year + offset as i32),
                [base, base + 1.0, base + 2.0],
            )
        })
        .collect();
    samples_body(&rows)
}

pub const EMPTY_BODY: &str = r#"{ "samples": [] }"#;

/// Runs view-ready and answers the initial query with `body`.
pub fn load(harness: &mut Harness, body: &str) {
    let pending = harness.engine.view_ready().expect("view ready");
    harness
        .engine
        .complete_query(pending.token, Ok(body.to_owned()));
}
