use climate_mapper::core::{
    ChartData, GeoPoint, OverlayGeometry, OverlaySizing, ScenarioSample, TemperatureUnit,
    TimelineConfig, UnitKind,
};
use climate_mapper::host::ChartSeriesSet;
use criterion::{Criterion, criterion_group, criterion_main};
use indexmap::IndexMap;
use std::hint::black_box;

const KEYS: [&str; 3] = ["heatmax_ssp126", "heatmax_ssp245", "heatmax_ssp370"];
const MS_PER_DAY: i64 = 86_400_000;
const YEAR_1950_MS: i64 = -631_152_000_000;

fn daily_samples(days: usize) -> Vec<ScenarioSample> {
    (0..days)
        .map(|day| {
            let base = 80.0 + (day % 365) as f64 * 0.05;
            let values: IndexMap<String, f64> = KEYS
                .iter()
                .enumerate()
                .map(|(i, key)| ((*key).to_owned(), base + i as f64))
                .collect();
            ScenarioSample {
                timestamp_ms: YEAR_1950_MS + day as i64 * MS_PER_DAY,
                values,
            }
        })
        .collect()
}

fn scenario_keys() -> Vec<String> {
    KEYS.iter().map(|key| (*key).to_owned()).collect()
}

fn bench_yearly_aggregation_150y(c: &mut Criterion) {
    let samples = daily_samples(150 * 365);
    let keys = scenario_keys();

    c.bench_function("yearly_aggregation_150y_daily", |b| {
        b.iter(|| {
            let _ = ChartData::from_samples(black_box(&samples), black_box(&keys))
                .expect("aggregation should succeed");
        })
    });
}

fn bench_frame_to_index_sweep(c: &mut Criterion) {
    let timeline = TimelineConfig::default();

    c.bench_function("frame_to_index_sweep", |b| {
        b.iter(|| {
            for frame in 0..timeline.total_frames {
                let _ = black_box(timeline.frame_to_index(black_box(frame), 151));
                let _ = black_box(timeline.frame_to_seconds(frame));
            }
        })
    });
}

fn bench_overlay_build(c: &mut Criterion) {
    let sizing = OverlaySizing::default();
    let center = GeoPoint::new(-77.0369, 38.9072);

    c.bench_function("overlay_build_64_vertices", |b| {
        b.iter(|| {
            let _ = OverlayGeometry::build(black_box(center), black_box(3.0), sizing);
        })
    });
}

fn bench_chart_series_rebuild(c: &mut Criterion) {
    let data = ChartData::from_samples(&daily_samples(150 * 365), &scenario_keys())
        .expect("aggregation should succeed");
    let labels: Vec<(String, String)> = KEYS
        .iter()
        .zip(["Low", "Intermediate", "High"])
        .map(|(key, name)| ((*key).to_owned(), name.to_owned()))
        .collect();

    c.bench_function("chart_series_rebuild_celsius", |b| {
        b.iter(|| {
            let _ = ChartSeriesSet::build(
                black_box(&data),
                black_box(&labels),
                1,
                UnitKind::Temperature,
                TemperatureUnit::Celsius,
            );
        })
    });
}

criterion_group!(
    benches,
    bench_yearly_aggregation_150y,
    bench_frame_to_index_sweep,
    bench_overlay_build,
    bench_chart_series_rebuild
);
criterion_main!(benches);
