use climate_mapper::core::{ChartData, ScenarioSample, TimelineConfig, snap_to_grid};
use indexmap::IndexMap;
use proptest::prelude::*;

const MS_PER_DAY: i64 = 86_400_000;
const YEAR_2000_MS: i64 = 946_684_800_000;

fn timeline(total_frames: u32, frames_per_second: f64) -> TimelineConfig {
    TimelineConfig {
        total_frames,
        frames_per_second,
        ..TimelineConfig::default()
    }
}

proptest! {
    #[test]
    fn frame_to_index_stays_in_range_and_is_stable(
        frame in 0u32..10_000,
        series_len in 1usize..500,
        frames_per_second in 0.1f64..30.0
    ) {
        let timeline = timeline(10_000, frames_per_second);
        let index = timeline.frame_to_index(frame, series_len).expect("non-empty series");
        prop_assert!(index < series_len);
        prop_assert_eq!(timeline.frame_to_index(frame, series_len), Some(index));
    }

    #[test]
    fn wrapped_frames_stay_on_the_timeline(
        total_frames in 1u32..1_000,
        frame_seed in 0u32..1_000,
        step in 0u32..5_000
    ) {
        let timeline = timeline(total_frames, 1.0);
        let frame = frame_seed % total_frames;

        let forward = timeline.wrap_forward(frame, step);
        let backward = timeline.wrap_backward(frame, step);
        prop_assert!(forward < total_frames);
        prop_assert!(backward < total_frames);
        prop_assert_eq!(timeline.wrap_backward(forward, step), frame);
    }

    #[test]
    fn grid_snap_lands_on_the_grid_within_half_a_step(
        coordinate in -180.0f64..180.0,
        step_index in 0usize..3
    ) {
        let step = [0.25, 0.5, 1.0][step_index];
        let snapped = snap_to_grid(coordinate, step);
        prop_assert!((snapped - coordinate).abs() <= step / 2.0 + 1e-9);
        let cells = snapped / step;
        prop_assert!((cells - cells.round()).abs() <= 1e-9);
    }

    #[test]
    fn yearly_aggregation_keeps_the_maximum(
        values in prop::collection::vec(-100.0f64..150.0, 1..40)
    ) {
        let keys = vec!["ssp245".to_owned()];
        let samples: Vec<ScenarioSample> = values
            .iter()
            .enumerate()
            .map(|(day, value)| {
                let mut by_key = IndexMap::new();
                by_key.insert("ssp245".to_owned(), *value);
                ScenarioSample {
                    timestamp_ms: YEAR_2000_MS + day as i64 * MS_PER_DAY,
                    values: by_key,
                }
            })
            .collect();

        let data = ChartData::from_samples(&samples, &keys).expect("aggregate");
        let expected = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(data.len(), 1);
        prop_assert_eq!(data.points()[0].value("ssp245"), Some(expected));
    }
}
