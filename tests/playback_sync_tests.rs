mod support;

use approx::assert_abs_diff_eq;
use climate_mapper::api::MediaSyncReport;
use climate_mapper::host::{MediaReadiness, SeekableRange};

use support::{harness, harness_with};

#[test]
fn step_forward_wraps_around_the_timeline() {
    let mut h = harness();
    assert_eq!(h.engine.step_forward_by(147), 147);
    assert_eq!(h.engine.step_forward(), 7);
    assert_eq!(h.engine.current_frame(), 7);
    for media in &h.media {
        assert_abs_diff_eq!(media.borrow().current_time, 7.0);
    }
}

#[test]
fn step_backward_wraps_to_the_end() {
    let mut h = harness();
    assert_eq!(h.engine.step_backward(), 140);
    assert_eq!(h.engine.step_backward_by(145), 145);
}

#[test]
fn tick_advances_by_elapsed_frames_in_one_step() {
    let mut h = harness();
    assert!(h.engine.toggle_play_pause());

    let advance = h.engine.tick(450.0).expect("advance");
    assert_eq!(advance.frame, 2);
    assert_eq!(advance.frames_advanced, 2);
    assert_abs_diff_eq!(h.media[0].borrow().current_time, 2.0);

    assert!(h.engine.tick(100.0).is_none());
    let advance = h.engine.tick(50.0).expect("remainder carried");
    assert_eq!(advance.frame, 3);
}

#[test]
fn paused_engine_ignores_ticks() {
    let mut h = harness();
    assert!(h.engine.tick(5_000.0).is_none());
    assert_eq!(h.engine.current_frame(), 0);
    assert_eq!(h.media[0].borrow().seek_count, 0);
}

#[test]
fn wrap_rewinds_every_media_resource() {
    let mut h = harness();
    h.engine.step_forward_by(149);
    h.engine.toggle_play_pause();

    let advance = h.engine.tick(200.0).expect("advance");
    assert!(advance.wrapped);
    assert_eq!(advance.frame, 0);
    for media in &h.media {
        assert_abs_diff_eq!(media.borrow().current_time, 0.0);
    }
    assert_eq!(
        h.engine.last_media_report(),
        MediaSyncReport {
            applied: 3,
            skipped: 0
        }
    );
}

#[test]
fn pausing_adopts_the_active_media_position() {
    let mut h = harness();
    h.engine.toggle_play_pause();
    h.engine.tick(400.0).expect("advance");
    assert_eq!(h.engine.current_frame(), 2);

    // The visible "Low" layer drifted ahead of the clock.
    h.media[0].borrow_mut().current_time = 5.4;
    assert!(!h.engine.toggle_play_pause());
    assert_eq!(h.engine.current_frame(), 5);
    assert_abs_diff_eq!(h.media[2].borrow().current_time, 5.0);
}

#[test]
fn unseekable_target_leaves_media_untouched() {
    let mut h = harness_with(Default::default(), |media| {
        media[1].seekable = vec![SeekableRange::new(0.0, 3.0)];
    });

    h.engine.step_forward_by(10);
    assert_abs_diff_eq!(h.media[0].borrow().current_time, 10.0);
    assert_abs_diff_eq!(h.media[1].borrow().current_time, 0.0);
    assert_eq!(h.media[1].borrow().seek_count, 0);
    assert_eq!(
        h.engine.last_media_report(),
        MediaSyncReport {
            applied: 2,
            skipped: 1
        }
    );

    // Buffering caught up: the next push lands.
    h.media[1].borrow_mut().seekable = vec![SeekableRange::new(0.0, 150.0)];
    h.engine.step_forward_by(1);
    assert_abs_diff_eq!(h.media[1].borrow().current_time, 11.0);
}

#[test]
fn clock_runs_even_when_no_media_is_ready() {
    let mut h = harness_with(Default::default(), |media| {
        for resource in media.iter_mut() {
            resource.readiness = MediaReadiness::HaveNothing;
        }
    });
    h.engine.toggle_play_pause();
    let advance = h.engine.tick(1_000.0).expect("advance");
    assert_eq!(advance.frame, 5);
    assert_eq!(h.engine.last_media_report().skipped, 3);

    // Without a ready media element the internal counter is kept on pause.
    h.engine.toggle_play_pause();
    assert_eq!(h.engine.current_frame(), 5);
}
