mod support;

use approx::assert_abs_diff_eq;
use climate_mapper::SyncError;
use climate_mapper::core::{GeoPoint, ScreenPoint};
use climate_mapper::interaction::{DragAction, DragEvent, DragPhase, EventDisposition};

use support::harness;

fn drag_at(action: DragAction, screen: ScreenPoint) -> DragEvent {
    DragEvent::new(action, screen.x, screen.y)
}

#[test]
fn view_ready_centres_on_default_point_and_queries_it() {
    let mut h = harness();
    let pending = h.engine.view_ready().expect("view ready");

    assert_eq!(
        pending.request.param("geometry"),
        Some("-77.0369,38.9072")
    );
    let scene = h.engine.scene();
    assert_eq!(scene.recenter_count, 1);
    assert_abs_diff_eq!(scene.camera.center.longitude, -77.0369);
    assert_abs_diff_eq!(scene.camera.zoom, 1.0);
    assert_eq!(scene.overlay_draw_count, 1);

    let overlay = h.engine.overlay().expect("overlay");
    assert_abs_diff_eq!(overlay.radius_km, 560.0);
    assert_eq!(overlay.corners.len(), 8);
    assert!(h.engine.is_loading());
}

#[test]
fn click_snaps_to_quarter_degree_grid() {
    let mut h = harness();
    let pending = h
        .engine
        .on_map_click(ScreenPoint::new(180.0 + 12.37, 90.0 - 40.1))
        .expect("click")
        .expect("query");

    let point = h.engine.point_of_interest().expect("point");
    assert_abs_diff_eq!(point.longitude, 12.25);
    assert_abs_diff_eq!(point.latitude, 40.0);
    assert_eq!(pending.request.param("geometry"), Some("12.25,40"));
    assert_eq!(h.engine.scene().recenter_count, 0);
}

#[test]
fn click_outside_the_globe_is_ignored() {
    let mut h = harness();
    let outcome = h
        .engine
        .on_map_click(ScreenPoint::new(500.0, 10.0))
        .expect("click");
    assert!(outcome.is_none());
    assert!(h.engine.point_of_interest().is_none());
    assert!(h.engine.query_status().latest_token.is_none());
}

#[test]
fn non_finite_click_is_rejected() {
    let mut h = harness();
    let err = h
        .engine
        .on_map_click(ScreenPoint::new(f64::NAN, 10.0))
        .expect_err("nan click");
    assert!(matches!(err, SyncError::InvalidInput(_)));
}

#[test]
fn drag_outside_buffer_never_captures_the_camera() {
    let mut h = harness();
    h.engine.view_ready().expect("view ready");
    let far_away = h.engine.scene().map_to_screen(GeoPoint::new(100.0, 0.0));

    let start = h
        .engine
        .on_drag(drag_at(DragAction::Start, far_away))
        .expect("drag start");
    assert_eq!(start.disposition, EventDisposition::Propagate);
    assert_eq!(h.engine.drag_phase(), DragPhase::DraggingOutside);

    let update = h
        .engine
        .on_drag(drag_at(DragAction::Update, ScreenPoint::new(10.0, 10.0)))
        .expect("drag update");
    assert_eq!(update.disposition, EventDisposition::Propagate);

    let end = h
        .engine
        .on_drag(drag_at(DragAction::End, ScreenPoint::new(10.0, 10.0)))
        .expect("drag end");
    assert_eq!(end.disposition, EventDisposition::Propagate);
    assert!(end.query.is_none());
    assert_eq!(h.engine.drag_phase(), DragPhase::Idle);
    assert_eq!(h.engine.scene().camera_snapshot_count.get(), 0);
    assert_eq!(h.engine.scene().camera_restore_count, 0);
}

#[test]
fn drag_inside_buffer_moves_overlay_and_queries_last_point() {
    let mut h = harness();
    let initial = h.engine.view_ready().expect("view ready");
    let centre = h.engine.scene().map_to_screen(GeoPoint::new(-77.0369, 38.9072));

    let start = h
        .engine
        .on_drag(drag_at(DragAction::Start, centre))
        .expect("drag start");
    assert_eq!(start.disposition, EventDisposition::StopPropagation);
    assert_eq!(h.engine.drag_phase(), DragPhase::DraggingInsideBuffer);
    assert_eq!(h.engine.scene().camera_snapshot_count.get(), 1);

    let target = h.engine.scene().map_to_screen(GeoPoint::new(-75.0, 39.0));
    let update = h
        .engine
        .on_drag(drag_at(DragAction::Update, target))
        .expect("drag update");
    assert_eq!(update.disposition, EventDisposition::StopPropagation);
    let overlay = h.engine.overlay().expect("overlay");
    assert_abs_diff_eq!(overlay.center.longitude, -75.0, epsilon = 1e-9);

    let end = h
        .engine
        .on_drag(drag_at(DragAction::End, target))
        .expect("drag end");
    assert_eq!(end.disposition, EventDisposition::StopPropagation);
    assert_eq!(h.engine.scene().camera_restore_count, 1);

    let query = end.query.expect("query for last known point");
    assert!(query.token > initial.token);
    assert_abs_diff_eq!(query.point.longitude, -75.0, epsilon = 1e-9);
    assert_abs_diff_eq!(query.point.latitude, 39.0, epsilon = 1e-9);
    assert_eq!(h.engine.drag_phase(), DragPhase::Idle);
}

#[test]
fn drag_after_a_lost_end_resolves_containment_again() {
    let mut h = harness();
    h.engine.view_ready().expect("view ready");
    let centre = h.engine.scene().map_to_screen(GeoPoint::new(-77.0369, 38.9072));
    let captured = h
        .engine
        .on_drag(drag_at(DragAction::Start, centre))
        .expect("drag start");
    assert_eq!(captured.disposition, EventDisposition::StopPropagation);

    // No end event; the next gesture starts far outside the overlay.
    let far_away = h.engine.scene().map_to_screen(GeoPoint::new(100.0, 0.0));
    let restart = h
        .engine
        .on_drag(drag_at(DragAction::Start, far_away))
        .expect("second drag start");
    assert_eq!(restart.disposition, EventDisposition::Propagate);
    assert_eq!(h.engine.drag_phase(), DragPhase::DraggingOutside);

    let target = h.engine.scene().map_to_screen(GeoPoint::new(105.0, 0.0));
    let update = h
        .engine
        .on_drag(drag_at(DragAction::Update, target))
        .expect("drag update");
    assert_eq!(update.disposition, EventDisposition::Propagate);
    let overlay = h.engine.overlay().expect("overlay");
    assert_abs_diff_eq!(overlay.center.longitude, -77.0369, epsilon = 1e-9);

    let end = h
        .engine
        .on_drag(drag_at(DragAction::End, target))
        .expect("drag end");
    assert_eq!(end.disposition, EventDisposition::Propagate);
    assert!(end.query.is_none());
    assert_eq!(h.engine.scene().camera_restore_count, 0);
    assert_eq!(h.engine.drag_phase(), DragPhase::Idle);
}

#[test]
fn zoom_change_is_debounced_and_visual_only() {
    let mut h = harness();
    let pending = h.engine.view_ready().expect("view ready");
    assert_eq!(h.engine.scene().overlay_draw_count, 1);

    h.engine.on_zoom_changed(3.0).expect("zoom");
    h.engine.tick(50.0);
    h.engine.on_zoom_changed(4.0).expect("zoom");
    h.engine.tick(60.0);
    assert!(h.engine.zoom_update_pending());
    assert_eq!(h.engine.scene().overlay_draw_count, 1);

    h.engine.tick(50.0);
    assert!(!h.engine.zoom_update_pending());
    assert_abs_diff_eq!(h.engine.zoom(), 4.0);
    assert_eq!(h.engine.scene().overlay_draw_count, 2);
    assert_abs_diff_eq!(h.engine.overlay().expect("overlay").radius_km, 70.0);
    assert_eq!(h.engine.query_status().latest_token, Some(pending.token));
}

#[test]
fn zoom_settles_while_playback_is_paused() {
    let mut h = harness();
    h.engine.view_ready().expect("view ready");
    assert!(!h.engine.is_playing());
    let frame = h.engine.current_frame();

    h.engine.on_zoom_changed(4.0).expect("zoom");
    assert!(!h.engine.advance_timers(60.0));
    assert_abs_diff_eq!(h.engine.overlay().expect("overlay").radius_km, 560.0);

    assert!(h.engine.advance_timers(60.0));
    assert!(!h.engine.zoom_update_pending());
    assert_abs_diff_eq!(h.engine.overlay().expect("overlay").radius_km, 70.0);
    assert_eq!(h.engine.scene().overlay_draw_count, 2);
    assert_eq!(h.engine.current_frame(), frame);
    assert!(!h.engine.is_playing());
}

#[test]
fn zoom_without_a_point_applies_immediately() {
    let mut h = harness();
    h.engine.on_zoom_changed(5.0).expect("zoom");
    assert_abs_diff_eq!(h.engine.zoom(), 5.0);
    assert!(!h.engine.zoom_update_pending());
    assert!(h.engine.overlay().is_none());
    assert!(h.engine.on_zoom_changed(f64::INFINITY).is_err());
}

#[test]
fn search_select_snaps_queries_and_recentres() {
    let mut h = harness();
    let pending = h
        .engine
        .on_search_select(GeoPoint::new(2.37, 48.86))
        .expect("search");
    assert_eq!(pending.request.param("geometry"), Some("2.25,48.75"));

    let scene = h.engine.scene();
    assert_eq!(scene.recenter_count, 1);
    assert_abs_diff_eq!(scene.camera.center.longitude, 2.25);
    assert_abs_diff_eq!(scene.camera.center.latitude, 48.75);
}

#[test]
fn search_with_invalid_coordinate_fails() {
    let mut h = harness();
    assert!(h.engine.on_search_select(GeoPoint::new(0.0, 95.0)).is_err());
    assert!(h.engine.point_of_interest().is_none());
}
