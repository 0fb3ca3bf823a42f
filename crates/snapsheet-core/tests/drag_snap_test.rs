//! Drag gestures end to end: pointer samples in, resolved snaps and surface
//! updates out.

use snapsheet_core::{PointerEventKind, PointerInput, SheetPhase, CLOSED_HEIGHT, FULL_HEIGHT};
use snapsheet_testing::{SheetTestRule, SurfaceCall};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn open_rule(close_on_snap_to_zero: bool) -> SheetTestRule {
    let mut rule = SheetTestRule::new();
    let config = rule
        .config([0.0, 50.0, 100.0], 50.0)
        .with_close_on_snap_to_zero(close_on_snap_to_zero);
    rule.mount(config);
    rule.advance_by(200);
    assert_eq!(rule.sheet().phase(), SheetPhase::Open);
    rule
}

#[test]
fn release_near_top_snaps_fullscreen() {
    let rule = open_rule(false);

    rule.press(600.0);
    assert!(rule.sheet().is_dragging());
    assert!(rule.surface().is_grabbing());
    rule.move_to(600.0 - rule.pixels_for(30.0));
    assert_close(rule.sheet().height(), 80.0);
    rule.release();

    assert!(!rule.sheet().is_dragging());
    assert!(!rule.surface().is_grabbing());
    assert_eq!(rule.sheet().height(), FULL_HEIGHT);
    assert_eq!(rule.surface().height(), FULL_HEIGHT);
    assert!(rule.surface().is_fullscreen());
    assert_eq!(rule.callbacks().snaps(), vec![100.0]);
    assert_eq!(
        rule.surface().transition().as_deref(),
        Some("height 0.5s, max-height 200ms ease")
    );

    rule.advance_by(200);
    assert_eq!(rule.surface().transition(), None);
    assert_eq!(rule.callbacks().close_count(), 0);
}

#[test]
fn release_near_bottom_closes_when_configured() {
    let rule = open_rule(true);

    rule.drag(400.0, 400.0 + rule.pixels_for(40.0), 4);

    assert_eq!(rule.callbacks().snaps(), vec![0.0]);
    assert_eq!(rule.sheet().phase(), SheetPhase::Closing);
    assert!(!rule.sheet().is_shown());
    assert!(!rule.surface().overlay_visible());
    assert_eq!(rule.callbacks().close_count(), 0);

    rule.advance_by(199);
    assert_eq!(rule.callbacks().close_count(), 0);
    rule.advance_by(1);
    assert_eq!(rule.callbacks().close_count(), 1);
    assert_eq!(rule.sheet().phase(), SheetPhase::Closed);

    rule.run_until_idle();
    assert_eq!(rule.callbacks().close_count(), 1);
}

#[test]
fn release_at_zero_stays_mounted_without_auto_close() {
    let rule = open_rule(false);

    rule.drag(400.0, 400.0 + rule.pixels_for(45.0), 3);

    assert_eq!(rule.callbacks().snaps(), vec![0.0]);
    assert_eq!(rule.sheet().height(), CLOSED_HEIGHT);
    assert!(!rule.sheet().is_shown());
    assert_eq!(rule.sheet().phase(), SheetPhase::Open);

    rule.run_until_idle();
    assert_eq!(rule.callbacks().close_count(), 0);
    assert!(rule.surface().overlay_visible());
}

#[test]
fn release_off_the_handle_still_ends_the_drag() {
    let rule = open_rule(false);

    rule.press(400.0);
    rule.move_to(400.0 - rule.pixels_for(35.0));
    // The pointer left the handle; the page-wide listener takes the release.
    assert!(rule.listeners().dispatch_pointer_up());

    assert!(!rule.sheet().is_dragging());
    assert!(!rule.surface().is_grabbing());
    assert_eq!(rule.sheet().height(), FULL_HEIGHT);
    assert_eq!(rule.callbacks().snaps(), vec![100.0]);

    // Later moves no longer drag the sheet.
    assert!(rule.move_to(700.0));
    assert_eq!(rule.sheet().height(), FULL_HEIGHT);
}

#[test]
fn stray_release_never_auto_closes() {
    let mut rule = SheetTestRule::new();
    let config = rule
        .config([0.0, 100.0], 0.0)
        .with_close_on_snap_to_zero(true);
    rule.mount(config);

    rule.release();

    assert_eq!(rule.callbacks().snaps(), vec![0.0]);
    assert_eq!(rule.sheet().phase(), SheetPhase::Opening);
    rule.run_until_idle();
    assert_eq!(rule.sheet().phase(), SheetPhase::Open);
    assert_eq!(rule.callbacks().close_count(), 0);
}

#[test]
fn height_stays_in_range_through_overshooting_drags() {
    let rule = open_rule(false);

    rule.press(500.0);
    for y in [300.0, -400.0, -2000.0, 100.0, 2400.0, 5000.0, 450.0] {
        rule.move_to(y);
        let height = rule.sheet().height();
        assert!((CLOSED_HEIGHT..=FULL_HEIGHT).contains(&height), "{height}");
    }
    rule.release();

    for height in rule.surface().heights() {
        assert!((CLOSED_HEIGHT..=FULL_HEIGHT).contains(&height), "{height}");
    }
    let resolved = rule.callbacks().last_snap().expect("snap recorded");
    assert!([0.0, 50.0, 100.0].contains(&resolved));
}

#[test]
fn fullscreen_flag_follows_the_top_edge() {
    let rule = open_rule(false);

    rule.press(700.0);
    rule.move_to(0.0);
    assert_eq!(rule.sheet().height(), FULL_HEIGHT);
    assert!(rule.surface().is_fullscreen());

    rule.move_to(rule.pixels_for(10.0));
    assert_close(rule.sheet().height(), 90.0);
    // Leaving the top edge clears the flag on the following move.
    assert!(rule.surface().is_fullscreen());
    rule.move_to(rule.pixels_for(10.0));
    assert!(!rule.surface().is_fullscreen());

    rule.release();
    assert_eq!(rule.sheet().height(), FULL_HEIGHT);
    assert!(rule.surface().is_fullscreen());

    // Grabbing the handle again clears the flag until the top is reached.
    rule.press(100.0);
    assert!(!rule.surface().is_fullscreen());
    rule.release();
}

#[test]
fn moves_without_a_drag_only_do_housekeeping() {
    let rule = open_rule(false);
    rule.surface().clear_calls();

    assert!(rule.move_to(120.0));
    assert!(rule.move_to(10.0));

    assert_eq!(rule.sheet().height(), 50.0);
    assert_eq!(
        rule.surface().calls(),
        vec![SurfaceCall::Fullscreen(false), SurfaceCall::Fullscreen(false)]
    );
}

#[test]
fn each_release_resolves_to_a_configured_snap() {
    let mut rule = SheetTestRule::new();
    let snaps = [0.0, 25.0, 60.0, 90.0];
    rule.mount(rule.config(snaps, 60.0));
    rule.advance_by(200);

    let mut y = 500.0;
    for travel in [-37.0, 81.0, -163.0, 12.0, 240.0, -410.0, 55.0] {
        rule.drag(y, y + travel, 2);
        y += travel;
        let snapped = rule.sheet().height();
        assert!(snaps.contains(&snapped), "{snapped}");
        assert_eq!(rule.callbacks().last_snap(), Some(snapped));
    }
    assert_eq!(rule.callbacks().snaps().len(), 7);
}

#[test]
fn pointer_cancel_ends_the_drag() {
    let rule = open_rule(false);

    rule.press(400.0);
    rule.move_to(400.0 - rule.pixels_for(50.0));
    rule.sheet()
        .pointer(&PointerInput::pointer(PointerEventKind::Cancel, 0.0));

    assert!(!rule.sheet().is_dragging());
    assert_eq!(rule.sheet().height(), FULL_HEIGHT);
    assert_eq!(rule.callbacks().snaps(), vec![100.0]);
}

#[test]
fn touch_samples_follow_the_first_touch() {
    let rule = open_rule(false);

    rule.sheet()
        .pointer(&PointerInput::touch(PointerEventKind::Down, [500.0, 100.0]));
    rule.listeners().dispatch_pointer_move(&PointerInput::touch(
        PointerEventKind::Move,
        [500.0 - rule.pixels_for(37.5), 900.0],
    ));
    assert_eq!(rule.sheet().height(), 87.5);

    rule.sheet()
        .pointer(&PointerInput::touch(PointerEventKind::Up, std::iter::empty()));
    assert_eq!(rule.callbacks().snaps(), vec![100.0]);
}

#[test]
fn programmatic_snap_to_zero_never_closes() {
    let rule = open_rule(true);

    rule.handle().snap_to(3.0);

    assert_eq!(rule.sheet().height(), CLOSED_HEIGHT);
    assert_eq!(rule.callbacks().snaps(), vec![0.0]);
    rule.run_until_idle();
    assert_eq!(rule.sheet().phase(), SheetPhase::Open);
    assert_eq!(rule.callbacks().close_count(), 0);
}

#[test]
fn drag_during_opening_keeps_transition_until_settled() {
    let mut rule = SheetTestRule::new();
    rule.mount(rule.config([0.0, 50.0, 100.0], 50.0));

    rule.advance_by(100);
    rule.drag(500.0, 500.0 - rule.pixels_for(50.0), 1);
    assert_eq!(rule.sheet().height(), FULL_HEIGHT);

    // Opening finishes first but the settle transition is still running.
    rule.advance_by(100);
    assert_eq!(rule.sheet().phase(), SheetPhase::Open);
    assert!(rule.surface().transition().is_some());

    rule.advance_by(100);
    assert_eq!(rule.surface().transition(), None);
}
