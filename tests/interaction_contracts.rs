use tracescope::app::types::{DragTarget, MOVEPIN_SIZE};
use tracescope::ScopeView;

const WIDTH: f32 = 845.0;
const HEIGHT: f32 = 400.0;

fn scope(channels: usize) -> ScopeView {
    let mut s = ScopeView::new(10_000, 100_000);
    s.set_view_size(WIDTH, HEIGHT);
    s.update_channels(channels);
    s
}

#[test]
fn slider_drag_moves_position_and_clamps() {
    let mut s = scope(1);
    let pin_y = 0.4 * HEIGHT;
    s.pointer_pressed(MOVEPIN_SIZE, pin_y);
    assert_eq!(s.drag, DragTarget::Slider(0));
    assert_eq!(s.selected_channel, 0);

    // 100 px down at 400 px height: +0.25
    s.pointer_moved(pin_y + 100.0);
    assert!((s.views[0].pos - 0.65).abs() < 1e-6);

    s.pointer_moved(HEIGHT * 2.0);
    assert_eq!(s.views[0].pos, 0.95);
    s.pointer_moved(-HEIGHT);
    assert_eq!(s.views[0].pos, 0.05);

    s.pointer_released();
    assert_eq!(s.drag, DragTarget::None);
}

#[test]
fn press_misses_pin_outside_hit_circle() {
    let mut s = scope(1);
    // inside the pin column but past the circular hit region
    s.pointer_pressed(MOVEPIN_SIZE, 0.4 * HEIGHT + MOVEPIN_SIZE);
    assert_eq!(s.drag, DragTarget::None);
}

#[test]
fn gain_drag_is_proportional_to_anchor_distance() {
    let mut s = scope(1);
    let center = 0.4 * HEIGHT;
    // hit band is 40 + 20*gain = 60 px at default gain
    s.pointer_pressed(200.0, center + 50.0);
    assert_eq!(s.drag, DragTarget::Gain(0));

    s.pointer_moved(center + 100.0);
    assert!((s.views[0].gain - 2.0).abs() < 1e-4);

    s.pointer_moved(center + 25.0);
    assert!((s.views[0].gain - 0.5).abs() < 1e-4);

    // collapsing onto the channel line floors at the minimum
    s.pointer_moved(center);
    assert_eq!(s.views[0].gain, 0.001);

    s.pointer_moved(center + 50_000.0);
    assert_eq!(s.views[0].gain, 10.0);
}

#[test]
fn gain_band_misses_far_from_channel() {
    let mut s = scope(1);
    s.pointer_pressed(200.0, 0.4 * HEIGHT + 61.0);
    assert_eq!(s.drag, DragTarget::None);
}

#[test]
fn threshold_drag_stays_between_pin_and_position() {
    let mut s = scope(1);
    s.toggle_thresh_mode();
    let thr_y = HEIGHT * (0.4 - 0.1);
    s.pointer_pressed(WIDTH - MOVEPIN_SIZE, thr_y);
    assert_eq!(s.drag, DragTarget::Threshold);

    s.pointer_moved(40.0);
    assert!((s.views[0].thresh - 0.3).abs() < 1e-6);

    // dragging above the view clamps the pin at MOVEPIN_SIZE
    s.pointer_moved(-100.0);
    assert!((s.views[0].thresh - (0.4 - MOVEPIN_SIZE / HEIGHT)).abs() < 1e-6);
    assert!(s.threshold_pos() >= MOVEPIN_SIZE / 2.0);

    // dragging below clamps at the channel position (thresh 0)
    s.pointer_moved(HEIGHT * 2.0);
    assert_eq!(s.views[0].thresh, 0.0);
    assert!(s.threshold_pos() <= s.views[0].pos * HEIGHT);

    s.pointer_released();
    assert_eq!(s.drag, DragTarget::None);
}

#[test]
fn threshold_scales_inversely_with_gain() {
    let mut s = scope(1);
    s.toggle_thresh_mode();
    s.views[0].gain = 2.0;
    let thr_y = HEIGHT * (0.4 - 0.1 * 2.0);
    s.pointer_pressed(WIDTH - MOVEPIN_SIZE, thr_y);
    assert_eq!(s.drag, DragTarget::Threshold);
    s.pointer_moved(40.0);
    assert!((s.views[0].thresh - (0.4 - 0.1) / 2.0).abs() < 1e-6);
}

#[test]
fn at_most_one_drag_target_per_press() {
    let mut s = scope(3);
    s.toggle_thresh_mode();

    // grab a position pin, then press elsewhere without releasing:
    // the second press must not steal or stack a drag
    s.pointer_pressed(MOVEPIN_SIZE, 0.4 * HEIGHT);
    assert_eq!(s.drag, DragTarget::Slider(0));
    s.pointer_pressed(200.0, 0.5 * HEIGHT);
    assert_eq!(s.drag, DragTarget::Slider(0));
    s.pointer_released();

    // the gain band covers most of the view, but the right column is
    // reserved for the threshold pin while threshold mode is on
    s.pointer_pressed(WIDTH - MOVEPIN_SIZE, 0.4 * HEIGHT + 40.0);
    assert_eq!(s.drag, DragTarget::None);
    s.pointer_released();

    // and the pin column never starts a gain drag
    s.pointer_pressed(MOVEPIN_SIZE * 1.4, 0.4 * HEIGHT + 59.0);
    assert_eq!(s.drag, DragTarget::None);
}

#[test]
fn wheel_on_pin_scales_gain() {
    let mut s = scope(1);
    let pin_y = 0.4 * HEIGHT;

    s.wheel(MOVEPIN_SIZE, pin_y, false);
    s.wheel(MOVEPIN_SIZE, pin_y, false);
    assert!((s.views[0].gain - 0.64).abs() < 1e-4);

    for _ in 0..100 {
        s.wheel(MOVEPIN_SIZE, pin_y, false);
    }
    assert_eq!(s.views[0].gain, 0.001);

    for _ in 0..100 {
        s.wheel(MOVEPIN_SIZE, pin_y, true);
    }
    assert_eq!(s.views[0].gain, 10.0);
}

#[test]
fn wheel_off_pin_zooms_timebase() {
    let mut s = scope(1);
    let ts = s.time_scale;
    s.wheel(400.0, 100.0, true);
    assert!((s.time_scale - ts * 0.8).abs() < 1e-6);
    s.wheel(400.0, 100.0, false);
    s.wheel(400.0, 100.0, false);
    assert!((s.time_scale - ts * 0.8 * 1.2 * 1.2).abs() < 1e-6);
}

#[test]
fn wheel_in_threshold_column_does_nothing() {
    let mut s = scope(1);
    s.toggle_thresh_mode();
    let ts = s.time_scale;
    let gain = s.views[0].gain;
    s.wheel(WIDTH - MOVEPIN_SIZE, 100.0, true);
    assert_eq!(s.time_scale, ts);
    assert_eq!(s.views[0].gain, gain);
}

#[test]
fn wheel_inside_pin_column_without_hit_leaves_zoom_alone() {
    let mut s = scope(1);
    let ts = s.time_scale;
    s.wheel(MOVEPIN_SIZE, 0.4 * HEIGHT + 200.0, true);
    assert_eq!(s.time_scale, ts);
}
