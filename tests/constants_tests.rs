// Host-side checks on tuning constants and their relationships.

use wavescope_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn analyser_shape_is_consistent() {
    assert!(FFT_SIZE.is_power_of_two());
    assert_eq!(FREQUENCY_BIN_COUNT * 2, FFT_SIZE);
    assert_eq!(RIBBON_SLOT_WIDTH, FFT_SIZE);
    assert!(ANALYSER_MIN_DB < ANALYSER_MAX_DB);
    assert!((0.0..1.0).contains(&ANALYSER_SMOOTHING));
}

#[test]
fn defaults_sit_inside_their_ranges() {
    let within = |v: f32, (lo, hi): (f32, f32)| lo <= v && v <= hi;
    assert!(within(DEFAULT_IMPULSE_STRENGTH, IMPULSE_STRENGTH_RANGE));
    assert!(within(DEFAULT_DAMPING, DAMPING_RANGE));
    assert!(within(DEFAULT_EMISSIVE_INTENSITY, EMISSIVE_INTENSITY_RANGE));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn impulse_ring_stays_inside_container() {
    assert!(IMPULSE_RING_FRACTION > 0.0 && IMPULSE_RING_FRACTION < 1.0);
    assert!(FLUID_CONTAINER_RADIUS > 0.0);
    assert!(FLUID_GRID_SIZE >= 3);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn ribbon_layout_spans_left_to_right() {
    assert!(RIBBON_LEFT_END < RIBBON_RIGHT_END);
    assert!(RIBBON_LINE_SEPARATION > 0.0);
    assert!(RIBBON_LINE_COUNT > 1);
}
