// Host-side tests for constants and their mathematical relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn breathing_constants_are_within_reasonable_bounds() {
    assert!(PHASE_RATE > 0.0);
    assert!(ORB_MIN_FACTOR > 0.0);
    assert!(ORB_MAX_FACTOR > ORB_MIN_FACTOR);
    assert!(RING_SCALE_FACTOR > 1.0);

    // Spin is decorative and slow
    assert!(SPIN_RATE_X > 0.0 && SPIN_RATE_X < 1.0);
    assert!(SPIN_RATE_Y > 0.0 && SPIN_RATE_Y < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scene_layout_is_consistent() {
    // Haze sits just in front of the backdrop, both behind the orb
    assert!(HAZE_Z > BACKDROP_Z);
    assert!(HAZE_Z < -ORB_RADIUS * ORB_MAX_FACTOR * 2.0);

    // Ring is an annulus that clears the orb at rest
    assert!(RING_OUTER > RING_INNER);
    assert!(RING_INNER > ORB_RADIUS);
    assert!(RING_Y < 0.0);

    // Camera sees the orb
    assert!(CAMERA_Z > ORB_RADIUS * ORB_MAX_FACTOR);
    assert!(CAMERA_NEAR > 0.0 && CAMERA_FAR > CAMERA_Z - BACKDROP_Z);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn opacities_are_fractions() {
    assert!(HAZE_OPACITY > 0.0 && HAZE_OPACITY < 1.0);
    assert!(RING_OPACITY > 0.0 && RING_OPACITY < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn ambience_constants_are_audible() {
    assert!(NOISE_SECONDS > 0.0);
    assert!(NOISE_AMPLITUDE > 0.0 && NOISE_AMPLITUDE <= 1.0);
    // Rain is the bright texture, ocean the darkest
    assert!(RAIN_CUTOFF_HZ > FOREST_CUTOFF_HZ);
    assert!(FOREST_CUTOFF_HZ > OCEAN_CUTOFF_HZ);
    // Swell never drives the cutoff negative at unit intensity
    assert!(OCEAN_LFO_DEPTH_HZ < OCEAN_CUTOFF_HZ);
    assert!(OCEAN_LFO_RATE_HZ > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn slider_defaults_are_sane() {
    assert!((0.0..=1.0).contains(&DEFAULT_VOLUME));
    assert!(DEFAULT_BREATH_SPEED > 0.0);
    assert!(DEFAULT_ORB_SIZE > 0.0);
    assert!(DEFAULT_INTENSITY > 0.0);
    assert!(DEFAULT_SOUND_SPEED > 0.0);
    assert!(VOLUME_STEP > 0.0 && VOLUME_STEP < 1.0);
    assert!(MAX_PIXEL_RATIO >= 1.0);
}

#[test]
fn element_ids_are_distinct() {
    let ids = [
        ID_CANVAS,
        ID_DEVICE,
        ID_ENV_ROW,
        ID_BREATH,
        ID_TIMER,
        ID_STATUS,
        ID_BTN_FULLSCREEN,
        ID_BTN_HELP,
        ID_BTN_BACK,
        ID_BTN_RESET,
        ID_BTN_START,
        ID_BTN_MUTE,
        ID_SOUND_TYPE,
        ID_VOLUME,
        ID_BREATH_SPEED,
        ID_ORB_SIZE,
        ID_INTENSITY,
        ID_SOUND_SPEED,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn help_text_mentions_every_control() {
    for needle in ["▶", "🔇", "fullscreen", "Sliders"] {
        assert!(HELP_TEXT.contains(needle), "help text lacks {needle}");
    }
}
