use super::constants::{
    ORB_MAX_FACTOR, ORB_MIN_FACTOR, PHASE_RATE, RING_SCALE_FACTOR, SPIN_RATE_X, SPIN_RATE_Y,
};
use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

/// Text shown in the breath pill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreathLabel {
    In,
    Out,
}

impl BreathLabel {
    /// "In" while the oscillation is rising, i.e. while `cos(phase) >= 0`.
    #[inline]
    pub fn for_phase(phase: f64) -> Self {
        if phase.cos() >= 0.0 {
            BreathLabel::In
        } else {
            BreathLabel::Out
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BreathLabel::In => "Breathe In",
            BreathLabel::Out => "Breathe Out",
        }
    }
}

/// Format elapsed seconds as zero-padded `MM:SS`, flooring to whole seconds.
pub fn format_time(seconds: f64) -> String {
    let s = if seconds.is_finite() {
        seconds.max(0.0).floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", s / 60, s % 60)
}

/// Map a phase to a 0..1 oscillation.
#[inline]
pub fn oscillation(phase: f64) -> f32 {
    ((phase.sin() + 1.0) * 0.5) as f32
}

/// Orb scale for a phase, between 0.92x and 1.60x of `base`.
#[inline]
pub fn orb_scale(phase: f64, base: f32) -> f32 {
    let min_s = base * ORB_MIN_FACTOR;
    let max_s = base * ORB_MAX_FACTOR;
    min_s + (max_s - min_s) * oscillation(phase)
}

/// Ring keeps its flat proportions; only x/y follow the orb.
#[inline]
pub fn ring_scale(orb: f32) -> Vec3 {
    Vec3::new(orb * RING_SCALE_FACTOR, orb * RING_SCALE_FACTOR, 1.0)
}

#[inline]
pub fn advance_phase(phase: f64, dt_sec: f64, breath_speed: f32) -> f64 {
    phase + dt_sec * f64::from(breath_speed) * PHASE_RATE
}

/// Decorative rotation increment (x, y), independent of the breath phase.
#[inline]
pub fn spin_step(dt_sec: f64) -> Vec2 {
    let dt = dt_sec as f32;
    Vec2::new(dt * SPIN_RATE_X, dt * SPIN_RATE_Y)
}

/// Accumulate spin, kept within one turn so f32 angles stay precise.
#[inline]
pub fn advance_spin(spin: Vec2, dt_sec: f64) -> Vec2 {
    (spin + spin_step(dt_sec)) % TAU
}

/// Everything the scene needs from one breathing step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreathFrame {
    pub orb_scale: Vec3,
    pub ring_scale: Vec3,
    pub orb_rotation: Vec3,
    pub label: BreathLabel,
}

impl BreathFrame {
    pub fn new(phase: f64, base: f32, spin: Vec2) -> Self {
        let s = orb_scale(phase, base);
        Self {
            orb_scale: Vec3::splat(s),
            ring_scale: ring_scale(s),
            orb_rotation: Vec3::new(spin.x, spin.y, 0.0),
            label: BreathLabel::for_phase(phase),
        }
    }
}
