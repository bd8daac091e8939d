// Host-side tests for the session controller: breath/timer state machine,
// theme selection and ambience lifecycle, driven against a headless scene
// and a recording audio backend.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod breath {
    include!("../src/core/breath.rs");
}
mod theme {
    include!("../src/core/theme.rs");
}
mod scene {
    include!("../src/core/scene.rs");
}
mod ambience {
    include!("../src/core/ambience.rs");
}
mod session {
    include!("../src/core/session.rs");
}

use ambience::*;
use breath::*;
use constants::*;
use glam::Vec3;
use scene::*;
use session::*;
use theme::hex_to_linear;

struct MockGraph {
    nodes: usize,
}

#[derive(Default)]
struct MockBackend {
    unavailable: bool,
    output_ready: bool,
    nodes_created: usize,
    nodes_disconnected: usize,
    live_graphs: usize,
    built: Vec<GraphSpec>,
    resumes: usize,
    volume: Option<f32>,
    closed: bool,
}

impl AudioBackend for MockBackend {
    type Graph = MockGraph;

    fn ensure_output(&mut self, volume: f32) -> Result<(), AudioError> {
        if self.unavailable {
            return Err(AudioError::Unavailable("blocked".into()));
        }
        if !self.output_ready {
            self.output_ready = true;
            self.volume = Some(volume);
        }
        Ok(())
    }

    fn resume(&mut self) {
        self.resumes += 1;
    }

    fn build(&mut self, spec: &GraphSpec) -> Result<MockGraph, AudioError> {
        // source + filter, plus oscillator and depth gain for a swell
        let nodes = if spec.filter.lfo.is_some() { 4 } else { 2 };
        self.nodes_created += nodes;
        self.live_graphs += 1;
        self.built.push(*spec);
        Ok(MockGraph { nodes })
    }

    fn teardown(&mut self, graph: MockGraph) {
        self.nodes_disconnected += graph.nodes;
        self.live_graphs -= 1;
    }

    fn set_volume(&mut self, volume: f32) {
        if self.output_ready {
            self.volume = Some(volume);
        }
    }

    fn close(&mut self) {
        self.closed = true;
        self.output_ready = false;
    }
}

fn controller() -> Controller<MockBackend> {
    Controller::new(MockBackend::default(), Sliders::default(), SoundType::Rain)
}

fn backend(c: &Controller<MockBackend>) -> &MockBackend {
    c.ambience().backend()
}

// ---------------- Breath / timer ----------------

#[test]
fn starts_idle_and_muted() {
    let c = controller();
    assert_eq!(c.session().mode(), Mode::Idle);
    assert!(c.session().muted);
    assert_eq!(c.status(), STATUS_INITIAL);
    assert_eq!(c.timer_text(), "00:00");
    assert_eq!(c.breath_label(), BreathLabel::In);
    assert_eq!(c.start_glyph(), GLYPH_PLAY);
    assert_eq!(c.mute_glyph(), GLYPH_MUTED);
    assert_eq!(c.current_theme().id, "forest");
}

#[test]
fn toggle_start_cycles_running_and_paused() {
    let mut c = controller();
    c.toggle_start();
    assert_eq!(c.session().mode(), Mode::Running);
    assert!(c.session().timer_active);
    assert_eq!(c.status(), STATUS_RUNNING);
    assert_eq!(c.start_glyph(), GLYPH_PAUSE);
    assert_eq!(backend(&c).resumes, 1);

    c.toggle_start();
    assert_eq!(c.session().mode(), Mode::Paused);
    assert!(!c.session().timer_active);
    assert_eq!(c.status(), STATUS_PAUSED);
    assert_eq!(c.start_glyph(), GLYPH_PLAY);
    assert_eq!(backend(&c).resumes, 1);

    c.toggle_start();
    assert_eq!(c.session().mode(), Mode::Running);
    assert_eq!(backend(&c).resumes, 2);
}

#[test]
fn idle_tick_changes_nothing() {
    let mut c = controller();
    let mut scene = Scene::new();
    let update = c.tick(1.0, &mut scene);
    assert_eq!(update, FrameUpdate::default());
    assert_eq!(c.session().elapsed, 0.0);
    assert_eq!(c.session().phase, 0.0);
    assert_eq!(scene.object(NodeId::Orb).transform.scale, Vec3::ONE);
}

#[test]
fn running_tick_advances_timer_and_reports_changes_only() {
    let mut c = controller();
    let mut scene = Scene::new();
    c.toggle_start();

    let first = c.tick(0.5, &mut scene);
    assert_eq!(first.timer_text, None);
    assert!(first.breath.is_some());

    let second = c.tick(0.5, &mut scene);
    assert_eq!(second.timer_text.as_deref(), Some("00:01"));
    assert_eq!(c.timer_text(), "00:01");

    for _ in 0..64 {
        c.tick(1.0, &mut scene);
    }
    assert_eq!(c.timer_text(), "01:05");
}

#[test]
fn running_tick_drives_the_orb() {
    let mut c = controller();
    c.set_orb_size(1.2);
    c.set_breath_speed(2.0);
    let mut scene = Scene::new();
    c.toggle_start();
    let update = c.tick(0.25, &mut scene);

    let phase = c.session().phase;
    assert!((phase - 0.25 * 2.0 * PHASE_RATE).abs() < 1e-12);
    let s = orb_scale(phase, 1.2);
    let orb = scene.object(NodeId::Orb).transform;
    assert!((orb.scale - Vec3::splat(s)).abs().max_element() < 1e-6);
    let ring = scene.object(NodeId::Ring).transform;
    assert!((ring.scale.x - s * RING_SCALE_FACTOR).abs() < 1e-6);
    assert!(orb.rotation.y > orb.rotation.x && orb.rotation.x > 0.0);
    assert_eq!(c.breath_label(), BreathLabel::for_phase(phase));
    assert_eq!(update.breath.map(|b| b.label), Some(c.breath_label()));
}

#[test]
fn timer_tracks_wall_time_over_long_sessions() {
    let mut c = controller();
    let mut scene = Scene::new();
    c.toggle_start();
    let dt = 1.0 / 128.0;
    for _ in 0..(5 * 3600 * 128) {
        c.tick(dt, &mut scene);
    }
    assert_eq!(c.session().elapsed, 18_000.0);
    assert_eq!(c.timer_text(), "300:00");

    let before = c.session().elapsed;
    for _ in 0..(60 * 128) {
        c.tick(dt, &mut scene);
    }
    assert!((c.session().elapsed - before - 60.0).abs() < 1e-9);
    assert_eq!(c.timer_text(), "301:00");
    assert!((c.session().phase - 18_060.0 * PHASE_RATE).abs() < 1e-6);
}

#[test]
fn paused_tick_freezes_everything() {
    let mut c = controller();
    let mut scene = Scene::new();
    c.toggle_start();
    c.tick(1.3, &mut scene);
    c.toggle_start();
    let before = *c.session();
    let scale = scene.object(NodeId::Orb).transform.scale;

    let update = c.tick(5.0, &mut scene);
    assert_eq!(update, FrameUpdate::default());
    assert_eq!(c.session().elapsed, before.elapsed);
    assert_eq!(c.session().phase, before.phase);
    assert_eq!(scene.object(NodeId::Orb).transform.scale, scale);
}

#[test]
fn negative_dt_is_ignored() {
    let mut c = controller();
    let mut scene = Scene::new();
    c.toggle_start();
    c.tick(-3.0, &mut scene);
    assert_eq!(c.session().elapsed, 0.0);
    assert_eq!(c.session().phase, 0.0);
}

#[test]
fn reset_while_running_pauses_and_zeroes() {
    let mut c = controller();
    let mut scene = Scene::new();
    c.toggle_start();
    for _ in 0..3 {
        c.tick(1.0, &mut scene);
    }
    assert_eq!(c.timer_text(), "00:03");

    c.reset();
    assert_eq!(c.session().mode(), Mode::Paused);
    assert!(!c.session().timer_active);
    assert_eq!(c.session().elapsed, 0.0);
    assert_eq!(c.session().phase, 0.0);
    assert_eq!(c.timer_text(), "00:00");
    assert_eq!(c.breath_label(), BreathLabel::In);
    assert_eq!(c.status(), STATUS_RESET);

    assert_eq!(c.tick(2.0, &mut scene), FrameUpdate::default());

    c.toggle_start();
    assert_eq!(c.session().mode(), Mode::Running);
}

#[test]
fn reset_from_idle_then_start_runs() {
    let mut c = controller();
    c.reset();
    assert!(!c.session().running);
    c.toggle_start();
    assert_eq!(c.session().mode(), Mode::Running);
    assert!(c.session().timer_active);
}

// ---------------- Themes ----------------

#[test]
fn select_theme_recolors_and_reports() {
    let mut c = controller();
    let mut scene = Scene::new();
    let t = c.select_theme("night", &mut scene);
    assert_eq!(t.id, "night");
    assert_eq!(c.status(), "Theme: Night Sky");
    assert!(c.is_current_theme("night"));
    assert_eq!(scene.color(ColorSlot::Background), hex_to_linear(0x000010));
    assert_eq!(scene.color(ColorSlot::OrbBody), hex_to_linear(0xffffff));
}

#[test]
fn unknown_theme_falls_back_to_first() {
    let mut c = controller();
    let mut scene = Scene::new();
    c.select_theme("mountain", &mut scene);
    let t = c.select_theme("does-not-exist", &mut scene);
    assert_eq!(t.id, "forest");
    assert_eq!(c.status(), "Theme: Forest Glade");
    assert_eq!(scene.color(ColorSlot::Backdrop), hex_to_linear(0x0a2017));
}

#[test]
fn select_theme_by_index() {
    let mut c = controller();
    let mut scene = Scene::new();
    assert_eq!(c.select_theme_index(4, &mut scene).map(|t| t.id), Some("minimal"));
    assert_eq!(c.status(), "Theme: Minimal");
    assert!(c.select_theme_index(5, &mut scene).is_none());
    assert_eq!(c.current_theme().id, "minimal");
}

#[test]
fn theme_does_not_touch_breathing_state() {
    let mut c = controller();
    let mut scene = Scene::new();
    c.toggle_start();
    c.tick(0.7, &mut scene);
    let before = *c.session();
    c.select_theme("beach", &mut scene);
    assert_eq!(*c.session(), before);
}

// ---------------- Ambience ----------------

#[test]
fn muted_controls_never_build_audio() {
    let mut c = controller();
    c.set_sound(SoundType::Ocean);
    c.set_intensity(1.4);
    c.set_sound_speed(1.6);
    assert_eq!(backend(&c).nodes_created, 0);
    assert!(!backend(&c).output_ready);
    assert!(!c.ambience().is_playing());
}

#[test]
fn unmute_plays_and_mute_releases_all_nodes() {
    let mut c = controller();
    c.toggle_mute();
    assert!(!c.session().muted);
    assert_eq!(c.status(), STATUS_AUDIO_PLAYING);
    assert_eq!(c.mute_glyph(), GLYPH_UNMUTED);
    assert_eq!(backend(&c).live_graphs, 1);
    assert_eq!(backend(&c).volume, Some(DEFAULT_VOLUME));

    c.set_sound(SoundType::Ocean);
    c.set_sound(SoundType::Forest);
    assert_eq!(backend(&c).live_graphs, 1);

    c.toggle_mute();
    assert_eq!(c.status(), STATUS_AUDIO_MUTED);
    assert_eq!(backend(&c).live_graphs, 0);
    assert_eq!(backend(&c).nodes_created, backend(&c).nodes_disconnected);
}

#[test]
fn failed_unmute_stays_muted_and_says_so() {
    let mock = MockBackend {
        unavailable: true,
        ..MockBackend::default()
    };
    let mut c = Controller::new(mock, Sliders::default(), SoundType::Rain);
    c.toggle_mute();
    assert!(c.session().muted);
    assert!(!c.ambience().is_playing());
    assert_eq!(c.status(), STATUS_AUDIO_UNAVAILABLE);
    assert_eq!(c.mute_glyph(), GLYPH_MUTED);

    // output recovers; the next press unmutes normally
    c.ambience_mut().backend_mut().unavailable = false;
    c.toggle_mute();
    assert!(!c.session().muted);
    assert_eq!(c.status(), STATUS_AUDIO_PLAYING);
    assert_eq!(backend(&c).live_graphs, 1);
}

#[test]
fn mute_then_unmute_rebuilds_the_same_graph() {
    let mut c = controller();
    c.set_sound(SoundType::Ocean);
    c.toggle_mute();
    c.toggle_mute();
    c.toggle_mute();
    let built = &backend(&c).built;
    assert_eq!(built.len(), 2);
    assert_eq!(built[0], built[1]);
    assert!(built[0].filter.lfo.is_some());
}

#[test]
fn slider_changes_restart_with_new_parameters() {
    let mut c = controller();
    c.toggle_mute();
    c.set_intensity(2.0);
    let last = *backend(&c).built.last().unwrap();
    assert!((last.filter.cutoff_hz - RAIN_CUTOFF_HZ * 2.0).abs() < 1e-3);

    c.set_sound_speed(1.5);
    let last = *backend(&c).built.last().unwrap();
    assert_eq!(last.playback_rate, 1.5);
    assert_eq!(backend(&c).built.len(), 3);
    assert_eq!(backend(&c).live_graphs, 1);
}

#[test]
fn volume_is_clamped_and_live() {
    let mut c = controller();
    c.toggle_mute();
    let builds = backend(&c).built.len();
    c.set_volume(0.8);
    assert_eq!(backend(&c).volume, Some(0.8));
    c.set_volume(1.7);
    assert_eq!(c.sliders().volume, 1.0);
    assert_eq!(backend(&c).volume, Some(1.0));
    c.set_volume(-0.2);
    assert_eq!(c.sliders().volume, 0.0);
    // volume never rebuilds the graph
    assert_eq!(backend(&c).built.len(), builds);
}

#[test]
fn shutdown_stops_noise_and_closes_output() {
    let mut c = controller();
    c.toggle_mute();
    c.shutdown();
    assert_eq!(backend(&c).live_graphs, 0);
    assert!(backend(&c).closed);
    assert_eq!(backend(&c).nodes_created, backend(&c).nodes_disconnected);
}

// ---------------- Misc surface ----------------

#[test]
fn fullscreen_toggle_direction() {
    assert_eq!(FullscreenChange::toggle_from(false), FullscreenChange::Entered);
    assert_eq!(FullscreenChange::toggle_from(true), FullscreenChange::Exited);
    assert_eq!(FullscreenChange::Entered.method_name(), "requestFullscreen");
    assert_eq!(FullscreenChange::Exited.method_name(), "exitFullscreen");
}

#[test]
fn rejected_fullscreen_request_reports_blocked() {
    let mut c = controller();
    c.toggle_start();
    assert_eq!(c.status(), STATUS_RUNNING);
    c.fullscreen_result(Err(()));
    assert_eq!(c.status(), STATUS_FULLSCREEN_BLOCKED);
}

#[test]
fn fullscreen_and_back_report_status() {
    let mut c = controller();
    c.fullscreen_result(Ok(FullscreenChange::Entered));
    assert_eq!(c.status(), STATUS_FULLSCREEN_ON);
    c.fullscreen_result(Ok(FullscreenChange::Exited));
    assert_eq!(c.status(), STATUS_FULLSCREEN_OFF);
    c.fullscreen_result(Err(()));
    assert_eq!(c.status(), STATUS_FULLSCREEN_BLOCKED);
    c.back();
    assert_eq!(c.status(), STATUS_BACK);
}
