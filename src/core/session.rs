use super::ambience::{Ambience, AmbienceParams, AudioBackend, SoundType};
use super::breath::{advance_phase, advance_spin, format_time, BreathFrame, BreathLabel};
use super::constants::*;
use super::scene::{apply_breath, apply_theme, SceneTarget};
use super::theme::{Theme, ThemeRegistry};
use glam::Vec2;

/// Breathing session flags and counters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionState {
    pub running: bool,
    pub paused: bool,
    pub phase: f64,
    pub elapsed: f64,
    pub timer_active: bool,
    pub muted: bool,
    pub spin: Vec2,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            running: false,
            paused: false,
            phase: 0.0,
            elapsed: 0.0,
            timer_active: false,
            muted: true,
            spin: Vec2::ZERO,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Running,
    Paused,
}

impl SessionState {
    pub fn mode(&self) -> Mode {
        match (self.running, self.paused) {
            (false, _) => Mode::Idle,
            (true, false) => Mode::Running,
            (true, true) => Mode::Paused,
        }
    }

    #[inline]
    fn breathing(&self) -> bool {
        self.running && !self.paused
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sliders {
    pub volume: f32,
    pub breath_speed: f32,
    pub orb_size: f32,
    pub intensity: f32,
    pub sound_speed: f32,
}

impl Default for Sliders {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            breath_speed: DEFAULT_BREATH_SPEED,
            orb_size: DEFAULT_ORB_SIZE,
            intensity: DEFAULT_INTENSITY,
            sound_speed: DEFAULT_SOUND_SPEED,
        }
    }
}

/// Result of one frame tick. `None` fields did not change this frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameUpdate {
    pub timer_text: Option<String>,
    pub breath: Option<BreathFrame>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FullscreenChange {
    Entered,
    Exited,
}

impl FullscreenChange {
    /// The change a toggle asks for, given whether the page is fullscreen now.
    pub fn toggle_from(is_fullscreen: bool) -> Self {
        if is_fullscreen {
            FullscreenChange::Exited
        } else {
            FullscreenChange::Entered
        }
    }

    /// DOM method that performs the change; it returns a Promise.
    pub fn method_name(self) -> &'static str {
        match self {
            FullscreenChange::Entered => "requestFullscreen",
            FullscreenChange::Exited => "exitFullscreen",
        }
    }
}

/// Owns every piece of mutable app state; UI handlers and the frame loop
/// only go through its methods.
pub struct Controller<B: AudioBackend> {
    session: SessionState,
    sliders: Sliders,
    sound: SoundType,
    themes: ThemeRegistry,
    ambience: Ambience<B>,
    status: String,
    timer_text: String,
    breath_label: BreathLabel,
}

impl<B: AudioBackend> Controller<B> {
    pub fn new(backend: B, sliders: Sliders, sound: SoundType) -> Self {
        Self {
            session: SessionState::default(),
            sliders,
            sound,
            themes: ThemeRegistry::new(),
            ambience: Ambience::new(backend),
            status: STATUS_INITIAL.to_string(),
            timer_text: format_time(0.0),
            breath_label: BreathLabel::In,
        }
    }

    #[inline]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[inline]
    pub fn sliders(&self) -> &Sliders {
        &self.sliders
    }

    #[inline]
    pub fn sound(&self) -> SoundType {
        self.sound
    }

    #[inline]
    pub fn ambience(&self) -> &Ambience<B> {
        &self.ambience
    }

    #[inline]
    pub fn ambience_mut(&mut self) -> &mut Ambience<B> {
        &mut self.ambience
    }

    #[inline]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[inline]
    pub fn timer_text(&self) -> &str {
        &self.timer_text
    }

    #[inline]
    pub fn breath_label(&self) -> BreathLabel {
        self.breath_label
    }

    #[inline]
    pub fn current_theme(&self) -> &'static Theme {
        self.themes.current()
    }

    #[inline]
    pub fn is_current_theme(&self, id: &str) -> bool {
        self.themes.is_current(id)
    }

    pub fn start_glyph(&self) -> &'static str {
        if self.session.breathing() {
            GLYPH_PAUSE
        } else {
            GLYPH_PLAY
        }
    }

    pub fn mute_glyph(&self) -> &'static str {
        if self.session.muted {
            GLYPH_MUTED
        } else {
            GLYPH_UNMUTED
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    // ---------------- Breath / timer ----------------

    pub fn toggle_start(&mut self) {
        let s = &mut self.session;
        if !s.running {
            s.running = true;
            s.paused = false;
        } else {
            s.paused = !s.paused;
        }
        if s.paused {
            s.timer_active = false;
            self.status = STATUS_PAUSED.to_string();
        } else {
            s.timer_active = true;
            self.status = STATUS_RUNNING.to_string();
            self.ambience.resume();
        }
        log::info!("[session] mode={:?}", self.session.mode());
    }

    pub fn reset(&mut self) {
        let s = &mut self.session;
        s.elapsed = 0.0;
        s.phase = 0.0;
        s.paused = true;
        s.timer_active = false;
        self.timer_text = format_time(0.0);
        self.breath_label = BreathLabel::In;
        self.status = STATUS_RESET.to_string();
        log::info!("[session] reset");
    }

    /// Advance timer and breathing by `dt_sec` and push the new orb pose to
    /// `scene`.
    pub fn tick<S: SceneTarget + ?Sized>(&mut self, dt_sec: f64, scene: &mut S) -> FrameUpdate {
        let dt = dt_sec.max(0.0);
        let mut update = FrameUpdate::default();
        let s = &mut self.session;

        if s.timer_active && !s.paused {
            s.elapsed += dt;
            let text = format_time(s.elapsed);
            if text != self.timer_text {
                self.timer_text = text.clone();
                update.timer_text = Some(text);
            }
        }

        if s.breathing() {
            s.phase = advance_phase(s.phase, dt, self.sliders.breath_speed);
            s.spin = advance_spin(s.spin, dt);
            let frame = BreathFrame::new(s.phase, self.sliders.orb_size, s.spin);
            apply_breath(scene, &frame);
            self.breath_label = frame.label;
            update.breath = Some(frame);
        }

        update
    }

    // ---------------- Themes ----------------

    pub fn select_theme<S: SceneTarget + ?Sized>(&mut self, id: &str, scene: &mut S) -> &'static Theme {
        let theme = self.themes.select(id);
        apply_theme(scene, theme);
        self.status = format!("Theme: {}", theme.name);
        log::info!("[theme] selected {}", theme.id);
        theme
    }

    pub fn select_theme_index<S: SceneTarget + ?Sized>(
        &mut self,
        index: usize,
        scene: &mut S,
    ) -> Option<&'static Theme> {
        let id = self.themes.select_index(index)?.id;
        Some(self.select_theme(id, scene))
    }

    /// Re-apply the current theme, e.g. to a freshly created renderer.
    pub fn apply_current_theme<S: SceneTarget + ?Sized>(&self, scene: &mut S) {
        apply_theme(scene, self.themes.current());
    }

    // ---------------- Ambience ----------------

    fn ambience_params(&self) -> AmbienceParams {
        AmbienceParams {
            sound: self.sound,
            intensity: self.sliders.intensity,
            speed: self.sliders.sound_speed,
        }
    }

    fn restart_ambience(&mut self) -> bool {
        let params = self.ambience_params();
        match self.ambience.start(params, self.sliders.volume) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[audio] start failed: {}", e);
                false
            }
        }
    }

    /// Unmuting only sticks when a graph actually starts; otherwise the
    /// session stays muted and the status names the failure.
    pub fn toggle_mute(&mut self) {
        if self.session.muted {
            if self.restart_ambience() {
                self.session.muted = false;
                self.status = STATUS_AUDIO_PLAYING.to_string();
            } else {
                self.status = STATUS_AUDIO_UNAVAILABLE.to_string();
            }
        } else {
            self.session.muted = true;
            self.ambience.stop();
            self.status = STATUS_AUDIO_MUTED.to_string();
        }
    }

    pub fn set_sound(&mut self, sound: SoundType) {
        self.sound = sound;
        if !self.session.muted {
            self.restart_ambience();
        }
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.sliders.intensity = intensity;
        if !self.session.muted && self.ambience.is_playing() {
            self.restart_ambience();
        }
    }

    pub fn set_sound_speed(&mut self, speed: f32) {
        self.sliders.sound_speed = speed;
        if !self.session.muted && self.ambience.is_playing() {
            self.restart_ambience();
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.sliders.volume = volume.clamp(0.0, 1.0);
        self.ambience.set_volume(self.sliders.volume);
    }

    pub fn set_breath_speed(&mut self, speed: f32) {
        self.sliders.breath_speed = speed;
    }

    pub fn set_orb_size(&mut self, size: f32) {
        self.sliders.orb_size = size;
    }

    // ---------------- Misc surface ----------------

    pub fn fullscreen_result(&mut self, result: Result<FullscreenChange, ()>) {
        self.status = match result {
            Ok(FullscreenChange::Entered) => STATUS_FULLSCREEN_ON,
            Ok(FullscreenChange::Exited) => STATUS_FULLSCREEN_OFF,
            Err(()) => STATUS_FULLSCREEN_BLOCKED,
        }
        .to_string();
    }

    pub fn back(&mut self) {
        self.status = STATUS_BACK.to_string();
    }

    /// Page unload: stop any noise source and release the audio device.
    pub fn shutdown(&mut self) {
        self.ambience.shutdown();
        log::info!("[session] shutdown");
    }
}
