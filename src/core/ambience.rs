use super::constants::*;
use rand::Rng;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SoundType {
    #[default]
    Rain,
    Forest,
    Ocean,
}

impl SoundType {
    pub const ALL: [SoundType; 3] = [SoundType::Rain, SoundType::Forest, SoundType::Ocean];

    pub fn as_str(self) -> &'static str {
        match self {
            SoundType::Rain => "rain",
            SoundType::Forest => "forest",
            SoundType::Ocean => "ocean",
        }
    }

    /// Parse a selector value. Anything unrecognised sounds like the ocean,
    /// matching the catch-all branch of the filter table.
    pub fn from_value(value: &str) -> Self {
        match value {
            "rain" => SoundType::Rain,
            "forest" => SoundType::Forest,
            _ => SoundType::Ocean,
        }
    }
}

impl fmt::Display for SoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slider-derived inputs that fully determine an ambience graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbienceParams {
    pub sound: SoundType,
    pub intensity: f32,
    pub speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    HighPass,
    LowPass,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LfoSpec {
    pub rate_hz: f32,
    pub depth_hz: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterSpec {
    pub kind: FilterKind,
    pub cutoff_hz: f32,
    pub q: f32,
    pub lfo: Option<LfoSpec>,
}

impl FilterSpec {
    pub fn for_params(p: &AmbienceParams) -> Self {
        match p.sound {
            SoundType::Rain => FilterSpec {
                kind: FilterKind::HighPass,
                cutoff_hz: RAIN_CUTOFF_HZ * p.intensity,
                q: RAIN_Q,
                lfo: None,
            },
            SoundType::Forest => FilterSpec {
                kind: FilterKind::LowPass,
                cutoff_hz: FOREST_CUTOFF_HZ * p.intensity,
                q: FOREST_Q,
                lfo: None,
            },
            SoundType::Ocean => FilterSpec {
                kind: FilterKind::LowPass,
                cutoff_hz: OCEAN_CUTOFF_HZ * p.intensity,
                q: OCEAN_Q,
                lfo: Some(LfoSpec {
                    rate_hz: OCEAN_LFO_RATE_HZ * p.speed,
                    depth_hz: OCEAN_LFO_DEPTH_HZ * p.intensity,
                }),
            },
        }
    }
}

/// Complete description of the graph a backend must build.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphSpec {
    pub noise_seconds: f32,
    pub playback_rate: f32,
    pub filter: FilterSpec,
}

impl GraphSpec {
    pub fn for_params(p: &AmbienceParams) -> Self {
        Self {
            noise_seconds: NOISE_SECONDS,
            playback_rate: p.speed,
            filter: FilterSpec::for_params(p),
        }
    }

    /// Buffer length in frames at `sample_rate`.
    #[inline]
    pub fn noise_frames(&self, sample_rate: f32) -> u32 {
        (sample_rate * self.noise_seconds).max(1.0) as u32
    }
}

/// Fill `buf` with uniform noise in `[-0.9, 0.9]`.
pub fn fill_noise<R: Rng + ?Sized>(rng: &mut R, buf: &mut [f32]) {
    for s in buf.iter_mut() {
        *s = (rng.gen::<f32>() * 2.0 - 1.0) * NOISE_AMPLITUDE;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),
    #[error("failed to create {node}: {reason}")]
    NodeCreation { node: &'static str, reason: String },
    #[error("failed to connect {0}")]
    Connect(&'static str),
}

/// Platform audio operations the synthesizer needs.
///
/// `teardown` must tolerate graphs whose nodes already stopped.
pub trait AudioBackend {
    type Graph;

    /// Create the output device and master gain if they do not exist yet.
    fn ensure_output(&mut self, volume: f32) -> Result<(), AudioError>;
    /// Best-effort resume of a suspended output; errors are swallowed.
    fn resume(&mut self);
    fn build(&mut self, spec: &GraphSpec) -> Result<Self::Graph, AudioError>;
    fn teardown(&mut self, graph: Self::Graph);
    fn set_volume(&mut self, volume: f32);
    /// Release the output device.
    fn close(&mut self);
}

pub enum Playback<G> {
    Stopped,
    Playing { params: AmbienceParams, graph: G },
}

impl<G> Playback<G> {
    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Playback::Playing { .. })
    }
}

/// Noise ambience with at most one live graph.
pub struct Ambience<B: AudioBackend> {
    backend: B,
    playback: Playback<B::Graph>,
}

impl<B: AudioBackend> Ambience<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            playback: Playback::Stopped,
        }
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn params(&self) -> Option<AmbienceParams> {
        match &self.playback {
            Playback::Playing { params, .. } => Some(*params),
            Playback::Stopped => None,
        }
    }

    /// The single transition: whatever was playing is torn down before the
    /// next graph (if any) is built.
    fn transition(&mut self, next: Option<(AmbienceParams, f32)>) -> Result<(), AudioError> {
        if let Playback::Playing { graph, params } =
            std::mem::replace(&mut self.playback, Playback::Stopped)
        {
            log::debug!("[audio] tearing down {} graph", params.sound);
            self.backend.teardown(graph);
        }
        let Some((params, volume)) = next else {
            return Ok(());
        };
        self.backend.ensure_output(volume)?;
        self.backend.resume();
        let graph = self.backend.build(&GraphSpec::for_params(&params))?;
        log::info!(
            "[audio] playing {} intensity={:.2} speed={:.2}",
            params.sound,
            params.intensity,
            params.speed
        );
        self.playback = Playback::Playing { params, graph };
        Ok(())
    }

    pub fn start(&mut self, params: AmbienceParams, volume: f32) -> Result<(), AudioError> {
        self.transition(Some((params, volume)))
    }

    pub fn stop(&mut self) {
        // tearing down never fails
        let _ = self.transition(None);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.backend.set_volume(volume);
    }

    pub fn resume(&mut self) {
        self.backend.resume();
    }

    /// Stop playback and release the output device.
    pub fn shutdown(&mut self) {
        self.stop();
        self.backend.close();
    }
}
