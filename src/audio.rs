use crate::core::{fill_noise, AudioBackend, AudioError, FilterKind, GraphSpec};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Nodes of one ambience graph: noise source -> filter (<- LFO) -> master.
pub struct WebGraph {
    source: web::AudioBufferSourceNode,
    filter: web::BiquadFilterNode,
    lfo: Option<(web::OscillatorNode, web::GainNode)>,
}

impl WebGraph {
    fn connect_and_start(&self, master: &web::GainNode) -> Result<(), AudioError> {
        if let Some((osc, depth)) = &self.lfo {
            osc.connect_with_audio_node(depth)
                .map_err(|_| AudioError::Connect("lfo -> depth"))?;
            depth
                .connect_with_audio_param(&self.filter.frequency())
                .map_err(|_| AudioError::Connect("depth -> cutoff"))?;
            osc.start().map_err(node_err("lfo start"))?;
        }
        self.source
            .connect_with_audio_node(&self.filter)
            .map_err(|_| AudioError::Connect("noise -> filter"))?;
        self.filter
            .connect_with_audio_node(master)
            .map_err(|_| AudioError::Connect("filter -> master"))?;
        self.source.start().map_err(node_err("noise start"))?;
        Ok(())
    }
}

/// WebAudio output: a lazily created context with one master gain.
#[derive(Default)]
pub struct WebAudio {
    ctx: Option<web::AudioContext>,
    master: Option<web::GainNode>,
}

fn node_err(node: &'static str) -> impl Fn(JsValue) -> AudioError {
    move |e| AudioError::NodeCreation {
        node,
        reason: format!("{:?}", e),
    }
}

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &'static str,
) -> Result<web::GainNode, AudioError> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(node_err(label)(e))
        }
    }
}

// Await a promise only to log its rejection.
fn swallow(promise: js_sys::Promise, what: &'static str) {
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            log::debug!("[audio] {} rejected: {:?}", what, e);
        }
    });
}

impl AudioBackend for WebAudio {
    type Graph = WebGraph;

    fn ensure_output(&mut self, volume: f32) -> Result<(), AudioError> {
        if self.ctx.is_some() {
            return Ok(());
        }
        let ctx = web::AudioContext::new().map_err(|e| AudioError::Unavailable(format!("{:?}", e)))?;
        let master = create_gain(&ctx, volume, "Master")?;
        master
            .connect_with_audio_node(&ctx.destination())
            .map_err(|_| AudioError::Connect("master -> destination"))?;
        log::info!("[audio] context created at {} Hz", ctx.sample_rate());
        self.ctx = Some(ctx);
        self.master = Some(master);
        Ok(())
    }

    fn resume(&mut self) {
        let Some(ctx) = &self.ctx else {
            return;
        };
        if ctx.state() != web::AudioContextState::Suspended {
            return;
        }
        match ctx.resume() {
            Ok(p) => swallow(p, "resume"),
            Err(e) => log::debug!("[audio] resume error: {:?}", e),
        }
    }

    fn build(&mut self, spec: &GraphSpec) -> Result<WebGraph, AudioError> {
        let (Some(ctx), Some(master)) = (&self.ctx, &self.master) else {
            return Err(AudioError::Unavailable("no audio context".into()));
        };

        let sr = ctx.sample_rate();
        let frames = spec.noise_frames(sr);
        let buffer = ctx.create_buffer(1, frames, sr).map_err(node_err("AudioBuffer"))?;
        let mut data = vec![0.0_f32; frames as usize];
        fill_noise(&mut rand::thread_rng(), &mut data);
        buffer
            .copy_to_channel(&mut data, 0)
            .map_err(node_err("AudioBuffer"))?;

        let source = web::AudioBufferSourceNode::new(ctx).map_err(node_err("AudioBufferSourceNode"))?;
        source.set_buffer(Some(&buffer));
        source.set_loop(true);
        source.playback_rate().set_value(spec.playback_rate);

        let filter = web::BiquadFilterNode::new(ctx).map_err(node_err("BiquadFilterNode"))?;
        filter.set_type(match spec.filter.kind {
            FilterKind::HighPass => web::BiquadFilterType::Highpass,
            FilterKind::LowPass => web::BiquadFilterType::Lowpass,
        });
        filter.frequency().set_value(spec.filter.cutoff_hz);
        filter.q().set_value(spec.filter.q);

        let lfo = match spec.filter.lfo {
            Some(l) => {
                let osc = web::OscillatorNode::new(ctx).map_err(node_err("OscillatorNode"))?;
                osc.set_type(web::OscillatorType::Sine);
                osc.frequency().set_value(l.rate_hz);
                let depth = create_gain(ctx, l.depth_hz, "LFO depth")?;
                Some((osc, depth))
            }
            None => None,
        };

        let graph = WebGraph {
            source,
            filter,
            lfo,
        };
        let master = master.clone();
        if let Err(e) = graph.connect_and_start(&master) {
            self.teardown(graph);
            return Err(e);
        }
        Ok(graph)
    }

    fn teardown(&mut self, graph: WebGraph) {
        // Stopping a source that never started or already ended throws; ignore.
        _ = graph.source.stop();
        _ = graph.source.disconnect();
        _ = graph.filter.disconnect();
        if let Some((osc, depth)) = graph.lfo {
            _ = osc.stop();
            _ = osc.disconnect();
            _ = depth.disconnect();
        }
    }

    fn set_volume(&mut self, volume: f32) {
        if let Some(m) = &self.master {
            m.gain().set_value(volume);
        }
    }

    fn close(&mut self) {
        if let Some(m) = self.master.take() {
            _ = m.disconnect();
        }
        if let Some(ctx) = self.ctx.take() {
            match ctx.close() {
                Ok(p) => swallow(p, "close"),
                Err(e) => log::debug!("[audio] close error: {:?}", e),
            }
        }
    }
}
