use crate::audio::WebAudio;
use crate::constants::ID_BREATH;
use crate::constants::ID_TIMER;
use crate::core::{ColorSlot, Controller, NodeId, Scene, SceneTarget};
use crate::dom;
use crate::render;
use glam::Vec3;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type AppController = Controller<WebAudio>;
pub type SharedController = Rc<RefCell<AppController>>;
pub type SharedStage = Rc<RefCell<Stage>>;

/// Where scene updates go: the WebGPU renderer, or a headless scene when
/// WebGPU is unavailable so the timer and audio keep working.
pub enum Stage {
    Gpu(render::GpuState<'static>),
    Headless(Scene),
}

impl Stage {
    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        match self {
            Stage::Gpu(g) => g.resize_if_needed(width, height),
            Stage::Headless(s) => {
                s.camera.set_viewport(width, height);
            }
        }
    }

    fn target(&mut self) -> &mut dyn SceneTarget {
        match self {
            Stage::Gpu(g) => g,
            Stage::Headless(s) => s,
        }
    }
}

impl SceneTarget for Stage {
    fn set_color(&mut self, slot: ColorSlot, color: Vec3) {
        self.target().set_color(slot, color);
    }

    fn set_scale(&mut self, node: NodeId, scale: Vec3) {
        self.target().set_scale(node, scale);
    }

    fn set_rotation(&mut self, node: NodeId, rotation: Vec3) {
        self.target().set_rotation(node, rotation);
    }

    fn render(&mut self, dt_sec: f32) -> anyhow::Result<()> {
        self.target().render(dt_sec)
    }
}

pub struct FrameContext {
    pub controller: SharedController,
    pub stage: SharedStage,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f64();
        self.last_instant = now;

        let (width, height) = dom::sync_canvas_backing_size(&self.canvas);
        let mut stage = self.stage.borrow_mut();
        stage.resize_if_needed(width, height);

        let update = self.controller.borrow_mut().tick(dt_sec, &mut *stage);
        if let Some(text) = &update.timer_text {
            dom::set_text(&self.document, ID_TIMER, text);
        }
        if let Some(breath) = &update.breath {
            dom::set_text(&self.document, ID_BREATH, breath.label.as_str());
        }

        if let Err(e) = stage.render(dt_sec as f32) {
            log::error!("[frame] {:?}", e);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Stage {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, Scene::new()).await {
        Ok(g) => Stage::Gpu(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            Stage::Headless(Scene::new())
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
