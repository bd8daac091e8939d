#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use crate::core::{SoundType, Sliders};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod render;
mod ui;

// Slider values as the page was served; anything unparsable falls back to
// the compiled defaults.
fn read_sliders(document: &web::Document) -> Sliders {
    let d = Sliders::default();
    Sliders {
        volume: dom::input_value(document, ID_VOLUME, d.volume).clamp(0.0, 1.0),
        breath_speed: dom::input_value(document, ID_BREATH_SPEED, d.breath_speed),
        orb_size: dom::input_value(document, ID_ORB_SIZE, d.orb_size),
        intensity: dom::input_value(document, ID_INTENSITY, d.intensity),
        sound_speed: dom::input_value(document, ID_SOUND_SPEED, d.sound_speed),
    }
}

fn read_sound(document: &web::Document) -> SoundType {
    dom::element_value(document, ID_SOUND_TYPE)
        .map(|v| SoundType::from_value(&v))
        .unwrap_or_default()
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("calm-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        log::warn!("init already ran; ignoring");
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(ID_CANVAS)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", ID_CANVAS))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Backing size must be right before the surface is configured
    dom::sync_canvas_backing_size(&canvas);

    // Audio output is created lazily on first unmute, inside a user gesture
    let controller = Rc::new(RefCell::new(frame::AppController::new(
        audio::WebAudio::default(),
        read_sliders(&document),
        read_sound(&document),
    )));

    let stage = Rc::new(RefCell::new(frame::init_gpu(&canvas).await));
    controller
        .borrow()
        .apply_current_theme(&mut *stage.borrow_mut());

    let wiring = events::ControlWiring {
        document: document.clone(),
        controller: controller.clone(),
        stage: stage.clone(),
    };

    let gallery_wiring = wiring.clone();
    let current_id = controller.borrow().current_theme().id;
    ui::build_theme_gallery(&document, current_id, move |id| {
        gallery_wiring.select_theme(id)
    })?;

    events::wire_controls(&wiring);
    events::wire_global_keydown(wiring.clone());
    ui::render_controls(&document, &*controller.borrow());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        controller,
        stage,
        canvas,
        document,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
