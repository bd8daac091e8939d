use crate::constants::*;
use crate::core::{FullscreenChange, SoundType, DEFAULT_BREATH_SPEED, DEFAULT_INTENSITY};
use crate::core::{DEFAULT_ORB_SIZE, DEFAULT_SOUND_SPEED, DEFAULT_VOLUME, HELP_TEXT};
use crate::dom;
use crate::frame::{SharedController, SharedStage};
use crate::ui;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Everything a DOM handler needs to reach the app.
#[derive(Clone)]
pub struct ControlWiring {
    pub document: web::Document,
    pub controller: SharedController,
    pub stage: SharedStage,
}

impl ControlWiring {
    /// Run `f` against the controller, then refresh the control texts.
    pub fn update(&self, f: impl FnOnce(&mut crate::frame::AppController)) {
        let mut c = self.controller.borrow_mut();
        f(&mut c);
        ui::render_controls(&self.document, &*c);
    }

    pub fn select_theme(&self, id: &str) {
        let theme = {
            let mut stage = self.stage.borrow_mut();
            let mut c = self.controller.borrow_mut();
            let theme = c.select_theme(id, &mut *stage);
            ui::render_controls(&self.document, &*c);
            theme
        };
        ui::mark_selected_theme(&self.document, theme.id);
    }

    pub fn select_theme_index(&self, index: usize) {
        if let Some(theme) = crate::core::list_themes().get(index) {
            self.select_theme(theme.id);
        }
    }

    /// The request runs inside the user gesture; the status is written only
    /// once the browser settles the returned Promise.
    pub fn toggle_fullscreen(&self) {
        let change = FullscreenChange::toggle_from(self.document.fullscreen_element().is_some());
        let promise = match request_fullscreen_change(&self.document, change) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("[ui] fullscreen request failed: {:?}", e);
                self.update(|c| c.fullscreen_result(Err(())));
                return;
            }
        };
        let w = self.clone();
        spawn_local(async move {
            let result = match JsFuture::from(promise).await {
                Ok(_) => Ok(change),
                Err(e) => {
                    log::warn!("[ui] fullscreen rejected: {:?}", e);
                    Err(())
                }
            };
            w.update(|c| c.fullscreen_result(result));
        });
    }

    pub fn show_help(&self) {
        if let Some(w) = web::window() {
            _ = w.alert_with_message(HELP_TEXT);
        }
    }

    pub fn nudge_volume(&self, delta: f32) {
        let v = {
            let mut c = self.controller.borrow_mut();
            let v = (c.sliders().volume + delta).clamp(0.0, 1.0);
            c.set_volume(v);
            v
        };
        dom::set_input_value(&self.document, ID_VOLUME, v);
    }
}

// web-sys drops the Promise these methods return, so call them through
// Reflect to keep it.
fn request_fullscreen_change(
    document: &web::Document,
    change: FullscreenChange,
) -> Result<js_sys::Promise, JsValue> {
    let target: JsValue = match change {
        FullscreenChange::Entered => document
            .get_element_by_id(ID_DEVICE)
            .ok_or_else(|| JsValue::from_str("missing #device"))?
            .into(),
        FullscreenChange::Exited => document.clone().into(),
    };
    let method: js_sys::Function =
        js_sys::Reflect::get(&target, &JsValue::from_str(change.method_name()))?.dyn_into()?;
    let ret = method.call0(&target)?;
    // older engines return undefined instead of a Promise
    Ok(ret
        .dyn_into::<js_sys::Promise>()
        .unwrap_or_else(|v| js_sys::Promise::resolve(&v)))
}

pub fn wire_controls(w: &ControlWiring) {
    wire_buttons(w);
    wire_sliders(w);
    wire_unload(w);
}

fn wire_buttons(w: &ControlWiring) {
    let doc = &w.document;

    let wc = w.clone();
    dom::add_click_listener(doc, ID_BTN_START, move || wc.update(|c| c.toggle_start()));

    let wc = w.clone();
    dom::add_click_listener(doc, ID_BTN_RESET, move || wc.update(|c| c.reset()));

    let wc = w.clone();
    dom::add_click_listener(doc, ID_BTN_MUTE, move || wc.update(|c| c.toggle_mute()));

    let wc = w.clone();
    dom::add_click_listener(doc, ID_BTN_FULLSCREEN, move || wc.toggle_fullscreen());

    let wc = w.clone();
    dom::add_click_listener(doc, ID_BTN_HELP, move || wc.show_help());

    let wc = w.clone();
    dom::add_click_listener(doc, ID_BTN_BACK, move || wc.update(|c| c.back()));
}

fn wire_sliders(w: &ControlWiring) {
    let doc = &w.document;

    let wc = w.clone();
    dom::add_listener(doc, ID_SOUND_TYPE, "change", move || {
        let sound = dom::element_value(&wc.document, ID_SOUND_TYPE)
            .map(|v| SoundType::from_value(&v))
            .unwrap_or_default();
        wc.update(|c| c.set_sound(sound));
    });

    let wc = w.clone();
    dom::add_listener(doc, ID_VOLUME, "input", move || {
        let v = dom::input_value(&wc.document, ID_VOLUME, DEFAULT_VOLUME);
        wc.controller.borrow_mut().set_volume(v);
    });

    let wc = w.clone();
    dom::add_listener(doc, ID_BREATH_SPEED, "input", move || {
        let v = dom::input_value(&wc.document, ID_BREATH_SPEED, DEFAULT_BREATH_SPEED);
        wc.controller.borrow_mut().set_breath_speed(v);
    });

    let wc = w.clone();
    dom::add_listener(doc, ID_ORB_SIZE, "input", move || {
        let v = dom::input_value(&wc.document, ID_ORB_SIZE, DEFAULT_ORB_SIZE);
        wc.controller.borrow_mut().set_orb_size(v);
    });

    let wc = w.clone();
    dom::add_listener(doc, ID_INTENSITY, "input", move || {
        let v = dom::input_value(&wc.document, ID_INTENSITY, DEFAULT_INTENSITY);
        wc.controller.borrow_mut().set_intensity(v);
    });

    let wc = w.clone();
    dom::add_listener(doc, ID_SOUND_SPEED, "input", move || {
        let v = dom::input_value(&wc.document, ID_SOUND_SPEED, DEFAULT_SOUND_SPEED);
        wc.controller.borrow_mut().set_sound_speed(v);
    });
}

// Page unload is the one mandatory cleanup: stop the noise and close the device.
fn wire_unload(w: &ControlWiring) {
    let Some(window) = web::window() else {
        return;
    };
    let controller = w.controller.clone();
    let closure = Closure::wrap(Box::new(move || {
        controller.borrow_mut().shutdown();
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref());
    closure.forget();
}
