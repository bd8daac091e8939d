use super::controls::ControlWiring;
use crate::core::VOLUME_STEP;
use crate::input::{action_for_key, KeyAction};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, w: &ControlWiring) {
    // focused widgets handle their own keys
    if let Some(target) = ev.target() {
        if let Some(el) = target.dyn_ref::<web::Element>() {
            let tag = el.tag_name().to_ascii_lowercase();
            if matches!(tag.as_str(), "input" | "select" | "button") {
                return;
            }
        }
    }
    let Some(action) = action_for_key(&ev.key()) else {
        return;
    };
    log::debug!("[keys] {:?}", action);
    match action {
        KeyAction::ToggleStart => w.update(|c| c.toggle_start()),
        KeyAction::Reset => w.update(|c| c.reset()),
        KeyAction::ToggleMute => w.update(|c| c.toggle_mute()),
        KeyAction::Fullscreen => w.toggle_fullscreen(),
        KeyAction::Help => w.show_help(),
        KeyAction::Theme(i) => w.select_theme_index(i),
        KeyAction::VolumeUp => w.nudge_volume(VOLUME_STEP),
        KeyAction::VolumeDown => w.nudge_volume(-VOLUME_STEP),
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(w: ControlWiring) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &w);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
