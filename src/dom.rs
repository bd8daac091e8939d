use crate::constants::MAX_PIXEL_RATIO;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn add_listener(
    document: &web::Document,
    element_id: &str,
    event: &str,
    mut handler: impl FnMut() + 'static,
) {
    match document.get_element_by_id(element_id) {
        Some(el) => {
            let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
            _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
        None => log::warn!("[dom] missing #{}", element_id),
    }
}

#[inline]
pub fn add_click_listener(document: &web::Document, element_id: &str, handler: impl FnMut() + 'static) {
    add_listener(document, element_id, "click", handler);
}

pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        if el.text_content().as_deref() != Some(text) {
            el.set_text_content(Some(text));
        }
    }
}

/// Raw `value` of an `<input>` or `<select>`.
pub fn element_value(document: &web::Document, element_id: &str) -> Option<String> {
    let el = document.get_element_by_id(element_id)?;
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        return Some(input.value());
    }
    el.dyn_ref::<web::HtmlSelectElement>().map(|s| s.value())
}

/// Numeric slider value, or `default` when missing or unparsable.
pub fn input_value(document: &web::Document, element_id: &str, default: f32) -> f32 {
    element_value(document, element_id)
        .and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

pub fn set_input_value(document: &web::Document, element_id: &str, value: f32) {
    if let Some(el) = document.get_element_by_id(element_id) {
        if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
            input.set_value(&format!("{}", value));
        }
    }
}

/// Match the canvas backing store to its CSS box. Only touches the canvas
/// when the size changed; returns the current pixel size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(MAX_PIXEL_RATIO);
        let rect = canvas.get_bounding_client_rect();
        let w_px = ((rect.width() * dpr) as u32).max(1);
        let h_px = ((rect.height() * dpr) as u32).max(1);
        if canvas.width() != w_px {
            canvas.set_width(w_px);
        }
        if canvas.height() != h_px {
            canvas.set_height(h_px);
        }
    }
    (canvas.width().max(1), canvas.height().max(1))
}
