use crate::constants::*;
use crate::core::{list_themes, thumb_css, AudioBackend, Controller};
use crate::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const CARD_CLASS: &str = "envCard";
const SELECTED_CLASS: &str = "selected";

/// Write every controller-owned text to the page.
pub fn render_controls<B: AudioBackend>(document: &web::Document, c: &Controller<B>) {
    dom::set_text(document, ID_STATUS, c.status());
    dom::set_text(document, ID_TIMER, c.timer_text());
    dom::set_text(document, ID_BREATH, c.breath_label().as_str());
    dom::set_text(document, ID_BTN_START, c.start_glyph());
    dom::set_text(document, ID_BTN_MUTE, c.mute_glyph());
}

/// Build one card per theme into the gallery row. `on_select` receives the
/// clicked theme id.
pub fn build_theme_gallery(
    document: &web::Document,
    current_id: &str,
    on_select: impl Fn(&'static str) + Clone + 'static,
) -> anyhow::Result<()> {
    let row = document
        .get_element_by_id(ID_ENV_ROW)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", ID_ENV_ROW))?;
    row.set_inner_html("");
    for t in list_themes() {
        let card = create_div(document, CARD_CLASS)?;
        _ = card.set_attribute("data-theme", t.id);
        if t.id == current_id {
            _ = card.class_list().add_1(SELECTED_CLASS);
        }

        let thumb = create_div(document, "envThumb")?;
        _ = thumb.set_attribute("style", &format!("background: {}", thumb_css(t)));

        let name = create_div(document, "envName")?;
        name.set_text_content(Some(t.name));

        append(&card, &thumb)?;
        append(&card, &name)?;

        let id = t.id;
        let select = on_select.clone();
        let closure = Closure::wrap(Box::new(move || select(id)) as Box<dyn FnMut()>);
        _ = card.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();

        append(&row, &card)?;
    }
    Ok(())
}

/// Move the `selected` mark to the card for `id`.
pub fn mark_selected_theme(document: &web::Document, id: &str) {
    let Some(row) = document.get_element_by_id(ID_ENV_ROW) else {
        return;
    };
    let cards = row.children();
    for i in 0..cards.length() {
        if let Some(card) = cards.item(i) {
            let is_selected = card.get_attribute("data-theme").as_deref() == Some(id);
            _ = card.class_list().toggle_with_force(SELECTED_CLASS, is_selected);
        }
    }
}

fn create_div(document: &web::Document, class: &str) -> anyhow::Result<web::Element> {
    let el = document
        .create_element("div")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    el.set_class_name(class);
    Ok(el)
}

fn append(parent: &web::Element, child: &web::Element) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}
