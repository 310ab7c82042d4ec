use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[inline]
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

#[inline]
pub fn set_style_property(document: &web::Document, element_id: &str, prop: &str, value: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        if let Ok(html) = el.dyn_into::<web::HtmlElement>() {
            let _ = html.style().set_property(prop, value);
        }
    }
}

#[inline]
pub fn set_transform(document: &web::Document, element_id: &str, transform: &str) {
    set_style_property(document, element_id, "transform", transform);
}

pub fn clear_children(el: &web::Element) {
    while let Some(child) = el.first_child() {
        let _ = el.remove_child(&child);
    }
}

/// Flip a class on or off, used for active/selected button states.
pub fn set_class(el: &web::Element, class: &str, on: bool) {
    let list = el.class_list();
    let _ = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
}
