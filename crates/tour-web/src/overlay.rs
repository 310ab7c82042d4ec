use web_sys as web;

#[inline]
pub fn show(document: &web::Document, element_id: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document, element_id: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn set_visible(document: &web::Document, element_id: &str, visible: bool) {
    if visible {
        show(document, element_id);
    } else {
        hide(document, element_id);
    }
}

#[inline]
pub fn is_hidden(document: &web::Document, element_id: &str) -> bool {
    document
        .get_element_by_id(element_id)
        .and_then(|el| el.get_attribute("style"))
        .map(|s| s.contains("display:none"))
        .unwrap_or(false)
}

#[inline]
pub fn toggle(document: &web::Document, element_id: &str) {
    if is_hidden(document, element_id) {
        show(document, element_id);
    } else {
        hide(document, element_id);
    }
}
