//! Panorama presentation: maps the drag model's rotation/zoom onto the
//! background element and hotspot markers, and degrades to a placeholder
//! when the background image fails to load.

use std::cell::RefCell;
use std::rc::Rc;

use tour_core::TourEngine;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;

/// Apply the current camera transform. Called on every pointer-move while
/// dragging, so it touches only style properties.
pub fn apply(document: &web::Document, engine: &TourEngine) {
    let offset = engine.camera.background_offset_px();
    let zoom = engine.camera.zoom;
    dom::set_transform(
        document,
        "pano-background",
        &format!("translateX({offset}px) scale({zoom})"),
    );
    let Some(vp) = engine.current_viewpoint() else {
        return;
    };
    let marker_offset = engine.camera.hotspot_offset_px();
    for hotspot in &vp.hotspots {
        dom::set_transform(
            document,
            &format!("hotspot-{}", hotspot.id),
            &format!("translateX({marker_offset}px) scale({zoom})"),
        );
    }
}

/// Point the background at the current viewpoint's image, or fall back to
/// the placeholder when the viewpoint has none. Idempotent: the src is only
/// rewritten when it changes, so re-renders do not restart the load.
pub fn sync_background(document: &web::Document, engine: &TourEngine) {
    let Some(el) = document.get_element_by_id("pano-background") else {
        return;
    };
    let Ok(img) = el.dyn_into::<web::HtmlImageElement>() else {
        return;
    };
    let image = engine.current_viewpoint().and_then(|vp| vp.image.clone());
    match image {
        Some(url) => {
            if img.get_attribute("src").as_deref() != Some(url.as_str()) {
                dom::set_class(img.as_ref(), "placeholder", false);
                img.set_src(&url);
            }
        }
        None => {
            let _ = img.remove_attribute("src");
            dom::set_class(img.as_ref(), "placeholder", true);
        }
    }
}

/// Wire load/error events on the background image. Failure clears the
/// loading flag and shows the placeholder instead of raising.
pub fn wire_media_events(document: &web::Document, engine: Rc<RefCell<TourEngine>>) {
    let Some(el) = document.get_element_by_id("pano-background") else {
        return;
    };
    {
        let engine = engine.clone();
        let doc = document.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            engine.borrow_mut().media_loaded();
            crate::view::refresh(&doc, &engine);
        }) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("load", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let doc = document.clone();
        let el2 = el.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            log::warn!("[pano] background image failed to load");
            engine.borrow_mut().media_load_failed();
            dom::set_class(&el2, "placeholder", true);
            crate::view::refresh(&doc, &engine);
        }) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
