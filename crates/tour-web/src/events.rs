//! Pointer and keyboard wiring. Every closure clones the shared engine
//! handle; gestures mutate the engine and then push the cheap transform (or
//! a full refresh) back to the DOM.

use std::cell::RefCell;
use std::rc::Rc;

use tour_core::{TourEngine, ZOOM_STEP};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct InputWiring {
    pub document: web::Document,
    pub engine: Rc<RefCell<TourEngine>>,
}

/// One delegated click listener per container: buttons rebuilt on every
/// render carry `data-id` attributes instead of their own closures, so
/// re-renders never accumulate listeners.
pub fn wire_delegated_click(
    document: &web::Document,
    container_id: &str,
    mut handler: impl FnMut(String) + 'static,
) {
    let Some(container) = document.get_element_by_id(container_id) else {
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let Some(target) = ev.target() else {
            return;
        };
        let Ok(el) = target.dyn_into::<web::Element>() else {
            return;
        };
        let Ok(Some(button)) = el.closest("[data-id]") else {
            return;
        };
        let Some(id) = button.get_attribute("data-id") else {
            return;
        };
        handler(id);
    }) as Box<dyn FnMut(_)>);
    let _ = container.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Drag gesture over the panorama viewport: pointer-down anchors,
/// pointer-move pans, pointer-up and pointer-leave end the drag identically.
pub fn wire_pointer_handlers(w: &InputWiring) {
    let Some(viewport) = w.document.get_element_by_id("pano-viewport") else {
        log::warn!("[input] missing #pano-viewport, drag disabled");
        return;
    };

    // pointerdown
    {
        let engine = w.engine.clone();
        let target = viewport.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            engine.borrow_mut().begin_drag(ev.client_x() as f32);
            let _ = target.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = viewport
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointermove applies only the transform, not a full re-render
    {
        let engine = w.engine.clone();
        let doc = w.document.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            {
                let mut eng = engine.borrow_mut();
                if !eng.camera.is_dragging() {
                    return;
                }
                eng.drag_to(ev.client_x() as f32);
            }
            crate::panorama::apply(&doc, &engine.borrow());
        }) as Box<dyn FnMut(_)>);
        let _ = viewport
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerup / pointerleave: drag ends, no snap-back
    for event in ["pointerup", "pointerleave"] {
        let engine = w.engine.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            engine.borrow_mut().end_drag();
        }) as Box<dyn FnMut(_)>);
        let _ = viewport.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn wire_global_keydown(document: &web::Document, engine: Rc<RefCell<TourEngine>>) {
    let Some(window) = web::window() else {
        return;
    };
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        let key = ev.key();
        match key.as_str() {
            "ArrowRight" => {
                engine.borrow_mut().next_chapter();
            }
            "ArrowLeft" => {
                engine.borrow_mut().previous_chapter();
            }
            "+" | "=" => {
                engine.borrow_mut().adjust_zoom(ZOOM_STEP);
            }
            "-" | "_" => {
                engine.borrow_mut().adjust_zoom(-ZOOM_STEP);
            }
            "0" => {
                engine.borrow_mut().reset_camera();
            }
            "Escape" => {
                // Close the open hotspot panel, if any.
                let selected = engine.borrow().state.selected_hotspot.clone();
                match selected {
                    Some(id) => engine.borrow_mut().toggle_hotspot(&id),
                    None => return,
                }
            }
            "m" | "M" => {
                crate::overlay::toggle(&doc, "mini-map");
                ev.prevent_default();
                return;
            }
            _ => return,
        }
        ev.prevent_default();
        crate::view::refresh(&doc, &engine);
    }) as Box<dyn FnMut(_)>);
    let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}
