//! The embedded street-view surface: an opaque viewport addressed by a
//! fully-resolved locator string. The front end only ever sets the locator
//! and listens for the "ready" (load) signal; it never parses the surface's
//! internals.

use std::cell::RefCell;
use std::rc::Rc;

use tour_core::{TourEngine, ViewerKind};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub struct StreetViewSurface {
    iframe: web::HtmlIFrameElement,
}

impl StreetViewSurface {
    pub fn attach(document: &web::Document) -> anyhow::Result<Self> {
        let iframe = document
            .get_element_by_id("street-view-frame")
            .ok_or_else(|| anyhow::anyhow!("missing #street-view-frame"))?
            .dyn_into::<web::HtmlIFrameElement>()
            .map_err(|e| anyhow::anyhow!("{e:?}"))?;
        Ok(Self { iframe })
    }

    /// Explicit initialization future: resolves when the surface first
    /// signals ready. Callers await this instead of registering a
    /// window-global callback and polling for it.
    pub fn ready(&self) -> JsFuture {
        let target: &web::EventTarget = self.iframe.as_ref();
        let mut executor = |resolve: js_sys::Function, _reject: js_sys::Function| {
            let once = Closure::once_into_js(move || {
                let _ = resolve.call0(&JsValue::NULL);
            });
            let _ = target.add_event_listener_with_callback("load", once.unchecked_ref());
        };
        JsFuture::from(js_sys::Promise::new(&mut executor))
    }
}

/// Point the surface at the current viewpoint's locator. Idempotent on the
/// locator so re-renders do not reload the embed; hidden entirely for sites
/// without street-view support.
pub fn sync(document: &web::Document, engine: &TourEngine) {
    let Some(el) = document.get_element_by_id("street-view-frame") else {
        return;
    };
    let Ok(iframe) = el.dyn_into::<web::HtmlIFrameElement>() else {
        return;
    };
    let supported = engine
        .current_site()
        .is_some_and(|s| s.supports(ViewerKind::StreetView));
    let locator = engine
        .current_viewpoint()
        .and_then(|vp| vp.street_view.clone());
    crate::overlay::set_visible(document, "street-view-pane", supported && locator.is_some());
    if !supported {
        return;
    }
    if let Some(locator) = locator {
        if iframe.get_attribute("src").as_deref() != Some(locator.as_str()) {
            iframe.set_src(&locator);
        }
    }
}

/// Every load of the surface clears the loading flag; the UI never hangs in
/// a loading state waiting for the embed.
pub fn wire_load_events(document: &web::Document, engine: Rc<RefCell<TourEngine>>) {
    let Some(el) = document.get_element_by_id("street-view-frame") else {
        return;
    };
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        engine.borrow_mut().media_loaded();
        crate::view::refresh(&doc, &engine);
    }) as Box<dyn FnMut()>);
    let _ = el.add_event_listener_with_callback("load", closure.as_ref().unchecked_ref());
    closure.forget();
}
