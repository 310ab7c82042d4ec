#![cfg(target_arch = "wasm32")]
//! Browser front end for the heritage tour viewers.
//!
//! All state mutation funnels through one `Rc<RefCell<TourEngine>>` on the
//! UI event loop; transitions run to completion between events, so no
//! locking is needed. Resources tied to an open viewer (audio tick, body
//! scroll lock) are RAII guards released on every exit path.

use std::cell::RefCell;
use std::rc::Rc;

use tour_core::{Catalog, TourEngine, ZOOM_STEP};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod overlay;
mod panorama;
mod street_view;
mod ticker;
mod view;

/// Everything acquired when a viewer opens and released when it closes.
struct ViewerGuards {
    _ticker: Option<ticker::IntervalGuard>,
    _scroll: Option<ticker::ScrollLock>,
}

impl ViewerGuards {
    fn acquire(document: &web::Document, engine: Rc<RefCell<TourEngine>>) -> Self {
        Self {
            _ticker: ticker::start_audio_ticker(document, engine),
            _scroll: ticker::ScrollLock::acquire(document),
        }
    }
}

type SharedGuards = Rc<RefCell<Option<ViewerGuards>>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tour-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {e:?}");
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let catalog = Catalog::builtin().map_err(|e| anyhow::anyhow!("catalog: {e}"))?;
    let engine = Rc::new(RefCell::new(TourEngine::new(catalog)));
    let guards: SharedGuards = Rc::new(RefCell::new(None));

    wire_landing(&document, &engine, &guards);
    wire_viewer_controls(&document, &engine, &guards);
    wire_navigation(&document, &engine);
    events::wire_pointer_handlers(&events::InputWiring {
        document: document.clone(),
        engine: engine.clone(),
    });
    events::wire_global_keydown(&document, engine.clone());
    panorama::wire_media_events(&document, engine.clone());
    street_view::wire_load_events(&document, engine.clone());

    // Explicit bootstrap future for the embedded surface; replaces
    // window-global callback registration and polling.
    match street_view::StreetViewSurface::attach(&document) {
        Ok(surface) => {
            let ready = surface.ready();
            let engine = engine.clone();
            let doc = document.clone();
            spawn_local(async move {
                let _ = ready.await;
                log::info!("[street-view] surface ready");
                engine.borrow_mut().media_loaded();
                view::refresh(&doc, &engine);
            });
        }
        Err(e) => log::warn!("[street-view] {e}"),
    }

    view::refresh(&document, &engine);
    Ok(())
}

fn open_site(
    document: &web::Document,
    engine: &Rc<RefCell<TourEngine>>,
    guards: &SharedGuards,
    id: &str,
) {
    if !engine.borrow_mut().select_site(id) {
        return;
    }
    *guards.borrow_mut() = Some(ViewerGuards::acquire(document, engine.clone()));
    view::refresh(document, engine);
}

fn close_viewer(document: &web::Document, engine: &Rc<RefCell<TourEngine>>, guards: &SharedGuards) {
    engine.borrow_mut().close_site();
    guards.borrow_mut().take();
    overlay::hide(document, "render-fallback");
    view::refresh(document, engine);
}

/// Landing page: one card per catalog site plus the mini-map markers. The
/// catalog is immutable, so these are built once at startup.
fn wire_landing(document: &web::Document, engine: &Rc<RefCell<TourEngine>>, guards: &SharedGuards) {
    struct CardData {
        id: String,
        name: String,
        period: String,
        region: String,
        marker: Option<tour_core::MapMarker>,
    }
    let cards: Vec<CardData> = engine
        .borrow()
        .catalog()
        .sites()
        .iter()
        .map(|s| CardData {
            id: s.id.clone(),
            name: s.name.clone(),
            period: s.historical_period.clone(),
            region: format!("{}, {}", s.location.city, s.location.state),
            marker: s.map_marker,
        })
        .collect();

    if let Some(list) = document.get_element_by_id("site-list") {
        for card in &cards {
            let Ok(button) = document.create_element("button") else {
                continue;
            };
            let _ = button.set_attribute("type", "button");
            let _ = button.set_attribute("class", "site-card");
            let _ = button.set_attribute("data-id", &card.id);
            button.set_text_content(Some(&format!(
                "{}, {} ({})",
                card.name, card.region, card.period
            )));
            let _ = list.append_child(&button);
        }
    }

    if let Some(map) = document.get_element_by_id("mini-map-markers") {
        for (card, marker) in cards.iter().filter_map(|c| c.marker.map(|m| (c, m))) {
            let Ok(button) = document.create_element("button") else {
                continue;
            };
            let _ = button.set_attribute("type", "button");
            let _ = button.set_attribute("class", "map-marker");
            let _ = button.set_attribute("data-id", &card.id);
            let _ = button.set_attribute("title", &card.name);
            if let Some(html) = button.dyn_ref::<web::HtmlElement>() {
                let _ = html.style().set_property("left", &format!("{}%", marker.x_pct));
                let _ = html.style().set_property("top", &format!("{}%", marker.y_pct));
            }
            let _ = map.append_child(&button);
        }
    }

    for container in ["site-list", "mini-map-markers"] {
        let doc = document.clone();
        let engine = engine.clone();
        let guards = guards.clone();
        events::wire_delegated_click(document, container, move |id| {
            open_site(&doc, &engine, &guards, &id);
        });
    }
}

/// Delegated navigation handlers for the lists `view` rebuilds on every
/// render: viewpoint tabs, connection arrows and both hotspot surfaces.
fn wire_navigation(document: &web::Document, engine: &Rc<RefCell<TourEngine>>) {
    {
        let doc = document.clone();
        let engine = engine.clone();
        events::wire_delegated_click(document, "viewpoint-tabs", move |id| {
            engine.borrow_mut().select_viewpoint(&id);
            view::refresh(&doc, &engine);
        });
    }
    {
        let doc = document.clone();
        let engine = engine.clone();
        events::wire_delegated_click(document, "connection-layer", move |id| {
            engine.borrow_mut().follow_connection(&id);
            view::refresh(&doc, &engine);
        });
    }
    for container in ["hotspot-layer", "hotspot-list"] {
        let doc = document.clone();
        let engine = engine.clone();
        events::wire_delegated_click(document, container, move |id| {
            engine.borrow_mut().toggle_hotspot(&id);
            view::refresh(&doc, &engine);
        });
    }
}

/// Static controls present in the page shell: back, zoom, compass reset and
/// the audio player transport.
fn wire_viewer_controls(
    document: &web::Document,
    engine: &Rc<RefCell<TourEngine>>,
    guards: &SharedGuards,
) {
    {
        let doc = document.clone();
        let engine = engine.clone();
        let guards = guards.clone();
        dom::add_click_listener(document, "back-button", move || {
            close_viewer(&doc, &engine, &guards);
        });
    }
    {
        // The fallback panel's manual escape hatch.
        let doc = document.clone();
        let engine = engine.clone();
        let guards = guards.clone();
        dom::add_click_listener(document, "fallback-back", move || {
            close_viewer(&doc, &engine, &guards);
        });
    }
    {
        let doc = document.clone();
        let engine = engine.clone();
        dom::add_click_listener(document, "zoom-in", move || {
            engine.borrow_mut().adjust_zoom(ZOOM_STEP);
            panorama::apply(&doc, &engine.borrow());
        });
    }
    {
        let doc = document.clone();
        let engine = engine.clone();
        dom::add_click_listener(document, "zoom-out", move || {
            engine.borrow_mut().adjust_zoom(-ZOOM_STEP);
            panorama::apply(&doc, &engine.borrow());
        });
    }
    {
        let doc = document.clone();
        let engine = engine.clone();
        dom::add_click_listener(document, "reset-view", move || {
            engine.borrow_mut().reset_camera();
            panorama::apply(&doc, &engine.borrow());
        });
    }
    {
        let doc = document.clone();
        let engine = engine.clone();
        dom::add_click_listener(document, "hotspot-close", move || {
            let selected = engine.borrow().state.selected_hotspot.clone();
            if let Some(id) = selected {
                engine.borrow_mut().toggle_hotspot(&id);
                view::refresh(&doc, &engine);
            }
        });
    }
    {
        let doc = document.clone();
        let engine = engine.clone();
        dom::add_click_listener(document, "audio-toggle", move || {
            let playing = engine.borrow().state.audio_playing;
            if playing {
                engine.borrow_mut().pause_audio_tour();
            } else {
                engine.borrow_mut().start_audio_tour();
            }
            view::refresh(&doc, &engine);
        });
    }
    {
        let doc = document.clone();
        let engine = engine.clone();
        dom::add_click_listener(document, "audio-stop", move || {
            engine.borrow_mut().stop_audio_tour();
            view::refresh(&doc, &engine);
        });
    }
    {
        let doc = document.clone();
        let engine = engine.clone();
        dom::add_click_listener(document, "chapter-prev", move || {
            engine.borrow_mut().previous_chapter();
            view::refresh(&doc, &engine);
        });
    }
    {
        let doc = document.clone();
        let engine = engine.clone();
        dom::add_click_listener(document, "chapter-next", move || {
            engine.borrow_mut().next_chapter();
            view::refresh(&doc, &engine);
        });
    }
}
