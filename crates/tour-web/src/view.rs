//! State-to-DOM applier. Reads the engine as a read-only snapshot and
//! rebuilds the dynamic pieces of the page; presentation failures are
//! isolated here and surfaced as a static fallback panel, never propagated
//! into the engine.
//!
//! Buttons built here carry `data-id` attributes and no listeners of their
//! own; `events::wire_delegated_click` handles their clicks at the
//! container level, so re-renders never accumulate closures.

use std::cell::RefCell;
use std::rc::Rc;

use tour_core::{format_time, HotspotContent, TourEngine, ViewerKind};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::{dom, overlay, panorama, street_view};

/// Render the current state. On failure the engine's state is untouched and
/// the user gets the fallback panel with its manual "go back" action.
pub fn refresh(document: &web::Document, engine: &Rc<RefCell<TourEngine>>) {
    let result = render(document, &engine.borrow());
    if let Err(e) = result {
        log::error!("[view] render failed: {e:?}");
        overlay::show(document, "render-fallback");
    }
}

fn render(document: &web::Document, eng: &TourEngine) -> Result<(), JsValue> {
    let on_site = eng.current_site().is_some();
    overlay::set_visible(document, "landing-page", !on_site);
    overlay::set_visible(document, "viewer-page", on_site);
    let Some(site) = eng.current_site() else {
        return Ok(());
    };

    dom::set_text(document, "site-name", &site.name);
    dom::set_text(
        document,
        "site-region",
        &format!("{}, {}", site.location.city, site.location.state),
    );
    overlay::set_visible(document, "loading-overlay", eng.state.loading);
    overlay::set_visible(document, "pano-viewport", site.supports(ViewerKind::Panorama));

    if let Some(vp) = eng.current_viewpoint() {
        dom::set_text(document, "viewpoint-name", &vp.name);
        dom::set_text(document, "viewpoint-description", &vp.description);
    }

    render_viewpoint_tabs(document, eng)?;
    render_connections(document, eng)?;
    render_hotspots(document, eng)?;
    render_hotspot_panel(document, eng)?;
    render_audio_player(document, eng);

    panorama::sync_background(document, eng);
    street_view::sync(document, eng);
    panorama::apply(document, eng);
    Ok(())
}

fn make_button(
    document: &web::Document,
    class: &str,
    data_id: &str,
) -> Result<web::Element, JsValue> {
    let button = document.create_element("button")?;
    button.set_attribute("type", "button")?;
    button.set_attribute("class", class)?;
    button.set_attribute("data-id", data_id)?;
    Ok(button)
}

/// Numbered tab per viewpoint, active state on the current one.
fn render_viewpoint_tabs(document: &web::Document, eng: &TourEngine) -> Result<(), JsValue> {
    let Some(container) = document.get_element_by_id("viewpoint-tabs") else {
        return Ok(());
    };
    dom::clear_children(&container);
    let Some(site) = eng.current_site() else {
        return Ok(());
    };
    for (i, vp) in site.viewpoints.iter().enumerate() {
        let button = make_button(document, "tab", &vp.id)?;
        dom::set_class(
            &button,
            "active",
            eng.state.viewpoint.as_deref() == Some(vp.id.as_str()),
        );
        button.set_text_content(Some(&format!("{}. {}", i + 1, vp.name)));
        button.set_attribute("title", &vp.description)?;
        container.append_child(&button)?;
    }
    Ok(())
}

/// Directed navigation arrows out of the current viewpoint.
fn render_connections(document: &web::Document, eng: &TourEngine) -> Result<(), JsValue> {
    let Some(container) = document.get_element_by_id("connection-layer") else {
        return Ok(());
    };
    dom::clear_children(&container);
    let Some(vp) = eng.current_viewpoint() else {
        return Ok(());
    };
    for conn in &vp.connections {
        let button = make_button(document, "connection", &conn.to)?;
        button.set_text_content(Some(&conn.label));
        button.set_attribute("data-angle", &format!("{}", conn.angle))?;
        container.append_child(&button)?;
    }
    Ok(())
}

/// Screen-anchored markers over the panorama plus the flat list used by the
/// street-view pane; both toggle the same selection.
fn render_hotspots(document: &web::Document, eng: &TourEngine) -> Result<(), JsValue> {
    let markers = document.get_element_by_id("hotspot-layer");
    let list = document.get_element_by_id("hotspot-list");
    if let Some(el) = &markers {
        dom::clear_children(el);
    }
    if let Some(el) = &list {
        dom::clear_children(el);
    }
    let Some(vp) = eng.current_viewpoint() else {
        return Ok(());
    };
    let selected = eng.state.selected_hotspot.as_deref();
    for hotspot in vp.hotspots.iter().filter(|h| h.visible) {
        if let (Some(layer), Some(screen)) = (&markers, hotspot.screen) {
            let button = make_button(document, "hotspot-marker", &hotspot.id)?;
            button.set_id(&format!("hotspot-{}", hotspot.id));
            dom::set_class(&button, "selected", selected == Some(hotspot.id.as_str()));
            button.set_attribute("title", &hotspot.title)?;
            if let Some(html) = button.dyn_ref::<web::HtmlElement>() {
                let _ = html.style().set_property("left", &format!("{}%", screen[0]));
                let _ = html.style().set_property("top", &format!("{}%", screen[1]));
            }
            layer.append_child(&button)?;
        }
        if let Some(list) = &list {
            let button = make_button(document, "hotspot-item", &hotspot.id)?;
            dom::set_class(&button, "selected", selected == Some(hotspot.id.as_str()));
            button.set_text_content(Some(&hotspot.title));
            list.append_child(&button)?;
        }
    }
    Ok(())
}

fn content_kind(content: &HotspotContent) -> &'static str {
    match content {
        HotspotContent::Text { .. } => "info",
        HotspotContent::Image { .. } => "image",
        HotspotContent::Audio { .. } => "audio",
    }
}

fn render_hotspot_panel(document: &web::Document, eng: &TourEngine) -> Result<(), JsValue> {
    let Some(hotspot) = eng.selected_hotspot() else {
        overlay::hide(document, "hotspot-panel");
        return Ok(());
    };
    overlay::show(document, "hotspot-panel");
    dom::set_text(document, "hotspot-title", &hotspot.title);
    dom::set_text(document, "hotspot-kind", content_kind(&hotspot.content));
    dom::set_text(document, "hotspot-body", hotspot.content.summary());
    if let Some(details) = document.get_element_by_id("hotspot-details") {
        dom::clear_children(&details);
        if let HotspotContent::Text { details: items, .. } = &hotspot.content {
            for item in items {
                let li = document.create_element("li")?;
                li.set_text_content(Some(item));
                details.append_child(&li)?;
            }
        }
    }
    // Image hotspots show their media inline in the panel.
    if let Some(el) = document.get_element_by_id("hotspot-media") {
        if let Ok(img) = el.dyn_into::<web::HtmlImageElement>() {
            match &hotspot.content {
                HotspotContent::Image { url, .. } => {
                    overlay::show(document, "hotspot-media");
                    if img.get_attribute("src").as_deref() != Some(url.as_str()) {
                        img.set_src(url);
                    }
                }
                _ => overlay::hide(document, "hotspot-media"),
            }
        }
    }
    Ok(())
}

fn render_audio_player(document: &web::Document, eng: &TourEngine) {
    let Some(tour) = eng.audio_tour() else {
        overlay::hide(document, "audio-player");
        return;
    };
    overlay::show(document, "audio-player");
    let count = tour.chapters.len();
    let index = eng.state.chapter.min(count.saturating_sub(1));
    let chapter = &tour.chapters[index];
    dom::set_text(document, "audio-title", &tour.title);
    dom::set_text(document, "narrator-name", &tour.narrator.name);
    dom::set_text(document, "chapter-title", &chapter.title);
    dom::set_text(
        document,
        "chapter-label",
        &format!("Chapter {} of {}", index + 1, count),
    );
    let elapsed = eng.sequencer().elapsed();
    dom::set_text(
        document,
        "chapter-time",
        &format!("{} / {}", format_time(elapsed), format_time(chapter.duration)),
    );
    let pct = (elapsed as f32 / chapter.duration as f32 * 100.0).min(100.0);
    dom::set_style_property(document, "chapter-progress", "width", &format!("{pct}%"));
    dom::set_text(document, "chapter-transcript", &chapter.transcript);
    dom::set_text(
        document,
        "audio-toggle",
        if eng.state.audio_playing { "Pause" } else { "Play" },
    );
    set_disabled(document, "chapter-prev", index == 0);
    set_disabled(document, "chapter-next", index + 1 >= count);
}

fn set_disabled(document: &web::Document, element_id: &str, disabled: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let _ = if disabled {
            el.set_attribute("disabled", "")
        } else {
            el.remove_attribute("disabled")
        };
    }
}
