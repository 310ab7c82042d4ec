//! Scoped resources tied to an open viewer: the one-second audio tick and
//! the body scroll lock. Both release in `Drop`, so every exit path
//! (including error paths) stops the timer and restores scrolling.

use std::cell::RefCell;
use std::rc::Rc;

use tour_core::TourEngine;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Owned `setInterval` registration; dropping the guard clears the timer.
pub struct IntervalGuard {
    window: web::Window,
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl IntervalGuard {
    pub fn new(window: &web::Window, closure: Closure<dyn FnMut()>, period_ms: i32) -> Option<Self> {
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            )
            .ok()?;
        Some(Self {
            window: window.clone(),
            handle,
            _closure: closure,
        })
    }
}

impl Drop for IntervalGuard {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.handle);
    }
}

/// Start the one-second simulated-playback tick. The engine ignores ticks
/// while the tour is not playing, so the interval simply runs for the
/// viewer's lifetime.
pub fn start_audio_ticker(
    document: &web::Document,
    engine: Rc<RefCell<TourEngine>>,
) -> Option<IntervalGuard> {
    let window = web::window()?;
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        let event = engine.borrow_mut().tick_audio();
        if let Some(event) = event {
            log::info!("[audio] {event:?}");
        }
        crate::view::refresh(&doc, &engine);
    }) as Box<dyn FnMut()>);
    IntervalGuard::new(&window, closure, 1_000)
}

/// Body scroll lock held while the modal viewer is open.
pub struct ScrollLock {
    body: web::HtmlElement,
}

impl ScrollLock {
    pub fn acquire(document: &web::Document) -> Option<Self> {
        let body = document.body()?;
        let _ = body.style().set_property("overflow", "hidden");
        Some(Self { body })
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        let _ = self.body.style().remove_property("overflow");
    }
}
