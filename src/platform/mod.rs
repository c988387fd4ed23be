//! Browser platform layer
//!
//! Handles:
//! - Timers and frame loops that stop when dropped (`timers`)
//! - Event listeners that unregister when dropped
//! - DOM lookups, viewport and device queries
//! - One view per embedded toy (`snake_view`, `shooter_view`, `hero_view`)

pub mod hero_view;
pub mod shooter_view;
pub mod snake_view;
pub mod timers;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlCanvasElement, Window};

use crate::consts::MOBILE_MAX_WIDTH;
use crate::error::{ArcadeError, Result};
use crate::input::visible_fraction;

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| ArcadeError::MissingElement("window".into()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| ArcadeError::MissingElement("document".into()))
}

pub fn element(id: &str) -> Result<Element> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| ArcadeError::MissingElement(id.into()))
}

pub fn canvas(id: &str) -> Result<HtmlCanvasElement> {
    element(id)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| ArcadeError::MissingElement(format!("{} (canvas)", id)))
}

/// Match the canvas backing store to its CSS size. Returns the CSS size.
pub fn fit_canvas(canvas: &HtmlCanvasElement) -> (f32, f32) {
    let w = canvas.client_width().max(1) as u32;
    let h = canvas.client_height().max(1) as u32;
    if canvas.width() != w || canvas.height() != h {
        canvas.set_width(w);
        canvas.set_height(h);
    }
    (w as f32, h as f32)
}

/// High-resolution timestamp in ms (same clock as frame callbacks)
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Seed for a new simulation
pub fn fresh_seed() -> u64 {
    (js_sys::Date::now() as u64) ^ ((js_sys::Math::random() * u32::MAX as f64) as u64) << 20
}

/// Touch-first device: no hover, or a narrow viewport
pub fn is_touch_device() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let no_hover = window
        .match_media("(hover: none)")
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false);
    let narrow = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .map(|w| w < MOBILE_MAX_WIDTH)
        .unwrap_or(false);
    no_hover || narrow
}

/// Visible fraction of the element with `id` in the current viewport
pub fn section_visibility(id: &str) -> f64 {
    let (Ok(window), Ok(el)) = (window(), element(id)) else {
        return 0.0;
    };
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    let rect = el.get_bounding_client_rect();
    visible_fraction(rect.top(), rect.bottom(), viewport)
}

/// Toggle a class on `<body>` (full-screen game mode)
pub fn set_body_class(class: &str, on: bool) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let list = body.class_list();
    let result = if on { list.add_1(class) } else { list.remove_1(class) };
    if let Err(e) = result {
        log::warn!("Body class {} toggle failed: {:?}", class, e);
    }
}

/// Show or hide an element by id via the `hidden` class
pub fn set_hidden(id: &str, hidden: bool) {
    if let Ok(el) = element(id) {
        let list = el.class_list();
        let _ = if hidden {
            list.add_1("hidden")
        } else {
            list.remove_1("hidden")
        };
    }
}

/// Set the text of an element by id (scoreboards)
pub fn set_text(id: &str, text: &str) {
    if let Ok(el) = element(id) {
        el.set_text_content(Some(text));
    }
}

/// An event listener that unregisters itself when dropped
pub struct EventListener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    /// Keep the listener for the life of the page
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}
