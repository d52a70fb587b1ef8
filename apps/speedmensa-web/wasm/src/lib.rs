//! Speed Mensa page layer
//!
//! Browser bindings for the storefront's pages. All decisions live in
//! `speedmensa-core`; this crate applies them to the live document.
//!
//! ## Architecture
//!
//! - Form guard: password confirmation and `data-confirm` prompts
//! - Interactions: dark mode, `data-confirm-click`, flash expiry
//! - Notifications and the loading overlay
//! - Payment redirect through a single `PageController` per page
//! - Connection monitor
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { configure } from './pkg/speedmensa_wasm.js';
//!
//! await init();
//! configure({ paypalUrl: "https://www.paypal.com/checkoutnow?token=..." });
//!
//! // Inline markup can use the global object:
//! // <button id="proceed-button" onclick="SpeedMensa.proceedToPayPal()">Paga</button>
//! ```

pub mod clipboard;
pub mod connection;
pub mod dom;
pub mod forms;
pub mod interactions;
pub mod notify;
pub mod payment;

use js_sys::{Object, Reflect};
use payment::{PageConfig, PageController};
use speedmensa_core::{messages, NotificationKind};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Name of the object installed on `window` for inline handlers
const GLOBAL_API: &str = "SpeedMensa";

thread_local! {
    static CONTROLLER: RefCell<Option<Rc<PageController>>> = RefCell::new(None);
    static INITIALIZED: Cell<bool> = Cell::new(false);
}

/// The page's controller, built from the rendered page on first use
fn controller() -> Rc<PageController> {
    CONTROLLER.with(|slot| {
        Rc::clone(
            slot.borrow_mut()
                .get_or_insert_with(|| Rc::new(PageController::from_page())),
        )
    })
}

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = dom::document()?;
    if document.ready_state() == "loading" {
        let on_ready = Closure::once(Box::new(move |_event: web_sys::Event| {
            dom::report(init_page());
        }) as Box<dyn FnOnce(_)>);
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
        Ok(())
    } else {
        init_page()
    }
}

/// Wire up the already-rendered document. Runs at most once per page.
///
/// The global API and the form guard come first; failures in the
/// optional features after them are logged without undoing either.
fn init_page() -> Result<(), JsValue> {
    if INITIALIZED.with(|done| done.replace(true)) {
        return Ok(());
    }

    web_sys::console::log_1(&messages::STARTUP.into());

    controller();
    expose_global_api()?;

    let document = dom::document()?;
    let form_count = forms::bind_forms(&document)?;
    dom::report(interactions::init_interactions(&document));
    dom::report(connection::watch_connection());

    web_sys::console::log_1(&format!("Guarding {} form(s)", form_count).into());
    Ok(())
}

/// Install `window.SpeedMensa` so inline `onclick` attributes can reach the API
fn expose_global_api() -> Result<(), JsValue> {
    let api = Object::new();

    let toggle = Closure::wrap(Box::new(|| {
        dom::report(interactions::toggle_dark_mode().map(|_| ()));
    }) as Box<dyn FnMut()>);
    Reflect::set(&api, &"toggleDarkMode".into(), &toggle.into_js_value())?;

    let copy = Closure::wrap(Box::new(|text: String| {
        wasm_bindgen_futures::spawn_local(async move {
            dom::report(clipboard::copy_text(&text).await);
        });
    }) as Box<dyn FnMut(String)>);
    Reflect::set(&api, &"copyToClipboard".into(), &copy.into_js_value())?;

    let proceed = Closure::wrap(Box::new(|| {
        dom::report(controller().proceed_to_payment());
    }) as Box<dyn FnMut()>);
    Reflect::set(&api, &"proceedToPayPal".into(), &proceed.into_js_value())?;

    let prezzo =
        Closure::wrap(Box::new(speedmensa_core::format_prezzo) as Box<dyn FnMut(f64) -> String>);
    Reflect::set(&api, &"formatPrezzo".into(), &prezzo.into_js_value())?;

    let window: JsValue = dom::window()?.into();
    Reflect::set(&window, &GLOBAL_API.into(), &api)?;
    Ok(())
}

/// Flip dark mode and persist it. Returns whether dark mode is now on.
#[wasm_bindgen(js_name = toggleDarkMode)]
pub fn toggle_dark_mode() -> Result<bool, JsValue> {
    interactions::toggle_dark_mode()
}

/// Copy text to the clipboard; the outcome is shown as a notification
#[wasm_bindgen(js_name = copyToClipboard)]
pub async fn copy_to_clipboard(text: String) -> Result<(), JsValue> {
    clipboard::copy_text(&text).await
}

/// Start the redirect to PayPal
#[wasm_bindgen(js_name = proceedToPayPal)]
pub fn proceed_to_paypal() -> Result<(), JsValue> {
    controller().proceed_to_payment()
}

/// Replace the page configuration, e.g. `configure({ paypalUrl })`
#[wasm_bindgen]
pub fn configure(config: JsValue) -> Result<(), JsValue> {
    let config: PageConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid configuration: {}", e)))?;
    controller().configure(config);
    Ok(())
}

/// Format an amount in euros, Italian style ("19,90 €")
#[wasm_bindgen(js_name = formatPrezzo)]
pub fn format_prezzo(amount: f64) -> String {
    speedmensa_core::format_prezzo(amount)
}

/// Format a date string as e.g. "venerdì 15 marzo 2024"
#[wasm_bindgen(js_name = formatDataItaliana)]
pub fn format_data_italiana(input: &str) -> Result<String, JsValue> {
    speedmensa_core::format_data_italiana(input).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Show a toast. `kind` is one of info, success, error, warning (default info).
#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: &str, kind: Option<String>) -> Result<(), JsValue> {
    let kind = NotificationKind::parse_or_default(kind.as_deref());
    notify::show_notification(message, kind).map(|_| ())
}

#[wasm_bindgen(js_name = showLoading)]
pub fn show_loading(message: Option<String>) -> Result<(), JsValue> {
    notify::show_loading(message.as_deref())
}

#[wasm_bindgen(js_name = hideLoading)]
pub fn hide_loading() -> Result<(), JsValue> {
    notify::hide_loading()
}

/// Get the library version
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        let version = get_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn test_format_prezzo_export() {
        assert_eq!(format_prezzo(19.9), "19,90\u{a0}€");
        assert_eq!(format_prezzo(1500.0), "1500,00\u{a0}€");
        assert_eq!(format_prezzo(15000.0), "15.000,00\u{a0}€");
    }
}
