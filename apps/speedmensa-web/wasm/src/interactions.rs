//! Dark mode, click confirmations and flash message expiry

use crate::dom;
use crate::forms::WindowConfirm;
use speedmensa_core::notify::{CONFIRM_CLICK_ATTR, DARK_MODE_CLASS, FLASH_CLASS};
use speedmensa_core::timing::FLASH_DISMISS_MS;
use speedmensa_core::{click_allowed, DarkMode, DARK_MODE_KEY};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

/// Page-load wiring: restore the theme, guard flagged clicks, expire flashes.
///
/// An unreadable theme preference (storage blocked) is logged and the
/// rest of the wiring still runs.
pub fn init_interactions(document: &Document) -> Result<(), JsValue> {
    dom::report(apply_stored_dark_mode().map(|_| ()));
    for element in dom::select_all(document, &format!("[{}]", CONFIRM_CLICK_ATTR))? {
        bind_confirm_click(&element)?;
    }
    schedule_flash_removal(document)?;
    Ok(())
}

/// Read the persisted preference and add the dark class if it is set
pub fn apply_stored_dark_mode() -> Result<DarkMode, JsValue> {
    let stored = dom::local_storage()?.get_item(DARK_MODE_KEY)?;
    let mode = DarkMode::from_stored(stored.as_deref());
    if mode.is_enabled() {
        dom::body()?.class_list().add_1(DARK_MODE_CLASS)?;
    }
    Ok(mode)
}

/// Flip the dark class on `<body>` and persist the new state.
/// Returns whether dark mode is now on.
pub fn toggle_dark_mode() -> Result<bool, JsValue> {
    let enabled = dom::body()?.class_list().toggle(DARK_MODE_CLASS)?;
    let mode = DarkMode::new(enabled);
    dom::local_storage()?.set_item(DARK_MODE_KEY, mode.as_stored())?;
    Ok(mode.is_enabled())
}

/// Cancel the element's default click action unless the user confirms
pub fn bind_confirm_click(element: &Element) -> Result<(), JsValue> {
    let target = element.clone();
    dom::listen(element, "click", move |event| {
        let message = target.get_attribute(CONFIRM_CLICK_ATTR).unwrap_or_default();
        let allowed = WindowConfirm::new()
            .map(|confirmer| click_allowed(&message, &confirmer))
            .unwrap_or(false);
        if !allowed {
            event.prevent_default();
        }
    })
}

/// Flash messages present now disappear after a fixed delay; later ones are not tracked
pub fn schedule_flash_removal(document: &Document) -> Result<usize, JsValue> {
    let flashes = dom::select_all(document, &format!(".{}", FLASH_CLASS))?;
    let count = flashes.len();
    for flash in flashes {
        dom::remove_later(flash, FLASH_DISMISS_MS)?;
    }
    Ok(count)
}
