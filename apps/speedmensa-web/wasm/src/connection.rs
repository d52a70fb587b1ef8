//! Online/offline toasts

use crate::dom;
use crate::notify::show_notification;
use speedmensa_core::{messages, NotificationKind};
use wasm_bindgen::prelude::*;

/// Notify the user whenever the browser loses or regains its connection
pub fn watch_connection() -> Result<(), JsValue> {
    let window = dom::window()?;
    dom::listen(&window, "offline", |_| {
        dom::report(show_notification(messages::OFFLINE, NotificationKind::Warning).map(|_| ()));
    })?;
    dom::listen(&window, "online", |_| {
        dom::report(show_notification(messages::ONLINE, NotificationKind::Success).map(|_| ()));
    })?;
    Ok(())
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::Event;

    wasm_bindgen_test_configure!(run_in_browser);

    fn count(selector: &str) -> u32 {
        dom::document()
            .unwrap()
            .query_selector_all(selector)
            .unwrap()
            .length()
    }

    #[wasm_bindgen_test]
    fn test_offline_event_shows_warning() {
        watch_connection().unwrap();
        let before = count(".notification-warning");

        let event = Event::new("offline").unwrap();
        dom::window().unwrap().dispatch_event(&event).unwrap();

        assert!(count(".notification-warning") > before);
    }
}
