//! Toast notifications and the full-screen loading overlay
//!
//! Message text is always inserted as a text node, so callers may pass
//! untrusted strings.

use crate::dom;
use speedmensa_core::notify::LOADER_ID;
use speedmensa_core::timing::NOTIFICATION_DISMISS_MS;
use speedmensa_core::{messages, NotificationKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// Append a toast to `<body>` and schedule its removal
pub fn show_notification(message: &str, kind: NotificationKind) -> Result<Element, JsValue> {
    let document = dom::document()?;
    let notification = document.create_element("div")?;
    notification.set_class_name(&kind.css_class());
    notification.set_text_content(Some(message));

    dom::body()?.append_child(&notification)?;
    dom::remove_later(notification.clone(), NOTIFICATION_DISMISS_MS)?;

    Ok(notification)
}

/// Show the loading overlay unless one is already on screen
pub fn show_loading(message: Option<&str>) -> Result<(), JsValue> {
    let document = dom::document()?;
    if document.get_element_by_id(LOADER_ID).is_some() {
        return Ok(());
    }

    let loader = document.create_element("div")?;
    loader.set_id(LOADER_ID);

    let spinner = document.create_element("div")?;
    spinner.set_class_name("spinner");
    loader.append_child(&spinner)?;

    let caption = document.create_element("p")?;
    caption.set_text_content(Some(message.unwrap_or(messages::LOADING)));
    if let Some(caption) = caption.dyn_ref::<HtmlElement>() {
        let style = caption.style();
        style.set_property("color", "white")?;
        style.set_property("margin-top", "10px")?;
    }
    loader.append_child(&caption)?;

    if let Some(loader) = loader.dyn_ref::<HtmlElement>() {
        let style = loader.style();
        style.set_property("position", "fixed")?;
        style.set_property("inset", "0")?;
        style.set_property("background", "rgba(0,0,0,0.7)")?;
        style.set_property("display", "flex")?;
        style.set_property("flex-direction", "column")?;
        style.set_property("align-items", "center")?;
        style.set_property("justify-content", "center")?;
        style.set_property("z-index", "10000")?;
    }

    dom::body()?.append_child(&loader)?;
    Ok(())
}

pub fn hide_loading() -> Result<(), JsValue> {
    if let Some(loader) = dom::document()?.get_element_by_id(LOADER_ID) {
        loader.remove();
    }
    Ok(())
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use crate::dom::test_support::sleep;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn loader_count() -> u32 {
        dom::document()
            .unwrap()
            .query_selector_all(&format!("#{}", LOADER_ID))
            .unwrap()
            .length()
    }

    #[wasm_bindgen_test]
    fn test_notification_classes_and_text() {
        let toast = show_notification("<b>ciao</b>", NotificationKind::Warning).unwrap();
        assert_eq!(toast.class_name(), "notification notification-warning");
        assert_eq!(toast.text_content().unwrap(), "<b>ciao</b>");
        assert_eq!(toast.child_element_count(), 0);
        assert!(toast.parent_element().is_some());
        toast.remove();
    }

    #[wasm_bindgen_test]
    async fn test_notification_dismisses_itself() {
        let toast = show_notification("Salvato", NotificationKind::Success).unwrap();

        sleep(NOTIFICATION_DISMISS_MS - 1000).await;
        assert!(toast.parent_element().is_some());

        sleep(1100).await;
        assert!(toast.parent_element().is_none());
    }

    #[wasm_bindgen_test]
    fn test_notifications_stack() {
        let first = show_notification("uno", NotificationKind::Info).unwrap();
        let second = show_notification("due", NotificationKind::Info).unwrap();
        assert!(first.parent_element().is_some());
        assert!(second.parent_element().is_some());
        first.remove();
        second.remove();
    }

    #[wasm_bindgen_test]
    fn test_loader_is_singleton() {
        show_loading(None).unwrap();
        show_loading(Some("Altro")).unwrap();
        assert_eq!(loader_count(), 1);

        let loader = dom::document().unwrap().get_element_by_id(LOADER_ID).unwrap();
        assert_eq!(loader.text_content().unwrap(), messages::LOADING);

        hide_loading().unwrap();
        assert_eq!(loader_count(), 0);

        // Hiding again is a no-op
        hide_loading().unwrap();
        assert_eq!(loader_count(), 0);
    }

    #[wasm_bindgen_test]
    fn test_loader_custom_caption() {
        show_loading(Some("Pagamento...")).unwrap();
        let loader = dom::document().unwrap().get_element_by_id(LOADER_ID).unwrap();
        assert_eq!(loader.text_content().unwrap(), "Pagamento...");
        hide_loading().unwrap();
    }
}
