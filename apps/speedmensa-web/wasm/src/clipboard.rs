//! Clipboard writes with user feedback

use crate::dom;
use crate::notify::show_notification;
use js_sys::{Function, Promise, Reflect};
use speedmensa_core::{messages, NotificationKind};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Copy `text` and report the outcome as a toast. Clipboard failures
/// are not returned to the caller.
pub async fn copy_text(text: &str) -> Result<(), JsValue> {
    match write_text(text).await {
        Ok(()) => {
            show_notification(messages::COPIED, NotificationKind::Success)?;
        }
        Err(err) => {
            web_sys::console::warn_1(&err);
            show_notification(messages::COPY_FAILED, NotificationKind::Error)?;
        }
    }
    Ok(())
}

/// `navigator.clipboard.writeText(text)`, looked up dynamically since
/// the API is missing on insecure origins
async fn write_text(text: &str) -> Result<(), JsValue> {
    let navigator = dom::window()?.navigator();
    let clipboard = Reflect::get(&navigator, &"clipboard".into())?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(JsValue::from_str("Clipboard API not available"));
    }

    let write: Function = Reflect::get(&clipboard, &"writeText".into())?.dyn_into()?;
    let promise: Promise = write.call1(&clipboard, &JsValue::from_str(text))?.dyn_into()?;
    JsFuture::from(promise).await?;
    Ok(())
}
