//! Submit-time guard for every form on the page

use crate::dom;
use crate::notify::show_notification;
use speedmensa_core::notify::CONFIRM_ATTR;
use speedmensa_core::{evaluate_submit, messages, Confirm, NotificationKind, SubmitFields};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement, Window};

const PASSWORD_FIELD: &str = "password";
const PASSWORD_CONFIRM_FIELD: &str = "password2";

/// `window.confirm`, which blocks until the user answers
pub struct WindowConfirm {
    window: Window,
}

impl WindowConfirm {
    pub fn new() -> Result<Self, JsValue> {
        Ok(Self {
            window: dom::window()?,
        })
    }
}

impl Confirm for WindowConfirm {
    fn confirm(&self, message: &str) -> bool {
        // A suppressed dialog counts as "no"
        self.window.confirm_with_message(message).unwrap_or(false)
    }
}

/// Guard every form present in the document
pub fn bind_forms(document: &Document) -> Result<usize, JsValue> {
    let forms = dom::select_all(document, "form")?;
    for form in &forms {
        bind_form(form)?;
    }
    Ok(forms.len())
}

/// Guard a single form's submit event
pub fn bind_form(form: &Element) -> Result<(), JsValue> {
    let target = form.clone();
    dom::listen(form, "submit", move |event| {
        dom::report(guard_submit(&target, &event));
    })
}

fn input_field(form: &Element, name: &str) -> Result<Option<HtmlInputElement>, JsValue> {
    let selector = format!("input[name=\"{}\"]", name);
    Ok(form
        .query_selector(&selector)?
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok()))
}

fn guard_submit(form: &Element, event: &Event) -> Result<(), JsValue> {
    let password = input_field(form, PASSWORD_FIELD)?;
    let password_confirm = input_field(form, PASSWORD_CONFIRM_FIELD)?;
    let password_value = password.as_ref().map(|i| i.value());
    let confirm_value = password_confirm.as_ref().map(|i| i.value());
    let confirm_message = form.get_attribute(CONFIRM_ATTR);

    let fields = SubmitFields {
        password: password_value.as_deref(),
        password_confirm: confirm_value.as_deref(),
        confirm_message: confirm_message.as_deref(),
    };
    let verdict = evaluate_submit(&fields, &WindowConfirm::new()?);

    if !verdict.allows_submit() {
        event.prevent_default();
    }

    if verdict.password_mismatch {
        show_notification(messages::PASSWORD_MISMATCH, NotificationKind::Error)?;
        if let Some(field) = password_confirm {
            field.focus()?;
        }
    }

    Ok(())
}
