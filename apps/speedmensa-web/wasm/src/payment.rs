//! Redirect to the external payment page
//!
//! The controller owns the payment URL and the redirect state. It is
//! built once per page, before any click can reach it.

use crate::dom;
use crate::notify::show_notification;
use serde::Deserialize;
use speedmensa_core::notify::PROCEED_BUTTON_ID;
use speedmensa_core::{
    messages, NotificationKind, PaymentError, PaymentFlow, PaymentUrl, RedirectState,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlButtonElement, HtmlElement};

/// Global variable older templates define with the PayPal URL
const PAYPAL_URL_GLOBAL: &str = "paypalUrl";

// Templates declare `const paypalUrl = ...` in a classic script. That is a
// global lexical binding, not a `window` property, so it is only reachable
// by name from script code.
#[wasm_bindgen(inline_js = "export function lexicalPaypalUrl() { \
    return typeof paypalUrl === 'undefined' ? undefined : paypalUrl; }")]
extern "C" {
    #[wasm_bindgen(js_name = lexicalPaypalUrl)]
    fn lexical_paypal_url() -> JsValue;
}

/// Attribute on the proceed button that may carry the URL
const PAYPAL_URL_ATTR: &str = "data-paypal-url";

/// Page configuration passed from JavaScript
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    #[serde(default)]
    pub paypal_url: Option<String>,
}

/// Performs the actual navigation
pub type Navigate = Rc<dyn Fn(&str) -> Result<(), JsValue>>;

fn navigate_with_location() -> Navigate {
    Rc::new(|url: &str| -> Result<(), JsValue> {
        dom::window()?.location().set_href(url)
    })
}

pub struct PageController {
    payment_url: RefCell<Option<PaymentUrl>>,
    flow: RefCell<PaymentFlow>,
    navigate: Navigate,
}

impl PageController {
    pub fn new(payment_url: Option<PaymentUrl>) -> Self {
        Self::with_navigator(payment_url, navigate_with_location())
    }

    pub fn with_navigator(payment_url: Option<PaymentUrl>, navigate: Navigate) -> Self {
        Self {
            payment_url: RefCell::new(payment_url),
            flow: RefCell::new(PaymentFlow::new()),
            navigate,
        }
    }

    /// Build from whatever the rendered page provides: a global
    /// `paypalUrl` (window property or top-level `const`/`let`), else a
    /// `data-paypal-url` attribute on the proceed button.
    pub fn from_page() -> Self {
        let controller = Self::new(discover_payment_url());
        if controller.payment_url.borrow().is_none() {
            web_sys::console::warn_1(
                &"No PayPal URL configured for this page; payment redirect is disabled".into(),
            );
        }
        controller
    }

    pub fn configure(&self, config: PageConfig) {
        match PaymentUrl::parse(config.paypal_url.as_deref()) {
            Ok(url) => *self.payment_url.borrow_mut() = Some(url),
            Err(err) => {
                web_sys::console::warn_1(&err.to_string().into());
                *self.payment_url.borrow_mut() = None;
            }
        }
    }

    /// The configured URL, or whatever the page provides now. Scripts
    /// later in the page may define the global after initialization.
    fn resolve_payment_url(&self) -> Option<PaymentUrl> {
        let mut slot = self.payment_url.borrow_mut();
        if slot.is_none() {
            *slot = discover_payment_url();
        }
        slot.clone()
    }

    pub fn state(&self) -> RedirectState {
        self.flow.borrow().state()
    }

    pub fn is_redirecting(&self) -> bool {
        self.flow.borrow().is_redirecting()
    }

    /// Disable the proceed button, show progress and navigate after a short delay.
    ///
    /// A second call while redirecting does nothing. A missing URL shows
    /// a configuration error and leaves the button usable.
    pub fn proceed_to_payment(&self) -> Result<(), JsValue> {
        if self.is_redirecting() {
            return Ok(());
        }

        let Some(button) = dom::document()?.get_element_by_id(PROCEED_BUTTON_ID) else {
            return Ok(());
        };

        let payment_url = self.resolve_payment_url();
        let result = self.flow.borrow_mut().begin(payment_url.as_ref());
        let redirect = match result {
            Ok(redirect) => redirect,
            Err(PaymentError::AlreadyRedirecting) => return Ok(()),
            Err(err @ PaymentError::Config(_)) => {
                show_notification(messages::MISSING_PAYMENT_URL, NotificationKind::Error)?;
                web_sys::console::error_1(
                    &format!(
                        "{}: set window.{} or call configure({{ paypalUrl }}) before redirecting",
                        err, PAYPAL_URL_GLOBAL
                    )
                    .into(),
                );
                return Ok(());
            }
        };

        match button.dyn_ref::<HtmlButtonElement>() {
            Some(button) => button.set_disabled(true),
            None => button.set_attribute("disabled", "")?,
        }
        button.set_text_content(Some(redirect.button_label));
        if let Some(button) = button.dyn_ref::<HtmlElement>() {
            button.style().set_property("opacity", "0.7")?;
        }

        let navigate = Rc::clone(&self.navigate);
        let url = redirect.url;
        dom::set_timeout(redirect.delay_ms, move || {
            dom::report(navigate(url.as_str()));
        })?;

        Ok(())
    }
}

fn discover_payment_url() -> Option<PaymentUrl> {
    let window = dom::window().ok()?;
    let from_window = js_sys::Reflect::get(&window, &PAYPAL_URL_GLOBAL.into())
        .ok()
        .and_then(|value| value.as_string());
    if let Ok(url) = PaymentUrl::parse(from_window.as_deref()) {
        return Some(url);
    }

    let from_script = lexical_paypal_url().as_string();
    if let Ok(url) = PaymentUrl::parse(from_script.as_deref()) {
        return Some(url);
    }

    let from_button = window
        .document()?
        .get_element_by_id(PROCEED_BUTTON_ID)?
        .get_attribute(PAYPAL_URL_ATTR);
    PaymentUrl::parse(from_button.as_deref()).ok()
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use crate::dom::test_support::sleep;
    use std::cell::Cell;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn add_button() -> HtmlButtonElement {
        let document = dom::document().unwrap();
        let button: HtmlButtonElement =
            document.create_element("button").unwrap().unchecked_into();
        button.set_id(PROCEED_BUTTON_ID);
        button.set_text_content(Some("Paga con PayPal"));
        dom::body().unwrap().append_child(&button).unwrap();
        button
    }

    fn counting_navigator() -> (Navigate, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let navigate: Navigate = Rc::new(move |_url: &str| -> Result<(), JsValue> {
            seen.set(seen.get() + 1);
            Ok(())
        });
        (navigate, count)
    }

    fn error_count() -> u32 {
        dom::document()
            .unwrap()
            .query_selector_all(".notification-error")
            .unwrap()
            .length()
    }

    #[wasm_bindgen_test]
    async fn test_missing_url_reports_once_and_keeps_button() {
        let button = add_button();
        let (navigate, count) = counting_navigator();
        let controller = PageController::with_navigator(None, navigate);

        let before = error_count();
        controller.proceed_to_payment().unwrap();
        assert_eq!(error_count(), before + 1);
        assert!(!button.disabled());
        assert_eq!(controller.state(), RedirectState::Idle);

        sleep(600).await;
        assert_eq!(count.get(), 0);
        button.remove();
    }

    #[wasm_bindgen_test]
    async fn test_double_click_navigates_once() {
        let button = add_button();
        let (navigate, count) = counting_navigator();
        let url = PaymentUrl::parse(Some("https://www.paypal.com/checkoutnow?token=EC-1")).ok();
        let controller = PageController::with_navigator(url, navigate);

        controller.proceed_to_payment().unwrap();
        assert!(button.disabled());
        assert_eq!(button.text_content().unwrap(), messages::REDIRECTING);
        controller.proceed_to_payment().unwrap();

        sleep(600).await;
        assert_eq!(count.get(), 1);
        assert!(controller.is_redirecting());
        button.remove();
    }

    #[wasm_bindgen_test]
    fn test_no_button_is_a_no_op() {
        let (navigate, _count) = counting_navigator();
        let controller = PageController::with_navigator(None, navigate);
        let before = error_count();
        controller.proceed_to_payment().unwrap();
        assert_eq!(error_count(), before);
    }

    #[wasm_bindgen_test]
    fn test_configure_replaces_url() {
        let (navigate, _count) = counting_navigator();
        let controller = PageController::with_navigator(None, navigate);
        controller.configure(PageConfig {
            paypal_url: Some("https://pay.example/ok".to_string()),
        });
        assert!(controller.payment_url.borrow().is_some());

        controller.configure(PageConfig { paypal_url: None });
        assert!(controller.payment_url.borrow().is_none());
    }

    #[wasm_bindgen_test]
    fn test_url_from_button_attribute() {
        let button = add_button();
        button
            .set_attribute(PAYPAL_URL_ATTR, "https://pay.example/from-button")
            .unwrap();

        let url = discover_payment_url();
        assert_eq!(url.unwrap().as_str(), "https://pay.example/from-button");
        button.remove();
    }

    /// Run `source` as a classic page script
    fn run_script(source: &str) {
        let script = dom::document().unwrap().create_element("script").unwrap();
        script.set_text_content(Some(source));
        dom::body().unwrap().append_child(&script).unwrap();
        script.remove();
    }

    #[wasm_bindgen_test]
    async fn test_url_from_script_binding_defined_after_init() {
        let button = add_button();
        let (navigate, count) = counting_navigator();
        let controller = PageController::with_navigator(None, navigate);

        // A top-level binding never shows up on `window`
        run_script("let paypalUrl = 'https://pay.example/from-script';");
        let on_window = js_sys::Reflect::get(&dom::window().unwrap(), &PAYPAL_URL_GLOBAL.into());
        assert!(on_window.unwrap().is_undefined());

        let before = error_count();
        controller.proceed_to_payment().unwrap();
        assert_eq!(error_count(), before);
        assert!(controller.is_redirecting());
        assert_eq!(
            controller.payment_url.borrow().as_ref().map(|u| u.as_str().to_string()),
            Some("https://pay.example/from-script".to_string())
        );

        sleep(600).await;
        assert_eq!(count.get(), 1);

        run_script("paypalUrl = undefined;");
        button.remove();
    }
}
