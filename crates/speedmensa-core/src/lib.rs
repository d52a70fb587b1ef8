//! Speed Mensa page logic
//!
//! DOM-free decisions behind the storefront's page layer: form guards,
//! notification kinds, the dark-mode preference, the payment redirect
//! state machine and Italian formatting. The `speedmensa-wasm` bundle
//! applies these to the live document.

pub mod error;
pub mod format;
pub mod forms;
pub mod notify;
pub mod payment;
pub mod theme;
pub mod timing;

pub use error::{ConfigError, FormatError, PaymentError};
pub use format::{format_data, format_data_italiana, format_prezzo};
pub use forms::{
    click_allowed, evaluate_submit, passwords_match, Confirm, SubmitFields, SubmitVerdict,
};
pub use notify::{messages, NotificationKind};
pub use payment::{PaymentFlow, PaymentUrl, Redirect, RedirectState};
pub use theme::{DarkMode, DARK_MODE_KEY};
