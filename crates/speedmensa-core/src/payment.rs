//! Payment redirect state machine
//!
//! A page load may start at most one redirect. Once the flow is
//! `Redirecting` it stays there; the only way out is the browser
//! navigating away.

use crate::error::{ConfigError, PaymentError};
use crate::notify::messages;
use crate::timing::REDIRECT_DELAY_MS;

/// Non-empty payment page URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentUrl(String);

impl PaymentUrl {
    /// Absent, empty or whitespace-only values are a configuration error
    pub fn parse(value: Option<&str>) -> Result<Self, ConfigError> {
        match value.map(str::trim) {
            Some(url) if !url.is_empty() => Ok(Self(url.to_string())),
            _ => Err(ConfigError::MissingPaymentUrl),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectState {
    #[default]
    Idle,
    Redirecting,
}

/// What the page must do once a redirect has been accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub url: PaymentUrl,
    pub delay_ms: i32,
    pub button_label: &'static str,
}

#[derive(Debug, Default)]
pub struct PaymentFlow {
    state: RedirectState,
}

impl PaymentFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RedirectState {
        self.state
    }

    pub fn is_redirecting(&self) -> bool {
        self.state == RedirectState::Redirecting
    }

    /// Try to move from `Idle` to `Redirecting`.
    ///
    /// The re-entrancy guard is checked before the configuration, so a
    /// second click never produces a configuration error.
    pub fn begin(&mut self, url: Option<&PaymentUrl>) -> Result<Redirect, PaymentError> {
        if self.is_redirecting() {
            return Err(PaymentError::AlreadyRedirecting);
        }

        let url = url.ok_or(ConfigError::MissingPaymentUrl)?;

        self.state = RedirectState::Redirecting;
        Ok(Redirect {
            url: url.clone(),
            delay_ms: REDIRECT_DELAY_MS,
            button_label: messages::REDIRECTING,
        })
    }
}
