//! Notification kinds and the page's element contract

use std::fmt;
use std::str::FromStr;

/// Identifier of the full-screen loading overlay
pub const LOADER_ID: &str = "global-loader";

/// Class carried by server-rendered flash messages
pub const FLASH_CLASS: &str = "flash";

/// Class toggled on `<body>` for the dark theme
pub const DARK_MODE_CLASS: &str = "dark-mode";

/// Identifier of the button that starts the payment redirect
pub const PROCEED_BUTTON_ID: &str = "proceed-button";

/// Form attribute holding a submit confirmation prompt
pub const CONFIRM_ATTR: &str = "data-confirm";

/// Attribute holding a click confirmation prompt
pub const CONFIRM_CLICK_ATTR: &str = "data-confirm-click";

/// User-facing texts
pub mod messages {
    pub const STARTUP: &str = "Speed Mensa Lite - Initialized";
    pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
    pub const LOADING: &str = "Loading...";
    pub const REDIRECTING: &str = "🔄 Redirecting...";
    pub const MISSING_PAYMENT_URL: &str = "Configuration error: PayPal URL missing from the page.";
    pub const COPIED: &str = "Copied!";
    pub const COPY_FAILED: &str = "Copy failed";
    pub const OFFLINE: &str = "You are offline";
    pub const ONLINE: &str = "Back online";
}

/// Visual style of a toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
        }
    }

    /// Full `class` attribute value for a toast of this kind
    pub fn css_class(&self) -> String {
        format!("notification notification-{}", self.as_str())
    }

    /// Parse a kind coming from page markup, falling back to `Info`
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(NotificationKind::Info),
            "success" => Ok(NotificationKind::Success),
            "error" => Ok(NotificationKind::Error),
            "warning" => Ok(NotificationKind::Warning),
            other => Err(format!("Unknown notification kind: {}", other)),
        }
    }
}
