//! Dark-mode preference as stored in `localStorage`

/// Storage key for the preference
pub const DARK_MODE_KEY: &str = "darkMode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DarkMode(bool);

impl DarkMode {
    pub fn new(enabled: bool) -> Self {
        Self(enabled)
    }

    /// Only the exact string `"true"` enables dark mode
    pub fn from_stored(value: Option<&str>) -> Self {
        Self(value == Some("true"))
    }

    pub fn as_stored(&self) -> &'static str {
        if self.0 {
            "true"
        } else {
            "false"
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.0
    }

    pub fn toggled(self) -> Self {
        Self(!self.0)
    }
}
