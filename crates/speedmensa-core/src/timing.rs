//! Fixed delays used by the page layer (milliseconds)

/// How long a toast notification stays on screen
pub const NOTIFICATION_DISMISS_MS: i32 = 3000;

/// How long a server-rendered flash message stays on screen
pub const FLASH_DISMISS_MS: i32 = 5000;

/// Pause between disabling the proceed button and navigating away,
/// long enough for the progress label to paint
pub const REDIRECT_DELAY_MS: i32 = 500;
