//! Loading spinner that becomes a no-op when the `progress` feature is disabled

use std::time::Duration;

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

#[cfg(not(feature = "progress"))]
use self::noop::{ProgressBar, ProgressStyle};

#[cfg(not(feature = "progress"))]
mod noop {
    use std::time::Duration;

    pub struct ProgressBar;

    impl ProgressBar {
        pub fn new_spinner() -> Self {
            ProgressBar
        }

        pub fn set_style(&self, _style: ProgressStyle) {}
        pub fn set_message(&self, _msg: impl Into<std::borrow::Cow<'static, str>>) {}
        pub fn enable_steady_tick(&self, _interval: Duration) {}
        pub fn finish_and_clear(&self) {}
    }

    pub struct ProgressStyle;

    impl ProgressStyle {
        pub fn default_spinner() -> Self {
            ProgressStyle
        }

        pub fn template(self, _template: &str) -> Result<Self, std::convert::Infallible> {
            Ok(self)
        }
    }
}

/// Spinner shown on stderr while a corpus is loaded and indexed.
/// Cleared when dropped.
pub struct Spinner(Option<ProgressBar>);

impl Spinner {
    /// Start a spinner, or a silent placeholder when `enabled` is false
    pub fn start(message: &str, enabled: bool) -> Self {
        if !enabled {
            return Spinner(None);
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Spinner(Some(bar))
    }

    pub fn is_active(&self) -> bool {
        self.0.is_some()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(bar) = self.0.take() {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_spinner_is_inert() {
        let spinner = Spinner::start("Loading", false);
        assert!(!spinner.is_active());
    }
}
