//! Tagged logger facade
//!
//! Thin sink in front of `tracing` with an enable flag and a tag
//! allow-list. The caller always names the log source explicitly; there is
//! no call-stack inspection and no ambient global state. Construct one
//! `TagLogger` at startup and pass it to whoever needs it.

use std::collections::HashSet;

/// Logging configuration: master switch plus tag allow-list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    enabled: bool,
    tags: HashSet<String>,
}

impl LogConfig {
    /// Create a disabled config with an empty allow-list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the master enable switch.
    #[must_use]
    pub const fn enabled(mut self, on: bool) -> Self {
        self.enabled = on;
        self
    }

    /// Add a tag to the allow-list.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// True when the master switch is on.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True when logging is on and the tag is allow-listed.
    #[must_use]
    pub fn is_visible(&self, tag: &str) -> bool {
        self.enabled && self.tags.contains(tag)
    }

    /// Clear the allow-list and disable logging.
    pub fn reset(&mut self) {
        self.enabled = false;
        self.tags.clear();
    }
}

/// Print-style logger that prefixes each line with its source.
#[derive(Debug, Clone, Default)]
pub struct TagLogger {
    config: LogConfig,
}

impl TagLogger {
    /// Create a logger with the given configuration.
    #[must_use]
    pub const fn new(config: LogConfig) -> Self {
        Self { config }
    }

    /// Get the active configuration.
    #[must_use]
    pub const fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Log a message from the named source, one line per event.
    pub fn log(&self, source: &str, message: &str) {
        if self.config.is_enabled() {
            Self::emit(source, message);
        }
    }

    /// Log a tagged message; dropped unless the tag is allow-listed.
    pub fn log_tagged(&self, source: &str, tag: &str, message: &str) {
        if self.config.is_visible(tag) {
            Self::emit(source, message);
        }
    }

    fn emit(source: &str, message: &str) {
        for line in message.lines() {
            tracing::info!("[{source}] {line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_silent() {
        let config = LogConfig::new();
        assert!(!config.is_enabled());
        assert!(!config.is_visible("solver"));
    }

    #[test]
    fn test_tag_visibility_requires_enable_and_allowlist() {
        let config = LogConfig::new().tag("solver");
        assert!(!config.is_visible("solver"));

        let config = config.enabled(true);
        assert!(config.is_visible("solver"));
        assert!(!config.is_visible("parser"));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut config = LogConfig::new().enabled(true).tag("solver");
        config.reset();
        assert!(!config.is_enabled());
        assert!(!config.is_visible("solver"));
    }

    #[test]
    fn test_logger_does_not_panic_on_multiline() {
        let logger = TagLogger::new(LogConfig::new().enabled(true).tag("solver"));
        logger.log("run", "line one\nline two");
        logger.log_tagged("run", "solver", "sat\nunsat");
        logger.log_tagged("run", "hidden", "dropped");
    }
}
