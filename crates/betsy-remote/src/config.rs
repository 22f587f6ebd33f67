//! Connection settings for the script endpoint.

use std::time::Duration;

use betsy_core::models::config::RemoteSettings;

use crate::{RemoteError, Result};

/// Explicit endpoint configuration handed to backends and pollers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Deployment URL of the spreadsheet script.
    pub script_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Interval between list refreshes.
    pub poll_interval: Duration,
}

impl RemoteConfig {
    pub fn new(script_url: impl Into<String>) -> Self {
        let defaults = RemoteSettings::default();
        Self {
            script_url: script_url.into(),
            timeout: Duration::from_secs(defaults.timeout_secs),
            poll_interval: Duration::from_secs(defaults.poll_interval_secs),
        }
    }

    /// Build from the persisted settings. Fails when no URL is set.
    pub fn from_settings(settings: &RemoteSettings) -> Result<Self> {
        let url = settings.script_url.trim();
        if url.is_empty() {
            return Err(RemoteError::NotConfigured);
        }
        Ok(Self {
            script_url: url.to_string(),
            timeout: Duration::from_secs(settings.timeout_secs.max(1)),
            poll_interval: Duration::from_secs(settings.poll_interval_secs.max(1)),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
