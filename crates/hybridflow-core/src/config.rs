//! Timing and platform configuration.
//!
//! Stores settings in `~/.hybridflow/config.json`. Every field has a default,
//! so a missing or partial file is fine. The wait deadline and polling
//! interval live here rather than as hidden constants so that slow devices or
//! CI emulators can be accommodated without code changes.
//!
//! # Example
//!
//! ```no_run
//! use hybridflow_core::config::FlowConfig;
//!
//! // Load (returns defaults if file doesn't exist)
//! let config = FlowConfig::load();
//! println!("waits time out after {:?}", config.poll_policy().timeout);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::gesture::GestureStrategy;
use crate::platform::Platform;
use crate::wait::{PollPolicy, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};

const CONFIG_FILENAME: &str = "config.json";

/// Default delay between the steps of a flash sequence.
pub const DEFAULT_FLASH_INTERVAL_MS: u64 = 500;

/// Returns the hybridflow settings directory (`~/.hybridflow`).
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hybridflow")
}

/// Process-wide settings shared by every operation of a [`Flow`](crate::flow::Flow).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Which backend variant the driver talks to.
    pub platform: Platform,
    /// Deadline for presence and absence waits.
    pub wait_timeout_ms: u64,
    /// Delay between polls while waiting.
    pub poll_interval_ms: u64,
    /// Delay between the visibility toggles of [`Flow::flash`](crate::flow::Flow::flash).
    pub flash_interval_ms: u64,
    /// Overrides the platform's default gesture strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gesture_strategy: Option<GestureStrategy>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            flash_interval_ms: DEFAULT_FLASH_INTERVAL_MS,
            gesture_strategy: None,
        }
    }
}

impl FlowConfig {
    /// Default settings for a platform.
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            ..Self::default()
        }
    }

    /// Load config from `~/.hybridflow/config.json`.
    ///
    /// Returns [`Default`] if the file does not exist or cannot be parsed.
    pub fn load() -> Self {
        Self::load_from(config_dir().join(CONFIG_FILENAME))
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to `~/.hybridflow/config.json`.
    pub fn save(&self) -> std::io::Result<()> {
        let dir = config_dir();
        std::fs::create_dir_all(&dir)?;
        self.save_to(dir.join(CONFIG_FILENAME))
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }

    #[must_use]
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout_ms = timeout.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_flash_interval(mut self, interval: Duration) -> Self {
        self.flash_interval_ms = interval.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_gesture_strategy(mut self, strategy: GestureStrategy) -> Self {
        self.gesture_strategy = Some(strategy);
        self
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(
            Duration::from_millis(self.wait_timeout_ms),
            Duration::from_millis(self.poll_interval_ms),
        )
    }

    pub fn flash_interval(&self) -> Duration {
        Duration::from_millis(self.flash_interval_ms)
    }

    /// The configured strategy, or the platform's default.
    pub fn gesture_strategy(&self) -> GestureStrategy {
        self.gesture_strategy
            .unwrap_or_else(|| self.platform.default_gesture_strategy())
    }
}
