//! Conditional screenshot capture.
//!
//! Nearly every operation accepts `screenshot` / `screenshot_title` options.
//! When enabled, exactly one artifact is handed to the driver's reporting
//! channel; when disabled, the driver is not touched at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::driver::AutomationDriver;
use crate::error::FlowError;

/// Title used when a capture is requested without one.
pub const DEFAULT_TITLE: &str = "Screenshot";

/// A screenshot that the reporting channel has accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// The step title the screenshot was filed under.
    pub title: String,
    /// Whatever the reporting channel uses to locate the image (path, URL, id).
    pub reference: String,
    /// When the screenshot was taken.
    pub captured_at: DateTime<Utc>,
}

impl Artifact {
    pub fn new(title: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            reference: reference.into(),
            captured_at: Utc::now(),
        }
    }
}

/// Captures a screenshot only when `condition` holds.
///
/// Without a title the capture is filed as [`DEFAULT_TITLE`].
pub async fn capture_if(
    driver: &dyn AutomationDriver,
    condition: bool,
    title: Option<&str>,
) -> Result<Option<Artifact>, FlowError> {
    if !condition {
        return Ok(None);
    }
    let title = title.unwrap_or(DEFAULT_TITLE);
    let artifact = driver.screenshot(title).await?;
    debug!(title, reference = %artifact.reference, "screenshot captured");
    Ok(Some(artifact))
}

/// The screenshot part of an operation's options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenshotDirective {
    pub enabled: bool,
    pub title: Option<String>,
}

impl ScreenshotDirective {
    pub fn new(enabled: bool, title: Option<String>) -> Self {
        Self { enabled, title }
    }

    /// The title this directive would capture under, given the operation's
    /// own default.
    pub fn resolve_title<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(fallback)
    }

    /// Captures if enabled, titled explicitly or with `fallback`.
    pub async fn capture(
        &self,
        driver: &dyn AutomationDriver,
        fallback: &str,
    ) -> Result<Option<Artifact>, FlowError> {
        capture_if(driver, self.enabled, Some(self.resolve_title(fallback))).await
    }
}
