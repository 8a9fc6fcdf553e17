//! Per-call options for [`Flow`](crate::flow::Flow) operations.

use serde::{Deserialize, Serialize};

use crate::screenshot::ScreenshotDirective;

/// The option set accepted by every workflow.
///
/// Not every option applies to every operation: `clear` and `wait` are only
/// read by text entry, the screenshot options by everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Clear existing content before entering text.
    pub clear: bool,
    /// Wait for the element again after entering text.
    pub wait: bool,
    /// Capture a screenshot as part of the operation.
    pub screenshot: bool,
    /// Title for that screenshot; each operation has its own default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_title: Option<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn clear(mut self) -> Self {
        self.clear = true;
        self
    }

    #[must_use]
    pub fn wait(mut self) -> Self {
        self.wait = true;
        self
    }

    #[must_use]
    pub fn screenshot(mut self) -> Self {
        self.screenshot = true;
        self
    }

    /// Requests a screenshot filed under `title`.
    #[must_use]
    pub fn screenshot_titled(mut self, title: impl Into<String>) -> Self {
        self.screenshot = true;
        self.screenshot_title = Some(title.into());
        self
    }

    pub fn screenshot_directive(&self) -> ScreenshotDirective {
        ScreenshotDirective::new(self.screenshot, self.screenshot_title.clone())
    }
}
