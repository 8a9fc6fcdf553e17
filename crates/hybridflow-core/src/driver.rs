//! Automation driver trait for backend-agnostic app interaction.
//!
//! This module defines the [`AutomationDriver`] trait, the capability
//! interface every operation in this crate is written against. A driver wraps
//! whatever actually talks to the device (an Android instrumentation server,
//! an iOS agent, a test fake) and exposes element queries, taps, text entry,
//! gestures, screenshots and in-page script execution.
//!
//! The driver is owned by the caller. Operations borrow it (`&dyn
//! AutomationDriver`) or share it through an `Arc` held by [`Flow`](crate::flow::Flow);
//! nothing here constructs or replaces it.
//!
//! Query and action methods take a [`ResolvedQuery`]. How a
//! backend turns those into its own query language is up to the backend;
//! [`Platform::render_query`](crate::platform::Platform::render_query) covers
//! the common Android and iOS forms.

use async_trait::async_trait;
use thiserror::Error;

use crate::element::{Element, ViewportRect};
use crate::gesture::{GestureStrategy, Point, ScrollDirection};
use crate::screenshot::Artifact;
use crate::selector::ResolvedQuery;

/// Errors reported by a driver backend.
///
/// These are passed through to callers unchanged, wrapped in
/// [`FlowError::Driver`](crate::error::FlowError::Driver).
#[derive(Error, Debug)]
pub enum DriverError {
    /// A command or query failed with the given message.
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// The backend is not available or not connected.
    #[error("Not connected to automation backend")]
    NotConnected,

    /// A script raised an error inside the web surface.
    #[error("Script failed: {0}")]
    ScriptFailed(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse data returned by the backend.
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for DriverError {
    fn from(err: serde_json::Error) -> Self {
        DriverError::JsonParse(err.to_string())
    }
}

/// Capability interface over a running native or hybrid application.
///
/// Every method is a single driver round-trip; none of them wait or retry.
/// Waiting is layered on top by [`wait`](crate::wait).
///
/// # Required Methods
///
/// Implementors must provide the query methods
/// ([`query_structural`](AutomationDriver::query_structural),
/// [`query_xpath`](AutomationDriver::query_xpath),
/// [`query_all`](AutomationDriver::query_all),
/// [`query_web_surface`](AutomationDriver::query_web_surface)), the actions
/// ([`tap`](AutomationDriver::tap), [`enter_text`](AutomationDriver::enter_text),
/// [`clear_text`](AutomationDriver::clear_text),
/// [`dismiss_keyboard`](AutomationDriver::dismiss_keyboard),
/// [`drag`](AutomationDriver::drag), [`scroll`](AutomationDriver::scroll),
/// [`scroll_to`](AutomationDriver::scroll_to)),
/// [`screenshot`](AutomationDriver::screenshot) and
/// [`execute_script`](AutomationDriver::execute_script).
#[async_trait]
pub trait AutomationDriver: Send + Sync {
    /// Query visible nodes inside the web surface with a structural (CSS) selector.
    ///
    /// Only called with queries whose kind is [`SelectorKind::Structural`](crate::selector::SelectorKind::Structural).
    async fn query_structural(&self, query: &ResolvedQuery) -> Result<Vec<Element>, DriverError>;

    /// Query visible nodes inside the web surface with an XPath expression.
    ///
    /// Only called with queries whose kind is [`SelectorKind::XPath`](crate::selector::SelectorKind::XPath).
    async fn query_xpath(&self, query: &ResolvedQuery) -> Result<Vec<Element>, DriverError>;

    /// Query all matching nodes, including ones that are attached but hidden
    /// or scrolled out of view.
    async fn query_all(&self, query: &ResolvedQuery) -> Result<Vec<Element>, DriverError>;

    /// Query the embedded web surfaces themselves.
    ///
    /// Returns an empty list when the current screen has no web surface.
    async fn query_web_surface(&self) -> Result<Vec<Element>, DriverError>;

    /// Tap the first node matching the query.
    ///
    /// "First" is the driver's natural result order; callers must not rely on
    /// any particular tie-break between multiple matches.
    async fn tap(&self, query: &ResolvedQuery) -> Result<(), DriverError>;

    /// Type text into the first node matching the query.
    async fn enter_text(&self, query: &ResolvedQuery, text: &str) -> Result<(), DriverError>;

    /// Clear the content of the first node matching the query.
    async fn clear_text(&self, query: &ResolvedQuery) -> Result<(), DriverError>;

    /// Hide the on-screen keyboard if it is showing.
    async fn dismiss_keyboard(&self) -> Result<(), DriverError>;

    /// Drag from one screen point to another.
    async fn drag(
        &self,
        from: Point,
        to: Point,
        strategy: GestureStrategy,
    ) -> Result<(), DriverError>;

    /// Scroll the current screen one step in a direction.
    async fn scroll(
        &self,
        direction: ScrollDirection,
        strategy: GestureStrategy,
    ) -> Result<(), DriverError>;

    /// Scroll in a direction until the node matching the query is visible.
    async fn scroll_to(
        &self,
        query: &ResolvedQuery,
        direction: ScrollDirection,
        strategy: GestureStrategy,
    ) -> Result<(), DriverError>;

    /// Get the on-screen rectangle of a matched node.
    ///
    /// The default implementation returns the rectangle the driver already
    /// attached to the element. Backends that report elements without frames
    /// should override this with a dedicated query.
    async fn viewport_rect(&self, element: &Element) -> Result<ViewportRect, DriverError> {
        element.rect.ok_or_else(|| {
            DriverError::CommandFailed("element has no viewport rectangle".to_string())
        })
    }

    /// Capture a screenshot and hand it to the reporting channel under `title`.
    async fn screenshot(&self, title: &str) -> Result<Artifact, DriverError>;

    /// Run a script inside the web surface's context.
    ///
    /// Returns one string per web surface the script ran in.
    async fn execute_script(&self, script: &str) -> Result<Vec<String>, DriverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_error_display() {
        let err = DriverError::CommandFailed("tap failed".to_string());
        assert!(err.to_string().contains("tap failed"));

        let err = DriverError::NotConnected;
        assert!(err.to_string().contains("Not connected"));

        let err = DriverError::ScriptFailed("ReferenceError: foo".to_string());
        assert!(err.to_string().contains("ReferenceError"));

        let err = DriverError::JsonParse("unexpected token".to_string());
        assert!(err.to_string().contains("unexpected token"));
    }

    #[test]
    fn test_serde_error_converts_to_json_parse() {
        let err = serde_json::from_str::<Element>("[").unwrap_err();
        let err: DriverError = err.into();
        assert!(matches!(err, DriverError::JsonParse(_)));
    }
}
