//! # hybridflow-core
//!
//! Wait-aware interaction helpers for native and hybrid mobile app automation.
//!
//! Given a caller-owned [`AutomationDriver`](driver::AutomationDriver) that can
//! query, tap, type into and gesture on a running app, this crate provides the
//! higher-level operations tests are written in: wait until an element shows
//! up, enter text and get the keyboard out of the way, scroll a web view,
//! capture a screenshot as a named step.
//!
//! ## Modules
//!
//! - [`selector`] - Classifies locators as XPath or structural (CSS) queries
//! - [`wait`] - Polling presence/absence waits with a bounded deadline
//! - [`screenshot`] - Conditional screenshot capture
//! - [`gesture`] - Drag geometry over the web surface and driver-native scrolling
//! - [`flow`] - Compound operations built from the above
//! - [`driver`] - The capability trait implemented by driver backends
//! - [`platform`] - Android and iOS query rendering
//! - [`config`] - Timeouts, intervals and platform settings
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use hybridflow_core::config::FlowConfig;
//! use hybridflow_core::driver::AutomationDriver;
//! use hybridflow_core::flow::Flow;
//! use hybridflow_core::gesture::ScrollDirection;
//! use hybridflow_core::options::Options;
//!
//! async fn checkout(driver: Arc<dyn AutomationDriver>) -> Result<(), hybridflow_core::error::FlowError> {
//!     let flow = Flow::with_config(driver, FlowConfig::load());
//!     flow.wait_for_web_surface(&Options::new()).await?;
//!     flow.scroll_to("#pay", ScrollDirection::Down, &Options::new()).await?;
//!     flow.tap("#pay", &Options::new().screenshot_titled("Payment")).await?;
//!     flow.wait_for_no_element(".spinner", &Options::new()).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod driver;
pub mod element;
pub mod error;
pub mod flow;
pub mod gesture;
pub mod options;
pub mod platform;
pub mod screenshot;
pub mod selector;
pub mod wait;
