//! Shared test helpers for hybridflow-core integration tests.
//!
//! [`FakeDriver`] is a scriptable in-memory [`AutomationDriver`] that records
//! every call it receives, so tests can assert on exact call sequences.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use hybridflow_core::config::FlowConfig;
use hybridflow_core::driver::{AutomationDriver, DriverError};
use hybridflow_core::element::{Element, ViewportRect};
use hybridflow_core::flow::Flow;
use hybridflow_core::gesture::{GestureStrategy, Point, ScrollDirection};
use hybridflow_core::platform::Platform;
use hybridflow_core::screenshot::Artifact;
use hybridflow_core::selector::ResolvedQuery;

/// One recorded driver call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    QueryStructural(String),
    QueryXPath(String),
    QueryAll(String),
    QueryWebSurface,
    Tap(String),
    EnterText(String, String),
    ClearText(String),
    DismissKeyboard,
    Drag {
        from: Point,
        to: Point,
        strategy: GestureStrategy,
    },
    Scroll(ScrollDirection, GestureStrategy),
    ScrollTo(String, ScrollDirection, GestureStrategy),
    ViewportRect,
    Screenshot(String),
    ExecuteScript(String),
}

impl Call {
    pub fn is_element_query(&self) -> bool {
        matches!(
            self,
            Call::QueryStructural(_) | Call::QueryXPath(_) | Call::QueryAll(_)
        )
    }
}

// ---------------------------------------------------------------------------
// FakeDriver
// ---------------------------------------------------------------------------

/// Scriptable driver.
///
/// Element queries return as many matches as the next scripted count; once
/// the script runs out the last count repeats. Without a script every query
/// matches once.
///
/// Queries are also rendered in the configured platform's query language,
/// the way a real backend would send them over the wire.
pub struct FakeDriver {
    platform: Platform,
    calls: Mutex<Vec<Call>>,
    rendered: Mutex<Vec<String>>,
    counts: Mutex<(VecDeque<usize>, usize)>,
    surface: Option<ViewportRect>,
    script_results: Vec<String>,
    query_error: Option<String>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::for_platform(Platform::Android)
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            calls: Mutex::new(Vec::new()),
            rendered: Mutex::new(Vec::new()),
            counts: Mutex::new((VecDeque::new(), 1)),
            surface: None,
            script_results: vec!["ok".to_string()],
            query_error: None,
        }
    }

    /// Scripts the match counts returned by successive element queries.
    pub fn with_match_counts(self, counts: Vec<usize>) -> Self {
        let last = counts.last().copied().unwrap_or(0);
        *self.counts.lock().unwrap() = (counts.into_iter().collect(), last);
        self
    }

    /// Puts a web surface with this rectangle on screen.
    pub fn with_surface(mut self, rect: ViewportRect) -> Self {
        self.surface = Some(rect);
        self
    }

    pub fn with_script_results(mut self, results: Vec<&str>) -> Self {
        self.script_results = results.into_iter().map(String::from).collect();
        self
    }

    /// Makes every element query fail with `message`.
    pub fn failing_queries(mut self, message: &str) -> Self {
        self.query_error = Some(message.to_string());
        self
    }

    /// Platform query strings sent so far, in order.
    pub fn rendered_queries(&self) -> Vec<String> {
        self.rendered.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded calls with element queries filtered out.
    pub fn actions(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !c.is_element_query())
            .collect()
    }

    pub fn element_query_count(&self) -> usize {
        self.calls().iter().filter(|c| c.is_element_query()).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn render(&self, query: &ResolvedQuery, include_hidden: bool) {
        let rendered = self.platform.render_query(query, include_hidden);
        self.rendered.lock().unwrap().push(rendered);
    }

    fn elements(&self) -> Result<Vec<Element>, DriverError> {
        if let Some(message) = &self.query_error {
            return Err(DriverError::CommandFailed(message.clone()));
        }
        let mut guard = self.counts.lock().unwrap();
        let (script, last) = &mut *guard;
        let count = match script.pop_front() {
            Some(n) => {
                *last = n;
                n
            }
            None => *last,
        };
        Ok((0..count)
            .map(|i| Element {
                id: Some(format!("match-{i}")),
                visible: Some(true),
                ..Element::default()
            })
            .collect())
    }
}

#[async_trait]
impl AutomationDriver for FakeDriver {
    async fn query_structural(&self, query: &ResolvedQuery) -> Result<Vec<Element>, DriverError> {
        self.record(Call::QueryStructural(query.locator().to_string()));
        self.render(query, false);
        self.elements()
    }

    async fn query_xpath(&self, query: &ResolvedQuery) -> Result<Vec<Element>, DriverError> {
        self.record(Call::QueryXPath(query.locator().to_string()));
        self.render(query, false);
        self.elements()
    }

    async fn query_all(&self, query: &ResolvedQuery) -> Result<Vec<Element>, DriverError> {
        self.record(Call::QueryAll(query.locator().to_string()));
        self.render(query, true);
        self.elements()
    }

    async fn query_web_surface(&self) -> Result<Vec<Element>, DriverError> {
        self.record(Call::QueryWebSurface);
        self.rendered
            .lock()
            .unwrap()
            .push(self.platform.web_surface_query());
        Ok(self
            .surface
            .map(|rect| Element {
                class: Some(self.platform.web_surface_class().to_string()),
                rect: Some(rect),
                visible: Some(true),
                ..Element::default()
            })
            .into_iter()
            .collect())
    }

    async fn tap(&self, query: &ResolvedQuery) -> Result<(), DriverError> {
        self.record(Call::Tap(query.locator().to_string()));
        Ok(())
    }

    async fn enter_text(&self, query: &ResolvedQuery, text: &str) -> Result<(), DriverError> {
        self.record(Call::EnterText(query.locator().to_string(), text.to_string()));
        Ok(())
    }

    async fn clear_text(&self, query: &ResolvedQuery) -> Result<(), DriverError> {
        self.record(Call::ClearText(query.locator().to_string()));
        Ok(())
    }

    async fn dismiss_keyboard(&self) -> Result<(), DriverError> {
        self.record(Call::DismissKeyboard);
        Ok(())
    }

    async fn drag(
        &self,
        from: Point,
        to: Point,
        strategy: GestureStrategy,
    ) -> Result<(), DriverError> {
        self.record(Call::Drag { from, to, strategy });
        Ok(())
    }

    async fn scroll(
        &self,
        direction: ScrollDirection,
        strategy: GestureStrategy,
    ) -> Result<(), DriverError> {
        self.record(Call::Scroll(direction, strategy));
        Ok(())
    }

    async fn scroll_to(
        &self,
        query: &ResolvedQuery,
        direction: ScrollDirection,
        strategy: GestureStrategy,
    ) -> Result<(), DriverError> {
        self.record(Call::ScrollTo(query.locator().to_string(), direction, strategy));
        Ok(())
    }

    async fn viewport_rect(&self, element: &Element) -> Result<ViewportRect, DriverError> {
        self.record(Call::ViewportRect);
        element
            .rect
            .ok_or_else(|| DriverError::CommandFailed("no rect".to_string()))
    }

    async fn screenshot(&self, title: &str) -> Result<Artifact, DriverError> {
        self.record(Call::Screenshot(title.to_string()));
        Ok(Artifact::new(
            title,
            format!("screenshots/{}.png", uuid::Uuid::new_v4()),
        ))
    }

    async fn execute_script(&self, script: &str) -> Result<Vec<String>, DriverError> {
        self.record(Call::ExecuteScript(script.to_string()));
        Ok(self.script_results.clone())
    }
}

// ---------------------------------------------------------------------------
// Flow helpers
// ---------------------------------------------------------------------------

/// Short timings so timeout paths finish quickly under a paused clock.
pub fn fast_config() -> FlowConfig {
    FlowConfig::default()
        .with_wait_timeout(std::time::Duration::from_secs(1))
        .with_poll_interval(std::time::Duration::from_millis(250))
}

/// Wraps a fake in a [`Flow`], keeping a handle for call inspection.
pub fn flow_with(driver: FakeDriver, config: FlowConfig) -> (Flow, Arc<FakeDriver>) {
    let driver = Arc::new(driver);
    let flow = Flow::with_config(driver.clone(), config);
    (flow, driver)
}

/// The rectangle used throughout the gesture tests.
pub fn sample_surface() -> ViewportRect {
    ViewportRect {
        x: 0.0,
        y: 100.0,
        width: 200.0,
        height: 300.0,
        center_x: 100.0,
        center_y: 250.0,
    }
}
