//! Compound interactions against a running app.
//!
//! [`Flow`] holds the caller's [`AutomationDriver`] and a [`FlowConfig`], and
//! sequences the selector, wait, gesture and screenshot building blocks into
//! the operations a test author actually writes: tap this, type into that,
//! scroll the web view, flash a node so a reviewer can spot it in a recording.
//!
//! Every operation that acts on a locator first waits for it to be present,
//! so the action always targets a node that matched at that moment.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use hybridflow_core::driver::AutomationDriver;
//! use hybridflow_core::flow::Flow;
//! use hybridflow_core::options::Options;
//!
//! async fn login(driver: Arc<dyn AutomationDriver>) -> Result<(), hybridflow_core::error::FlowError> {
//!     let flow = Flow::new(driver);
//!     flow.wait_for_web_surface(&Options::new()).await?;
//!     flow.enter_text("#email", "user@example.com", &Options::new().clear()).await?;
//!     flow.tap("//button[@type='submit']", &Options::new().screenshot()).await?;
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, info_span, Instrument};

use crate::config::FlowConfig;
use crate::driver::AutomationDriver;
use crate::error::FlowError;
use crate::gesture::{self, DragPath, ScrollDirection};
use crate::options::Options;
use crate::screenshot::{self, Artifact};
use crate::selector::{ResolvedQuery, SelectorKind};
use crate::wait::{self, WEB_SURFACE_LABEL};

/// Script returning the web surface's browser identification string.
pub const USER_AGENT_SCRIPT: &str = "return navigator.userAgent;";

/// Visibility values applied by [`Flow::flash`], in order. The empty value
/// removes the inline style, restoring the node's own visibility.
pub const FLASH_SEQUENCE: [&str; 5] = ["hidden", "visible", "hidden", "visible", ""];

const SCROLL_DOWN_RATIOS: (f64, f64) = (0.66, 0.33);
const SCROLL_UP_RATIOS: (f64, f64) = (0.33, 0.66);
const SWIPE_LEFT_RATIOS: (f64, f64) = (0.8, 0.2);
const SWIPE_RIGHT_RATIOS: (f64, f64) = (0.2, 0.8);

/// Runs compound operations against a shared driver.
///
/// `Flow` keeps no state between calls beyond the driver handle and its
/// configuration, so one instance can serve a whole test.
pub struct Flow {
    driver: Arc<dyn AutomationDriver>,
    config: FlowConfig,
}

impl Flow {
    /// Creates a flow with [`FlowConfig::default`].
    pub fn new(driver: Arc<dyn AutomationDriver>) -> Self {
        Self::with_config(driver, FlowConfig::default())
    }

    pub fn with_config(driver: Arc<dyn AutomationDriver>, config: FlowConfig) -> Self {
        Self { driver, config }
    }

    /// Returns a reference to the underlying driver.
    pub fn driver(&self) -> &Arc<dyn AutomationDriver> {
        &self.driver
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: FlowConfig) {
        self.config = config;
    }

    /// Waits until `locator` has a visible match.
    pub async fn wait_for_element(
        &self,
        locator: &str,
        options: &Options,
    ) -> Result<Option<Artifact>, FlowError> {
        self.run("wait_for_element", locator, async {
            self.presence(locator, false).await?;
            self.capture(options, format!("Waited for '{}'", locator)).await
        })
        .await
    }

    /// Waits until `locator` has any match, visible or not.
    pub async fn wait_for_hidden_element(
        &self,
        locator: &str,
        options: &Options,
    ) -> Result<Option<Artifact>, FlowError> {
        self.run("wait_for_hidden_element", locator, async {
            self.presence(locator, true).await?;
            self.capture(options, format!("Waited for hidden '{}'", locator)).await
        })
        .await
    }

    /// Waits until `locator` no longer has a visible match.
    pub async fn wait_for_no_element(
        &self,
        locator: &str,
        options: &Options,
    ) -> Result<Option<Artifact>, FlowError> {
        self.run("wait_for_no_element", locator, async {
            wait::wait_for_absence(self.driver.as_ref(), locator, &self.config.poll_policy())
                .await?;
            self.capture(options, format!("Waited for no '{}'", locator)).await
        })
        .await
    }

    /// Waits until the embedded web surface is on screen.
    pub async fn wait_for_web_surface(
        &self,
        options: &Options,
    ) -> Result<Option<Artifact>, FlowError> {
        self.run("wait_for_web_surface", WEB_SURFACE_LABEL, async {
            wait::wait_for_web_surface(self.driver.as_ref(), &self.config.poll_policy()).await?;
            self.capture(options, "Web view ready".to_string()).await
        })
        .await
    }

    /// Waits for `locator`, then taps its first match.
    ///
    /// With several matches the driver's result order decides which one is
    /// tapped. The screenshot, when requested, is taken before the tap.
    pub async fn tap(
        &self,
        locator: &str,
        options: &Options,
    ) -> Result<Option<Artifact>, FlowError> {
        self.run("tap", locator, async {
            self.presence(locator, false).await?;
            let artifact = self.capture(options, format!("Tap '{}'", locator)).await?;
            self.driver.tap(&ResolvedQuery::new(locator)).await?;
            Ok(artifact)
        })
        .await
    }

    /// Enters `text` into `locator`.
    ///
    /// Sequence: wait, clear (if `clear`), dismiss keyboard, enter text,
    /// dismiss keyboard, wait again (if `wait`), screenshot (if `screenshot`).
    /// Entering text can bring the keyboard back, hence the second dismissal.
    pub async fn enter_text(
        &self,
        locator: &str,
        text: &str,
        options: &Options,
    ) -> Result<Option<Artifact>, FlowError> {
        self.run("enter_text", locator, async {
            let query = ResolvedQuery::new(locator);
            self.presence(locator, false).await?;
            if options.clear {
                self.driver.clear_text(&query).await?;
            }
            self.driver.dismiss_keyboard().await?;
            self.driver.enter_text(&query, text).await?;
            self.driver.dismiss_keyboard().await?;
            if options.wait {
                self.presence(locator, false).await?;
            }
            self.capture(options, format!("Entered text into '{}'", locator)).await
        })
        .await
    }

    /// Captures a screenshot step unconditionally.
    pub async fn screenshot(&self, title: Option<&str>) -> Result<Artifact, FlowError> {
        let title = title.unwrap_or(screenshot::DEFAULT_TITLE);
        self.run("screenshot", title, async {
            self.driver.screenshot(title).await.map_err(FlowError::from)
        })
        .await
    }

    /// Drags the web surface vertically between two height ratios.
    ///
    /// Does nothing when there is no web surface; returns the drag issued.
    pub async fn scroll_web_surface(
        &self,
        ratio_from_y: f64,
        ratio_to_y: f64,
        options: &Options,
    ) -> Result<Option<DragPath>, FlowError> {
        self.run("scroll_web_surface", WEB_SURFACE_LABEL, async {
            let path = gesture::scroll_web_surface(
                self.driver.as_ref(),
                ratio_from_y,
                ratio_to_y,
                self.config.gesture_strategy(),
            )
            .await?;
            if path.is_some() {
                self.capture(options, "Scrolled web view".to_string()).await?;
            }
            Ok(path)
        })
        .await
    }

    /// Drags the web surface horizontally at `coord_y` between two width ratios.
    ///
    /// Does nothing when there is no web surface; returns the drag issued.
    pub async fn swipe_web_surface(
        &self,
        coord_y: f64,
        ratio_from_x: f64,
        ratio_to_x: f64,
        options: &Options,
    ) -> Result<Option<DragPath>, FlowError> {
        self.run("swipe_web_surface", WEB_SURFACE_LABEL, async {
            let path = gesture::swipe_web_surface(
                self.driver.as_ref(),
                coord_y,
                ratio_from_x,
                ratio_to_x,
                self.config.gesture_strategy(),
            )
            .await?;
            if path.is_some() {
                self.capture(options, "Swiped web view".to_string()).await?;
            }
            Ok(path)
        })
        .await
    }

    pub async fn scroll_down(&self, options: &Options) -> Result<Option<DragPath>, FlowError> {
        let (from, to) = SCROLL_DOWN_RATIOS;
        self.scroll_web_surface(from, to, options).await
    }

    pub async fn scroll_up(&self, options: &Options) -> Result<Option<DragPath>, FlowError> {
        let (from, to) = SCROLL_UP_RATIOS;
        self.scroll_web_surface(from, to, options).await
    }

    pub async fn swipe_left(
        &self,
        coord_y: f64,
        options: &Options,
    ) -> Result<Option<DragPath>, FlowError> {
        let (from, to) = SWIPE_LEFT_RATIOS;
        self.swipe_web_surface(coord_y, from, to, options).await
    }

    pub async fn swipe_right(
        &self,
        coord_y: f64,
        options: &Options,
    ) -> Result<Option<DragPath>, FlowError> {
        let (from, to) = SWIPE_RIGHT_RATIOS;
        self.swipe_web_surface(coord_y, from, to, options).await
    }

    /// One driver-native scroll step in `direction`.
    pub async fn scroll(
        &self,
        direction: ScrollDirection,
        options: &Options,
    ) -> Result<Option<Artifact>, FlowError> {
        self.run("scroll", &direction.to_string(), async {
            gesture::scroll(self.driver.as_ref(), direction, self.config.gesture_strategy())
                .await?;
            self.capture(options, format!("Scrolled {}", direction)).await
        })
        .await
    }

    /// Scrolls in `direction` until `locator` is visible.
    ///
    /// The target only has to be attached beforehand, so the presence wait
    /// includes hidden nodes.
    pub async fn scroll_to(
        &self,
        locator: &str,
        direction: ScrollDirection,
        options: &Options,
    ) -> Result<Option<Artifact>, FlowError> {
        self.run("scroll_to", locator, async {
            self.presence(locator, true).await?;
            gesture::scroll_to(
                self.driver.as_ref(),
                locator,
                direction,
                self.config.gesture_strategy(),
            )
            .await?;
            self.capture(options, format!("Scrolled to '{}'", locator)).await
        })
        .await
    }

    /// Runs `script` in the web surface and joins the results with `\n`.
    ///
    /// Returns `None` when there is no web surface to run in.
    pub async fn execute_script(&self, script: &str) -> Result<Option<String>, FlowError> {
        self.run("execute_script", WEB_SURFACE_LABEL, async {
            if self.driver.query_web_surface().await?.is_empty() {
                debug!("no web surface, script not run");
                return Ok(None);
            }
            let results = self.driver.execute_script(script).await?;
            Ok(Some(results.join("\n")))
        })
        .await
    }

    /// The web surface's `navigator.userAgent`.
    pub async fn browser_user_agent(&self) -> Result<Option<String>, FlowError> {
        self.execute_script(USER_AGENT_SCRIPT).await
    }

    /// Blinks the DOM node at `locator` so it stands out in a recording.
    ///
    /// Applies [`FLASH_SEQUENCE`] to the node's `style.visibility`, pausing
    /// the configured flash interval between steps.
    pub async fn flash(
        &self,
        locator: &str,
        options: &Options,
    ) -> Result<Option<Artifact>, FlowError> {
        self.run("flash", locator, async {
            self.presence(locator, false).await?;
            let query = ResolvedQuery::new(locator);
            for (step, visibility) in FLASH_SEQUENCE.iter().enumerate() {
                if step > 0 {
                    tokio::time::sleep(self.config.flash_interval()).await;
                }
                let outcome = self
                    .execute_script(&visibility_script(&query, visibility))
                    .await?;
                debug!(step, visibility, outcome = ?outcome, "flash step");
            }
            self.capture(options, format!("Flashed '{}'", locator)).await
        })
        .await
    }

    async fn presence(&self, locator: &str, include_hidden: bool) -> Result<(), FlowError> {
        wait::wait_for_presence(
            self.driver.as_ref(),
            locator,
            &self.config.poll_policy(),
            include_hidden,
        )
        .await
    }

    async fn capture(
        &self,
        options: &Options,
        fallback: String,
    ) -> Result<Option<Artifact>, FlowError> {
        options
            .screenshot_directive()
            .capture(self.driver.as_ref(), &fallback)
            .await
    }

    async fn run<T, F>(&self, op: &'static str, locator: &str, fut: F) -> Result<T, FlowError>
    where
        F: Future<Output = Result<T, FlowError>>,
    {
        let span = info_span!("flow", op, locator);
        async {
            let start = Instant::now();
            let result = fut.await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            debug!(elapsed_ms, success = result.is_ok(), "operation complete");
            result
        }
        .instrument(span)
        .await
    }
}

/// Script setting `style.visibility` on the first node matching `query`.
fn visibility_script(query: &ResolvedQuery, visibility: &str) -> String {
    // serde_json string encoding doubles as JS string-literal escaping
    let locator = serde_json::Value::from(query.locator()).to_string();
    let lookup = match query.kind() {
        SelectorKind::XPath => format!(
            "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
            locator
        ),
        SelectorKind::Structural => format!("document.querySelector({})", locator),
    };
    format!(
        "var node = {}; if (node) {{ node.style.visibility = '{}'; }} return node ? 'ok' : 'missing';",
        lookup, visibility
    )
}
