//! Drag and scroll gestures over the embedded web surface.
//!
//! Ratio-based gestures compute their endpoints from the web surface's
//! [`ViewportRect`], queried fresh on every call since layout may change
//! between calls:
//!
//! - vertical scroll: `y = (rect.y + rect.height) * ratio`, `x = rect.center_x`
//! - horizontal swipe: `x = (rect.x + rect.width) * ratio`, `y = coord_y`
//!
//! Ratios are nominally in `[0, 1]` but are not validated. A drag from 0.66 to
//! 0.33 moves content upward, i.e. scrolls down.
//!
//! When no web surface is on screen these gestures do nothing and return
//! `Ok(None)`; they are often issued speculatively. Scrolling until a specific
//! node is visible is left to the driver's own [`scroll_to`](AutomationDriver::scroll_to),
//! since repeated blind drags cannot tell when the target has come into view.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::driver::AutomationDriver;
use crate::element::ViewportRect;
use crate::error::FlowError;
use crate::selector::ResolvedQuery;

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// The two endpoints of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragPath {
    pub from: Point,
    pub to: Point,
}

/// How the driver should perform a scroll or drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureStrategy {
    /// Synthesized touch drag between coordinates.
    CoordinateDrag,
    /// The platform's own scroll mechanism (scroll view / JS scrolling).
    NativeScroll,
}

/// Direction of a scroll, in terms of where the content moves into view from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScrollDirection::Up => "up",
            ScrollDirection::Down => "down",
            ScrollDirection::Left => "left",
            ScrollDirection::Right => "right",
        };
        f.write_str(name)
    }
}

/// Endpoints of a vertical drag down the center of `rect`.
pub fn vertical_path(rect: &ViewportRect, ratio_from_y: f64, ratio_to_y: f64) -> DragPath {
    let bottom = rect.bottom();
    DragPath {
        from: Point::new(rect.center_x, bottom * ratio_from_y),
        to: Point::new(rect.center_x, bottom * ratio_to_y),
    }
}

/// Endpoints of a horizontal drag across `rect` at a fixed `coord_y`.
pub fn horizontal_path(
    rect: &ViewportRect,
    coord_y: f64,
    ratio_from_x: f64,
    ratio_to_x: f64,
) -> DragPath {
    let right = rect.right();
    DragPath {
        from: Point::new(right * ratio_from_x, coord_y),
        to: Point::new(right * ratio_to_x, coord_y),
    }
}

/// Rectangle of the first web surface on screen, or `None` when there is none.
async fn web_surface_rect(
    driver: &dyn AutomationDriver,
) -> Result<Option<ViewportRect>, FlowError> {
    let surfaces = driver.query_web_surface().await?;
    match surfaces.first() {
        Some(surface) => Ok(Some(driver.viewport_rect(surface).await?)),
        None => Ok(None),
    }
}

/// Drags vertically over the web surface between two height ratios.
///
/// Returns the drag that was issued, or `None` if there was no web surface.
pub async fn scroll_web_surface(
    driver: &dyn AutomationDriver,
    ratio_from_y: f64,
    ratio_to_y: f64,
    strategy: GestureStrategy,
) -> Result<Option<DragPath>, FlowError> {
    let Some(rect) = web_surface_rect(driver).await? else {
        debug!("no web surface, skipping scroll");
        return Ok(None);
    };
    let path = vertical_path(&rect, ratio_from_y, ratio_to_y);
    debug!(from = %path.from, to = %path.to, ?strategy, "scroll web surface");
    driver.drag(path.from, path.to, strategy).await?;
    Ok(Some(path))
}

/// Drags horizontally over the web surface at `coord_y` between two width ratios.
///
/// Returns the drag that was issued, or `None` if there was no web surface.
pub async fn swipe_web_surface(
    driver: &dyn AutomationDriver,
    coord_y: f64,
    ratio_from_x: f64,
    ratio_to_x: f64,
    strategy: GestureStrategy,
) -> Result<Option<DragPath>, FlowError> {
    let Some(rect) = web_surface_rect(driver).await? else {
        debug!("no web surface, skipping swipe");
        return Ok(None);
    };
    let path = horizontal_path(&rect, coord_y, ratio_from_x, ratio_to_x);
    debug!(from = %path.from, to = %path.to, ?strategy, "swipe web surface");
    driver.drag(path.from, path.to, strategy).await?;
    Ok(Some(path))
}

/// One directional scroll step of the current screen.
pub async fn scroll(
    driver: &dyn AutomationDriver,
    direction: ScrollDirection,
    strategy: GestureStrategy,
) -> Result<(), FlowError> {
    driver.scroll(direction, strategy).await?;
    Ok(())
}

/// Scrolls in `direction` until `locator` is visible, using the driver's own
/// visibility-aware scrolling.
pub async fn scroll_to(
    driver: &dyn AutomationDriver,
    locator: &str,
    direction: ScrollDirection,
    strategy: GestureStrategy,
) -> Result<(), FlowError> {
    let query = ResolvedQuery::new(locator);
    driver.scroll_to(&query, direction, strategy).await?;
    Ok(())
}
