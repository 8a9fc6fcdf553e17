//! Element and geometry types returned by automation drivers.
//!
//! These types describe what a driver reports back from a query: a matched
//! node (native view or DOM node inside a web surface) and the rectangle it
//! occupies on screen. They are independent of any specific driver backend.

use serde::{Deserialize, Serialize};

/// A node matched by a driver query.
///
/// Drivers fill in whatever they know; every field is optional so that the
/// same type works for native views and for nodes inside a web surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// The native class or DOM tag name (e.g. `"android.webkit.WebView"`, `"INPUT"`).
    #[serde(default)]
    pub class: Option<String>,

    /// The resource id, accessibility id or DOM `id` attribute.
    #[serde(default)]
    pub id: Option<String>,

    /// The visible text or accessibility label.
    #[serde(default)]
    pub text: Option<String>,

    /// The node's rectangle in screen coordinates, when the driver reports one.
    #[serde(default)]
    pub rect: Option<ViewportRect>,

    /// Whether the driver considers the node visible.
    #[serde(default)]
    pub visible: Option<bool>,
}

/// The position and size of a surface or node in screen coordinates.
///
/// Origin is the top-left corner of the screen. Most drivers report the
/// center point alongside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl ViewportRect {
    /// Builds a rectangle from its frame, deriving the center point.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            center_x: x + width / 2.0,
            center_y: y + height / 2.0,
        }
    }

    /// The bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// The right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}
