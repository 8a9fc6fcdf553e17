//! Platform variants of the automation backend.
//!
//! Android and iOS drivers speak slightly different query languages for
//! reaching into an embedded web surface. A backend picks its [`Platform`]
//! once, up front, and uses [`Platform::render_query`] to build its native
//! query strings:
//!
//! ```
//! use hybridflow_core::platform::Platform;
//! use hybridflow_core::selector::ResolvedQuery;
//!
//! let query = ResolvedQuery::new("#login");
//! assert_eq!(Platform::Android.render_query(&query, false), "webView css:'#login'");
//! assert_eq!(Platform::Ios.render_query(&query, true), "all WKWebView css:'#login'");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gesture::GestureStrategy;
use crate::selector::{ResolvedQuery, SelectorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[default]
    Android,
    Ios,
}

impl Platform {
    /// The class name that identifies the embedded web surface.
    pub fn web_surface_class(&self) -> &'static str {
        match self {
            Platform::Android => "webView",
            Platform::Ios => "WKWebView",
        }
    }

    /// Query string selecting the web surface itself.
    pub fn web_surface_query(&self) -> String {
        self.web_surface_class().to_string()
    }

    /// Query string selecting nodes inside the web surface.
    ///
    /// `include_hidden` prefixes the query with `all`, which asks the driver
    /// for nodes that are attached but not currently visible.
    pub fn render_query(&self, query: &ResolvedQuery, include_hidden: bool) -> String {
        let mode = match query.kind() {
            SelectorKind::XPath => "xpath",
            SelectorKind::Structural => "css",
        };
        let prefix = if include_hidden { "all " } else { "" };
        format!(
            "{}{} {}:'{}'",
            prefix,
            self.web_surface_class(),
            mode,
            escape_quotes(query.locator())
        )
    }

    /// Gesture strategy used when the configuration does not name one.
    pub fn default_gesture_strategy(&self) -> GestureStrategy {
        match self {
            Platform::Android => GestureStrategy::CoordinateDrag,
            Platform::Ios => GestureStrategy::NativeScroll,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => write!(f, "android"),
            Platform::Ios => write!(f, "ios"),
        }
    }
}

/// Escapes single quotes so the locator survives inside `'...'`.
fn escape_quotes(locator: &str) -> String {
    locator.replace('\'', "\\'")
}
