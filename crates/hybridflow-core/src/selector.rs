//! Locator classification.
//!
//! A locator is an opaque string handed in by the test author. The only
//! decision made here is which matching mode the driver should be asked for:
//! XPath when the locator starts with `/`, a structural (CSS-like) query
//! otherwise. Malformed expressions are left for the driver to reject.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::driver::{AutomationDriver, DriverError};
use crate::element::Element;

/// The matching mode a locator resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorKind {
    XPath,
    Structural,
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorKind::XPath => write!(f, "xpath"),
            SelectorKind::Structural => write!(f, "css"),
        }
    }
}

/// Classifies a locator. Total: every string, including `""`, has a kind.
pub fn classify(locator: &str) -> SelectorKind {
    if locator.starts_with('/') {
        SelectorKind::XPath
    } else {
        SelectorKind::Structural
    }
}

/// A locator paired with its classified mode.
///
/// Built at the start of an operation and dropped at its end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuery {
    locator: String,
    kind: SelectorKind,
}

impl ResolvedQuery {
    pub fn new(locator: impl Into<String>) -> Self {
        let locator = locator.into();
        let kind = classify(&locator);
        Self { locator, kind }
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn kind(&self) -> SelectorKind {
        self.kind
    }

    pub fn is_xpath(&self) -> bool {
        self.kind == SelectorKind::XPath
    }

    /// Runs this query against the driver.
    ///
    /// With `include_hidden` the driver's query-all mode is used, which also
    /// returns nodes that are attached but not currently visible.
    pub async fn fetch(
        &self,
        driver: &dyn AutomationDriver,
        include_hidden: bool,
    ) -> Result<Vec<Element>, DriverError> {
        if include_hidden {
            return driver.query_all(self).await;
        }
        match self.kind {
            SelectorKind::XPath => driver.query_xpath(self).await,
            SelectorKind::Structural => driver.query_structural(self).await,
        }
    }
}

impl fmt::Display for ResolvedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:'{}'", self.kind, self.locator)
    }
}
