use thiserror::Error;

use crate::driver::DriverError;
use crate::wait::WaitCondition;

/// Errors returned by every operation in this crate.
///
/// [`FlowError::Timeout`] is the only failure originated here. Everything
/// else is a driver failure passed through untouched.
#[derive(Error, Debug)]
pub enum FlowError {
    /// A presence or absence condition was still unmet at the deadline.
    #[error("{} '{locator}' (after {elapsed_ms}ms)", .condition.diagnostic())]
    Timeout {
        condition: WaitCondition,
        locator: String,
        elapsed_ms: u64,
    },

    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl FlowError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FlowError::Timeout { .. })
    }
}
