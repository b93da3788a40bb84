use std::borrow::Cow;
use thiserror::Error;

/// Errors surfaced by [`Manager`](crate::Manager) operations.
///
/// Provider faults never appear here: they are contained at the resolution
/// boundary, logged, and excluded from aggregation. The manager itself only
/// fails when its task queue is no longer able to accept or complete work.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// The sequential task queue has shut down and can no longer accept work.
    #[error("task queue closed: {message}")]
    QueueClosed { message: Cow<'static, str> },
}

/// Errors a [`Provider`](crate::Provider) may report while answering an
/// entitlement or offer query.
///
/// These are isolated per provider: a failing provider is skipped for the
/// current resolution pass and never aborts evaluation of the others.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider's backing store or service could not be reached.
    #[error("provider backend unavailable: {message}")]
    Unavailable { message: Cow<'static, str> },

    /// Internal fallback for unexpected provider faults.
    #[error("internal provider error: {message}")]
    Internal { message: Cow<'static, str> },
}

impl From<&'static str> for ProviderError {
    fn from(s: &'static str) -> Self {
        Self::Internal { message: Cow::Borrowed(s) }
    }
}

impl From<String> for ProviderError {
    fn from(s: String) -> Self {
        Self::Internal { message: Cow::Owned(s) }
    }
}
