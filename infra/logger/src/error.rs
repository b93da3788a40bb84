use std::borrow::Cow;
use thiserror::Error;

/// Errors that can occur during logger initialization.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// Failure when configuring the rolling file appender (e.g. invalid path).
    #[error("rolling file appender error: {source}")]
    Appender {
        #[from]
        source: tracing_appender::rolling::InitError,
    },

    /// A global tracing subscriber has already been initialized in this
    /// process.
    #[error("tracing subscriber error: {source}")]
    Subscriber {
        #[from]
        source: tracing_subscriber::util::TryInitError,
    },

    /// Invalid configuration supplied to the builder.
    #[error("invalid logger configuration: {message}")]
    InvalidConfiguration { message: Cow<'static, str> },

    /// Internal fallback for unexpected failures.
    #[error("internal logger error: {message}")]
    Internal { message: Cow<'static, str> },
}
