use marquee_core::error::CoreError;

/// Errors talking to a running session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The update was rejected before reaching the query store.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// The session task has stopped.
    #[error("Session is no longer running")]
    Closed,

    /// The view did not settle in time.
    #[error("Timed out waiting for results")]
    Timeout,
}
