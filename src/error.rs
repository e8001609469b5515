//! # Error Taxonomy
//!
//! Every domain error belongs to one of four classes. The class tells the caller what
//! to do with it: show a message, offer a retry, re-read and try again, or report a
//! broken invariant.

/// How a failure should be handled by whoever triggered the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad input or a precondition not met. Nothing was written.
    Validation,
    /// A collection could not be reached or its reply was lost.
    Transport,
    /// The caller acted on a stale read. Re-read and decide again.
    Conflict,
    /// Data that should never exist together (e.g. billing a table with no session).
    InconsistentState,
}

/// Maps an error onto its [`ErrorClass`].
pub trait Classify {
    fn class(&self) -> ErrorClass;

    /// Whether repeating the same call unchanged can succeed.
    fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::Transport
    }
}
