// Validation errors for request parameters

use thiserror::Error;

/// Errors raised while validating caller-supplied values.
///
/// The HTTP layer treats these permissively: an invalid window falls back to
/// `Window::All` instead of rejecting the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unknown window '{0}', expected one of: all, 5min, 1hour")]
    UnknownWindow(String),
}
