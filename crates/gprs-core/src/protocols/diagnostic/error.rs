use thiserror::Error;

use crate::protocols::common::FieldError;

/// Errors returned by command packet decoding.
///
/// # Examples
/// ```
/// use gprs_core::protocols::diagnostic::DiagnosticError;
///
/// let err = DiagnosticError::UnsupportedVersion { version: 9 };
/// assert!(err.to_string().contains("unsupported diagnostic version"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("unsupported diagnostic version: {version}")]
    UnsupportedVersion { version: u8 },
}
