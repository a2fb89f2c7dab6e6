use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, FieldError>;

/// Errors raised by the particle field engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FieldError {
    /// Rejected configuration, bounds or count. Values are never clamped.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A renderer failed to draw a single frame.
    #[error("render failed: {0}")]
    Render(String),
}

impl FieldError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
