#![forbid(unsafe_code)]

//! Error types for menu construction and host failures.

/// Errors reported while building or initializing a [`LevelMenu`](crate::LevelMenu).
#[derive(Debug, Clone, PartialEq)]
pub enum MenuError {
    /// A required configuration option (`el` or `trigger`) was not supplied.
    MissingOption(&'static str),
    /// `level_spacing` was negative or not a finite number.
    InvalidLevelSpacing(f64),
    /// The wrapper selector matched no element in the document.
    WrapperNotFound(String),
    /// The host environment reported a failure.
    Host(String),
}

impl core::fmt::Display for MenuError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingOption(name) => write!(f, "missing required option: {name}"),
            Self::InvalidLevelSpacing(px) => write!(f, "invalid level spacing: {px}"),
            Self::WrapperNotFound(selector) => {
                write!(f, "wrapper element not found for selector {selector:?}")
            }
            Self::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for MenuError {}
