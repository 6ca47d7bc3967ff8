//! Error types for twiml

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A composition routine gave up; the cause is the error's source
    Composition,
    /// A dynamically typed value has no attribute representation
    InvalidAttributeValue { value: String },
    /// A nested body was supplied to a verb that cannot hold children
    NotAContainer { verb: String },
    /// No verb is registered under this name
    UnknownVerb { name: String },
    /// `close` was called with no open scope
    UnbalancedClose,
    /// A scope opened with `open` was never closed
    UnclosedScope { tag: String },
    /// More scopes were open below the root than the configured limit
    MaxDepthExceeded { max: usize },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Composition => write!(f, "composition failed"),
            Self::InvalidAttributeValue { value } => {
                write!(f, "invalid attribute value: {value}")
            }
            Self::NotAContainer { verb } => write!(f, "verb cannot contain children: {verb}"),
            Self::UnknownVerb { name } => write!(f, "unknown verb: {name}"),
            Self::UnbalancedClose => write!(f, "close without a matching open"),
            Self::UnclosedScope { tag } => write!(f, "scope left open: {tag}"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
        }
    }
}

/// Main error type for twiml
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            source: None,
        }
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Wraps a caller's own error so it can leave a composition routine.
    ///
    /// ```
    /// use twiml::{build, Error, ErrorKind};
    ///
    /// let result = build(|b| {
    ///     let digits: u8 = "x".parse().map_err(Error::composition)?;
    ///     b.text(digits);
    ///     Ok(())
    /// });
    /// assert!(matches!(result.map_err(|e| e.kind().clone()), Err(ErrorKind::Composition)));
    /// ```
    pub fn composition<E>(source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::new(ErrorKind::Composition).with_source(source)
    }

    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Result type alias for twiml
pub type Result<T> = std::result::Result<T, Error>;
