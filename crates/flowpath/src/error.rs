// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::time::Duration;

use thiserror::Error;

/// A type-erased error returned by user-provided operations.
///
/// Anything that converts into this type can be returned from a retried or batched
/// operation: string messages, [`std::io::Error`], or any custom error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A specialized `Result` for retry and batch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Any error that may arise while retrying an operation or processing a batch.
///
/// Failures of user operations are normalized into this type before they are handed to
/// predicates, callbacks or callers. If an operation fails with a value that already is an
/// [`Error`] (for example, a nested [`timeout`][crate::timeout()]), its variant is
/// preserved; every other failure becomes [`Error::Operation`].
///
/// # Thread safety
///
/// This type is thread-safe.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The options or arguments supplied to an operation are invalid.
    ///
    /// Validation happens before any work is started.
    #[error("invalid argument '{name}': {message}")]
    InvalidArgument {
        /// The name of the offending argument.
        name: &'static str,
        /// Describes why the argument was rejected.
        message: Cow<'static, str>,
    },

    /// A single attempt did not complete within the configured timeout.
    #[error("Timeout of {}ms exceeded", .timeout.as_millis())]
    Timeout {
        /// The timeout that was exceeded.
        timeout: Duration,
    },

    /// The retry budget was used up without a successful attempt.
    ///
    /// `attempts` is the number of retries that were made, so the operation was invoked
    /// `attempts + 1` times.
    #[error("all retry attempts failed: {source} after {attempts} attempts")]
    RetryExhausted {
        /// The number of retries performed after the initial attempt.
        attempts: u32,
        /// The failure of the final attempt.
        #[source]
        source: Box<Self>,
    },

    /// The operation itself failed.
    #[error(transparent)]
    Operation(BoxError),
}

impl Error {
    /// Normalizes an arbitrary operation failure.
    ///
    /// Errors that already are an [`Error`] keep their variant, everything else is
    /// wrapped in [`Error::Operation`].
    ///
    /// # Examples
    ///
    /// ```
    /// use flowpath::Error;
    ///
    /// let error = Error::from_operation("connection reset");
    /// assert_eq!(error.to_string(), "connection reset");
    /// assert!(!error.is_timeout());
    /// ```
    pub fn from_operation(error: impl Into<BoxError>) -> Self {
        match error.into().downcast::<Self>() {
            Ok(error) => *error,
            Err(other) => Self::Operation(other),
        }
    }

    pub(crate) fn invalid_argument(name: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidArgument {
            name,
            message: message.into(),
        }
    }

    pub(crate) fn retry_exhausted(attempts: u32, last_error: Self) -> Self {
        Self::RetryExhausted {
            attempts,
            source: Box::new(last_error),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if the retry budget was exhausted.
    #[must_use]
    pub fn is_retry_exhausted(&self) -> bool {
        matches!(self, Self::RetryExhausted { .. })
    }

    /// Returns `true` if the error was raised by argument validation.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns the number of retries made, if this is a [`Error::RetryExhausted`] error.
    #[must_use]
    pub fn attempts(&self) -> Option<u32> {
        match self {
            Self::RetryExhausted { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }

    /// Returns the failure of the final attempt, if this is a [`Error::RetryExhausted`] error.
    #[must_use]
    pub fn last_error(&self) -> Option<&Self> {
        match self {
            Self::RetryExhausted { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns the innermost error, looking through any retry wrappers.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowpath::Error;
    ///
    /// let error = Error::from_operation("disk full");
    /// assert_eq!(error.root_cause().to_string(), "disk full");
    /// ```
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::RetryExhausted { source, .. } = current {
            current = source;
        }
        current
    }
}
