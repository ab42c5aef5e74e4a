//! Success or failure with a message, as a plain value.
//!
//! For operations whose only failure detail is human-readable text.
//! Construct with [`Outcome::ok`] or [`Outcome::fail`]; two outcomes are
//! equal when their messages are (successes all compare equal).

use thiserror::Error;

/// The failure half of an [`Outcome`].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{message}")]
pub struct Failure {
    message: String,
}

impl Failure {
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result-of-an-operation value carrying an error message on failure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Outcome {
    failure: Option<Failure>,
}

impl Outcome {
    /// A successful outcome.
    pub fn ok() -> Self {
        Self { failure: None }
    }

    /// A failed outcome. An empty message is replaced with
    /// `"Unknown Error"` so failures are never silent.
    pub fn fail(message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = "Unknown Error".to_string();
        }
        Self {
            failure: Some(Failure { message }),
        }
    }

    pub fn was_ok(&self) -> bool {
        self.failure.is_none()
    }

    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }

    /// The failure message, or an empty string for a success.
    pub fn error_message(&self) -> &str {
        self.failure.as_ref().map_or("", |f| &f.message)
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }
}
