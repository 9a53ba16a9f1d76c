use thiserror::Error;

use crate::api::ApiError;

/// Why a form submission was aborted.
///
/// Every variant is terminal for the submission that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field was missing; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// Bad credentials, a missing token, or a server-reported auth failure.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Network failure or an unexpected response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The credential store could not be read or written.
    #[error("Token storage failed: {0}")]
    Storage(String),
}

impl From<ApiError> for FormError {
    fn from(err: ApiError) -> Self {
        FormError::Transport(err.to_string())
    }
}

impl FormError {
    pub fn is_validation(&self) -> bool {
        matches!(self, FormError::Validation(_))
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, FormError::Auth(_))
    }

    /// The message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            FormError::Validation(msg)
            | FormError::Auth(msg)
            | FormError::Transport(msg)
            | FormError::Storage(msg) => msg,
        }
    }
}
