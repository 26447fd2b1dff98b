//! Error types for the navigation engine.
//!
//! # Design
//! - One enum covers every failure the engine can surface; callers map it to
//!   the error region through [`UiError::user_message`].
//! - Carry the server-supplied message verbatim for HTTP failures so the
//!   error region shows exactly what the API said.
//! - Keep variants DOM-free so tests can assert on them natively.

use thiserror::Error;

/// Result alias for engine operations.
pub type UiResult<T> = Result<T, UiError>;

/// Message shown when a non-2xx body carries no usable message.
pub const GENERIC_HTTP_MESSAGE: &str = "An error occurred";

/// Errors raised by the session, HTTP, routing and rendering layers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UiError {
    /// An authenticated request was requested without a stored token.
    #[error("no token found for authorization")]
    AuthMissing,
    /// The identity provider still demands interaction after the retry.
    #[error("identity provider requires interaction")]
    InteractionRequired,
    /// The identity provider failed for any other reason.
    #[error("identity provider failure")]
    Provider {
        /// Provider-supplied description.
        message: String,
    },
    /// The server answered with a non-2xx status.
    #[error("http request failed")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Best-effort message extracted from the response body.
        message: String,
    },
    /// The request never produced a response.
    #[error("transport failure")]
    Transport {
        /// Transport-level description.
        message: String,
    },
    /// A 2xx body could not be decoded into the expected shape.
    #[error("response decode failure")]
    Decode {
        /// Decoder description.
        message: String,
    },
    /// A request body could not be serialised.
    #[error("request encode failure")]
    Encode {
        /// Encoder description.
        message: String,
    },
    /// A route before-hook failed; navigation continued.
    #[error("navigation hook failure")]
    NavigationHook {
        /// Hook failure description.
        message: String,
    },
    /// An expected render target was not active.
    #[error("render target missing")]
    RenderTargetMissing {
        /// Name of the missing target.
        target: &'static str,
    },
}

impl UiError {
    /// Build a transport error from any displayable cause.
    pub fn transport(cause: impl std::fmt::Display) -> Self {
        Self::Transport {
            message: cause.to_string(),
        }
    }

    /// Build a decode error from any displayable cause.
    pub fn decode(cause: impl std::fmt::Display) -> Self {
        Self::Decode {
            message: cause.to_string(),
        }
    }

    /// Whether the failure means the session is absent or rejected.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::AuthMissing | Self::InteractionRequired | Self::Http { status: 401, .. }
        )
    }

    /// Human-readable text for the page-level error region.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthMissing => "No token found for Authorization, please login again".to_string(),
            Self::InteractionRequired => "Sign-in requires interaction, please login again".to_string(),
            Self::Provider { message } => format!("Sign-in failed: {message}"),
            Self::Http { message, .. } => message.clone(),
            Self::Transport { message } => format!("Network request failed: {message}"),
            Self::Decode { .. } => "The server returned an unexpected response".to_string(),
            Self::Encode { .. } => "The request could not be prepared".to_string(),
            Self::NavigationHook { .. } => "An error occurred during navigation.".to_string(),
            Self::RenderTargetMissing { target } => format!("Unable to render {target}"),
        }
    }
}
