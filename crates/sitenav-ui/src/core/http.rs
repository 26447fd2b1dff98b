//! Request construction and fetch-and-decode with uniform error extraction.
//!
//! # Design
//! - `build_request_options` is the only place that reads the session token,
//!   so a missing token fails before any transport is touched.
//! - The transport is a trait; the browser implementation lives in
//!   `services::transport` and tests plug in a recording mock.
//! - Non-2xx bodies are mined for `error`/`message` fields; anything else
//!   collapses to one generic message.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sitenav_api_models::ErrorBody;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::core::error::{GENERIC_HTTP_MESSAGE, UiError, UiResult};
use crate::core::session::SessionStore;

/// HTTP verbs used by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// GET.
    Get,
    /// DELETE.
    Delete,
}

impl Method {
    /// Upper-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Delete => "DELETE",
        }
    }
}

/// Fully prepared request options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestOptions {
    /// Verb to issue.
    pub method: Method,
    /// Ordered header pairs.
    pub headers: Vec<(String, String)>,
    /// Serialised JSON body, when any.
    pub body: Option<String>,
    /// Whether cookies are sent cross-origin.
    pub include_credentials: bool,
}

impl RequestOptions {
    /// Look up a header value case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response handed back by a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Network boundary.
#[async_trait(?Send)]
pub trait Transport {
    /// Issue a request and return the raw response.
    ///
    /// # Errors
    /// Returns [`UiError::Transport`] when no response was received.
    async fn send(&self, url: &str, options: &RequestOptions) -> UiResult<HttpResponse>;
}

/// Prepare request options, attaching the bearer token when required.
///
/// # Errors
/// Returns [`UiError::AuthMissing`] when `requires_auth` is set and no token
/// is available, or [`UiError::Encode`] when the body cannot be serialised.
pub fn build_request_options<B: Serialize + ?Sized>(
    method: Method,
    body: Option<&B>,
    requires_auth: bool,
    session: &SessionStore,
) -> UiResult<RequestOptions> {
    let mut headers = vec![
        ("Content-type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
    ];
    let body = body
        .map(|value| {
            serde_json::to_string(value).map_err(|err| UiError::Encode {
                message: err.to_string(),
            })
        })
        .transpose()?;
    if requires_auth {
        let token = session.token().ok_or(UiError::AuthMissing)?;
        headers.push(("Authorization".to_string(), format!("Bearer {token}")));
    }
    Ok(RequestOptions {
        method,
        headers,
        body,
        include_credentials: true,
    })
}

/// Extract the best user-facing message from a failed response body.
#[must_use]
pub fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.best_message().map(ToString::to_string))
        .unwrap_or_else(|| GENERIC_HTTP_MESSAGE.to_string())
}

/// Fetch-and-decode client over a [`Transport`].
#[derive(Clone)]
pub struct HttpClient {
    transport: Rc<dyn Transport>,
}

impl HttpClient {
    /// Wrap a transport.
    #[must_use]
    pub fn new(transport: Rc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Perform a request and decode a JSON body.
    ///
    /// # Errors
    /// Returns [`UiError::Http`] for non-2xx responses, [`UiError::Decode`]
    /// for undecodable bodies, or the transport failure.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> UiResult<T> {
        let response = self.send_checked(url, options).await?;
        serde_json::from_str(&response.body).map_err(UiError::decode)
    }

    /// Perform a request whose success body is ignored.
    ///
    /// # Errors
    /// Same as [`HttpClient::fetch_json`] minus decoding.
    pub async fn fetch_empty(&self, url: &str, options: &RequestOptions) -> UiResult<()> {
        self.send_checked(url, options).await.map(|_| ())
    }

    async fn send_checked(&self, url: &str, options: &RequestOptions) -> UiResult<HttpResponse> {
        debug!(method = options.method.as_str(), url, "issuing request");
        let response = self.transport.send(url, options).await?;
        if response.is_success() {
            return Ok(response);
        }
        let message = extract_error_message(&response.body);
        warn!(status = response.status, url, error = %message, "request failed");
        Err(UiError::Http {
            status: response.status,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::{
        IdentityProvider, MemoryTokenStorage, ProviderError, TOKEN_STORAGE_KEY, TokenStorage,
    };
    use serde_json::json;

    struct NoProvider;

    #[async_trait(?Send)]
    impl IdentityProvider for NoProvider {
        async fn acquire_token(&self) -> Result<String, ProviderError> {
            Err(ProviderError::Failed("unused".into()))
        }

        async fn acquire_token_interactive(&self) -> Result<String, ProviderError> {
            Err(ProviderError::Failed("unused".into()))
        }

        async fn sign_out(&self) -> Result<(), ProviderError> {
            Ok(())
        }
    }

    fn session_with(token: Option<&str>) -> SessionStore {
        let storage = Rc::new(MemoryTokenStorage::default());
        if let Some(token) = token {
            storage.set(TOKEN_STORAGE_KEY, token);
        }
        SessionStore::new(storage, Rc::new(NoProvider), None)
    }

    #[test]
    fn options_carry_json_headers_and_bearer() {
        let session = session_with(Some("abc"));
        let body = json!({"name": "x"});
        let options = build_request_options(Method::Delete, Some(&body), true, &session).unwrap();
        assert_eq!(options.header("content-type"), Some("application/json"));
        assert_eq!(options.header("Accept"), Some("application/json"));
        assert_eq!(options.header("Authorization"), Some("Bearer abc"));
        assert_eq!(options.body.as_deref(), Some(r#"{"name":"x"}"#));
        assert_eq!(options.method.as_str(), "DELETE");
    }

    #[test]
    fn missing_token_fails_fast() {
        let session = session_with(None);
        let err = build_request_options::<()>(Method::Get, None, true, &session).unwrap_err();
        assert_eq!(err, UiError::AuthMissing);

        let anonymous = build_request_options::<()>(Method::Get, None, false, &session).unwrap();
        assert!(anonymous.header("Authorization").is_none());
    }

    #[test]
    fn error_messages_fall_back_to_generic() {
        assert_eq!(extract_error_message(r#"{"message":"not found"}"#), "not found");
        assert_eq!(extract_error_message(r#"{"error":"denied","message":"x"}"#), "denied");
        assert_eq!(extract_error_message("<html>oops</html>"), GENERIC_HTTP_MESSAGE);
        assert_eq!(extract_error_message(r#"{"message":""}"#), GENERIC_HTTP_MESSAGE);
    }
}
