//! Fake platform collaborators.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use futures::channel::oneshot;
use serde::Serialize;
use sitenav_ui::core::error::{UiError, UiResult};
use sitenav_ui::core::http::{HttpResponse, Method, RequestOptions, Transport};
use sitenav_ui::core::session::{IdentityProvider, ProviderError};
use sitenav_ui::features::files::Confirmer;

/// One request observed by [`MockTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Verb issued.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Options as handed to the transport.
    pub options: RequestOptions,
}

struct Reply {
    status: u16,
    body: String,
    gate: Option<oneshot::Receiver<()>>,
}

/// Holds a scripted reply back until [`Gate::open`] is called.
pub struct Gate {
    sender: oneshot::Sender<()>,
}

impl Gate {
    /// Release the held reply.
    pub fn open(self) {
        self.sender.send(()).ok();
    }
}

/// Recording transport answering from a `(method, url)` script.
///
/// Unscripted requests get `404 {"message":"not found"}`.
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<HashMap<(&'static str, String), Reply>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Script a raw reply.
    pub fn respond(&self, method: Method, url: impl Into<String>, status: u16, body: impl Into<String>) {
        self.replies.borrow_mut().insert(
            (method.as_str(), url.into()),
            Reply {
                status,
                body: body.into(),
                gate: None,
            },
        );
    }

    /// Script a JSON reply.
    ///
    /// # Panics
    /// Panics when `payload` cannot be serialised.
    pub fn respond_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        url: impl Into<String>,
        status: u16,
        payload: &T,
    ) {
        let body = serde_json::to_string(payload).expect("fixture payload serialises");
        self.respond(method, url, status, body);
    }

    /// Hold the scripted reply for `(method, url)` until the gate opens.
    ///
    /// # Panics
    /// Panics when no reply is scripted for the pair yet.
    pub fn gate(&self, method: Method, url: &str) -> Gate {
        let (sender, receiver) = oneshot::channel();
        self.replies
            .borrow_mut()
            .get_mut(&(method.as_str(), url.to_string()))
            .expect("script the reply before gating it")
            .gate = Some(receiver);
        Gate { sender }
    }

    /// Every request observed so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    /// Number of requests observed.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Number of requests for one `(method, url)` pair.
    #[must_use]
    pub fn count_for(&self, method: Method, url: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.method == method && request.url == url)
            .count()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, url: &str, options: &RequestOptions) -> UiResult<HttpResponse> {
        self.requests.borrow_mut().push(RecordedRequest {
            method: options.method,
            url: url.to_string(),
            options: options.clone(),
        });
        let key = (options.method.as_str(), url.to_string());
        let (gate, response) = {
            let mut replies = self.replies.borrow_mut();
            match replies.get_mut(&key) {
                Some(reply) => (
                    reply.gate.take(),
                    HttpResponse {
                        status: reply.status,
                        body: reply.body.clone(),
                    },
                ),
                None => (
                    None,
                    HttpResponse {
                        status: 404,
                        body: r#"{"message":"not found"}"#.to_string(),
                    },
                ),
            }
        };
        if let Some(gate) = gate {
            gate.await.map_err(UiError::transport)?;
        }
        Ok(response)
    }
}

/// Identity provider answering from per-flow scripts.
#[derive(Default)]
pub struct FakeIdentityProvider {
    silent: RefCell<VecDeque<Result<String, ProviderError>>>,
    interactive: RefCell<VecDeque<Result<String, ProviderError>>>,
    sign_out_error: RefCell<Option<ProviderError>>,
    silent_calls: Cell<usize>,
    interactive_calls: Cell<usize>,
    sign_out_calls: Cell<usize>,
}

impl FakeIdentityProvider {
    /// Queue a result for the next silent acquisition.
    #[must_use]
    pub fn with_silent(self, result: Result<&str, ProviderError>) -> Self {
        self.silent
            .borrow_mut()
            .push_back(result.map(ToString::to_string));
        self
    }

    /// Queue a result for the next interactive acquisition.
    #[must_use]
    pub fn with_interactive(self, result: Result<&str, ProviderError>) -> Self {
        self.interactive
            .borrow_mut()
            .push_back(result.map(ToString::to_string));
        self
    }

    /// Make sign-out fail.
    #[must_use]
    pub fn with_failing_sign_out(self) -> Self {
        *self.sign_out_error.borrow_mut() = Some(ProviderError::Failed("sign-out failed".into()));
        self
    }

    /// Silent acquisitions attempted.
    #[must_use]
    pub fn silent_calls(&self) -> usize {
        self.silent_calls.get()
    }

    /// Interactive acquisitions attempted.
    #[must_use]
    pub fn interactive_calls(&self) -> usize {
        self.interactive_calls.get()
    }

    /// Sign-outs attempted.
    #[must_use]
    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.get()
    }
}

fn next_scripted(queue: &RefCell<VecDeque<Result<String, ProviderError>>>) -> Result<String, ProviderError> {
    queue
        .borrow_mut()
        .pop_front()
        .unwrap_or_else(|| Err(ProviderError::Failed("unscripted".into())))
}

#[async_trait(?Send)]
impl IdentityProvider for FakeIdentityProvider {
    async fn acquire_token(&self) -> Result<String, ProviderError> {
        self.silent_calls.set(self.silent_calls.get() + 1);
        next_scripted(&self.silent)
    }

    async fn acquire_token_interactive(&self) -> Result<String, ProviderError> {
        self.interactive_calls.set(self.interactive_calls.get() + 1);
        next_scripted(&self.interactive)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.sign_out_calls.set(self.sign_out_calls.get() + 1);
        self.sign_out_error.borrow().clone().map_or(Ok(()), Err)
    }
}

/// Confirmation dialog with a fixed answer that records its prompts.
pub struct FakeConfirmer {
    answer: Cell<bool>,
    prompts: RefCell<Vec<String>>,
}

impl Default for FakeConfirmer {
    fn default() -> Self {
        Self {
            answer: Cell::new(true),
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl FakeConfirmer {
    /// Change the answer given to later prompts.
    pub fn answer(&self, value: bool) {
        self.answer.set(value);
    }

    /// Prompts shown so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Confirmer for FakeConfirmer {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.answer.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get() -> RequestOptions {
        RequestOptions {
            method: Method::Get,
            headers: Vec::new(),
            body: None,
            include_credentials: true,
        }
    }

    #[tokio::test]
    async fn unscripted_requests_get_not_found() {
        let transport = MockTransport::default();
        let response = transport
            .send("http://api.test/missing", &get())
            .await
            .expect("mock transport never fails without a gate");
        assert_eq!(response.status, 404);
        assert_eq!(transport.count_for(Method::Get, "http://api.test/missing"), 1);
    }

    #[tokio::test]
    async fn gated_replies_wait_for_open() {
        let transport = MockTransport::default();
        transport.respond(Method::Get, "http://api.test/x", 200, "[]");
        let gate = transport.gate(Method::Get, "http://api.test/x");
        let options = get();
        let pending = transport.send("http://api.test/x", &options);
        gate.open();
        let response = pending.await.expect("gate opened");
        assert_eq!(response.body, "[]");
    }

    #[tokio::test]
    async fn identity_scripts_drain_in_order() {
        let provider = FakeIdentityProvider::default()
            .with_silent(Err(ProviderError::InteractionRequired))
            .with_interactive(Ok("tok"));
        assert_eq!(
            provider.acquire_token().await,
            Err(ProviderError::InteractionRequired)
        );
        assert_eq!(provider.acquire_token_interactive().await, Ok("tok".into()));
        assert!(provider.acquire_token().await.is_err());
        assert_eq!(provider.silent_calls(), 2);
    }
}
