//! Browser transport over `gloo-net`.

use async_trait::async_trait;
use gloo_net::http::Request;
use web_sys::{RequestCredentials, RequestMode};

use crate::core::error::{UiError, UiResult};
use crate::core::http::{HttpResponse, Method, RequestOptions, Transport};

/// Fetch-backed [`Transport`] used by the wasm shell.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, url: &str, options: &RequestOptions) -> UiResult<HttpResponse> {
        let mut request = match options.method {
            Method::Get => Request::get(url),
            Method::Delete => Request::delete(url),
        };
        for (name, value) in &options.headers {
            request = request.header(name, value);
        }
        if options.include_credentials {
            request = request
                .mode(RequestMode::Cors)
                .credentials(RequestCredentials::Include);
        }
        if let Some(body) = &options.body {
            request = request.body(body.as_str());
        }
        let response = request.send().await.map_err(UiError::transport)?;
        let status = response.status();
        let body = response.text().await.map_err(UiError::transport)?;
        Ok(HttpResponse { status, body })
    }
}
