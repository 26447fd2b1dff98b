//! Typed client for the `sites`, `drives` and `files` resources.

use std::rc::Rc;

use sitenav_api_models::{Drive, DriveFile, Site};
use urlencoding::encode;

use crate::core::error::UiResult;
use crate::core::http::{HttpClient, Method, RequestOptions, Transport, build_request_options};
use crate::core::session::SessionStore;

/// Authenticated REST client rooted at the configured base URL.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: HttpClient,
    session: Rc<SessionStore>,
}

impl ApiClient {
    /// Build a client; `base_url` must not end with a slash.
    #[must_use]
    pub fn new(base_url: impl Into<String>, transport: Rc<dyn Transport>, session: Rc<SessionStore>) -> Self {
        Self {
            base_url: base_url.into(),
            http: HttpClient::new(transport),
            session,
        }
    }

    /// Session the client authenticates with.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authed(&self, method: Method) -> UiResult<RequestOptions> {
        build_request_options::<()>(method, None, true, &self.session)
    }

    /// All sites.
    ///
    /// # Errors
    /// Propagates auth, transport, HTTP and decode failures.
    pub async fn sites(&self) -> UiResult<Vec<Site>> {
        let options = self.authed(Method::Get)?;
        self.http.fetch_json(&self.url("/sites"), &options).await
    }

    /// One site by id.
    ///
    /// # Errors
    /// Propagates auth, transport, HTTP and decode failures.
    pub async fn site(&self, id: &str) -> UiResult<Site> {
        let options = self.authed(Method::Get)?;
        let url = self.url(&format!("/sites/{}", encode(id)));
        self.http.fetch_json(&url, &options).await
    }

    /// Drives of a site; the site name is passed along when known.
    ///
    /// # Errors
    /// Propagates auth, transport, HTTP and decode failures.
    pub async fn drives(&self, site_id: &str, site_name: Option<&str>) -> UiResult<Vec<Drive>> {
        let options = self.authed(Method::Get)?;
        let mut url = self.url(&format!("/drives?siteId={}", encode(site_id)));
        if let Some(name) = site_name {
            url.push_str("&siteName=");
            url.push_str(&encode(name));
        }
        self.http.fetch_json(&url, &options).await
    }

    /// One drive by id.
    ///
    /// # Errors
    /// Propagates auth, transport, HTTP and decode failures.
    pub async fn drive(&self, id: &str) -> UiResult<Drive> {
        let options = self.authed(Method::Get)?;
        let url = self.url(&format!("/drives/{}", encode(id)));
        self.http.fetch_json(&url, &options).await
    }

    /// Files of a drive.
    ///
    /// # Errors
    /// Propagates auth, transport, HTTP and decode failures.
    pub async fn files(&self, drive_id: &str) -> UiResult<Vec<DriveFile>> {
        let options = self.authed(Method::Get)?;
        let url = self.url(&format!("/files?driveId={}", encode(drive_id)));
        self.http.fetch_json(&url, &options).await
    }

    /// Number of files in a drive.
    ///
    /// # Errors
    /// Same as [`ApiClient::files`].
    pub async fn file_count(&self, drive_id: &str) -> UiResult<usize> {
        self.files(drive_id).await.map(|files| files.len())
    }

    /// Delete a file from a drive.
    ///
    /// # Errors
    /// Propagates auth, transport and HTTP failures.
    pub async fn delete_file(&self, drive_id: &str, file_id: &str) -> UiResult<()> {
        let options = self.authed(Method::Delete)?;
        let url = self.url(&format!("/files/{}/items/{}", encode(drive_id), encode(file_id)));
        self.http.fetch_empty(&url, &options).await
    }
}
