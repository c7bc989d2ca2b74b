//! Request plumbing shared by every endpoint.

use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use pulse_core::models::ErrorBody;
use pulse_session::SessionStore;

use crate::errors::ApiError;

/// Client for the InventoryPulse REST API.
///
/// Holds the base URL and the session store the bearer token comes from.
/// Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Client against `base_url` (e.g. `http://localhost:8080/api`),
    /// authenticating from `session`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            let _ = base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            session,
        }
    }

    /// The session store this client authenticates from.
    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Attach the bearer token (when present), send, and intercept 401.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = match self.session.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            // The token is no good; drop the local session so the app
            // falls back to the login flow.
            if let Err(error) = self.session.clear() {
                warn!(%error, "failed to clear rejected session");
            }
            return Err(ApiError::SessionExpired);
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            Err(Self::status_error(status, response).await)
        }
    }

    async fn status_error(status: StatusCode, response: Response) -> ApiError {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message.unwrap_or(body.error),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(self.http.get(self.url(endpoint))).await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .send(self.http.post(self.url(endpoint)).json(body))
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .send(self.http.put(self.url(endpoint)).json(body))
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn patch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .send(self.http.patch(self.url(endpoint)).json(body))
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn delete(&self, endpoint: &str) -> Result<(), ApiError> {
        let response = self.send(self.http.delete(self.url(endpoint))).await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::status_error(status, response).await)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
