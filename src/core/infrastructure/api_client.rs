//! Internal HTTP client for the vSphere VI/JSON API with automatic re-login.

use crate::{
    RateLimitConfig,
    auth::application::service::login_service::LoginService,
    core::domain::{
        error::{StatsError, StatsResult},
        model::{
            managed_object::ServiceContent, vsphere_connection::VsphereConnection,
            vsphere_session::VsphereSession,
        },
        value_object::SESSION_HEADER,
    },
};
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{Client, Method, StatusCode};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Internal HTTP client that manages the session and provides methods to call the VI/JSON API.
///
/// The `vmware-api-session-id` header is attached to each request. If a request receives a
/// `401 Unauthorized` response, the client logs in again once using the stored credentials
/// and retries the request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    connection: Arc<VsphereConnection>,
    session: Arc<RwLock<Option<VsphereSession>>>,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl ApiClient {
    /// Creates a new `ApiClient`. The client starts unauthenticated.
    ///
    /// # Errors
    /// Returns `StatsError::Connection` if the HTTP client cannot be built and
    /// `StatsError::Config` if the rate limit has a zero component.
    pub fn new(
        connection: VsphereConnection,
        rate_limit: Option<RateLimitConfig>,
    ) -> StatsResult<Self> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(connection.accepts_invalid_certs())
            .build()
            .map_err(|e| StatsError::Connection(e.to_string()))?;

        let rate_limiter = match rate_limit {
            Some(rl) => {
                let per_second = NonZeroU32::new(rl.requests_per_second).ok_or_else(|| {
                    StatsError::Config("requests_per_second must be greater than zero".to_string())
                })?;
                let burst = NonZeroU32::new(rl.burst_size).ok_or_else(|| {
                    StatsError::Config("burst_size must be greater than zero".to_string())
                })?;
                let quota = Quota::per_second(per_second).allow_burst(burst);
                Some(Arc::new(DefaultDirectRateLimiter::direct(quota)))
            }
            None => None,
        };

        Ok(Self {
            http_client,
            connection: Arc::new(connection),
            session: Arc::new(RwLock::new(None)),
            rate_limiter,
        })
    }

    /// Returns a reference to the underlying connection details.
    pub fn connection(&self) -> &VsphereConnection {
        &self.connection
    }

    /// Returns the shared HTTP client.
    pub(crate) fn http_client(&self) -> &Client {
        &self.http_client
    }

    /// Sets the session (used after a successful login).
    pub async fn set_session(&self, session: VsphereSession) {
        let mut lock = self.session.write().await;
        *lock = Some(session);
    }

    /// Returns the current session, if any.
    pub async fn session(&self) -> Option<VsphereSession> {
        self.session.read().await.clone()
    }

    /// Returns `true` once a session has been established.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Returns the service content discovered at login.
    ///
    /// # Errors
    /// Returns `StatsError::Session` when the client has never logged in.
    pub async fn service_content(&self) -> StatsResult<ServiceContent> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.content().clone())
            .ok_or_else(|| StatsError::Session("not logged in".to_string()))
    }

    /// Performs a fresh login using the stored credentials.
    pub async fn login(&self) -> StatsResult<()> {
        let service = LoginService::new();
        let session = service.execute(self).await?;
        self.set_session(session).await;
        Ok(())
    }

    /// Invokes a managed-object method with a JSON body.
    ///
    /// Methods that return nothing (`204 No Content`) deserialize from JSON `null`,
    /// so `T` may be `()` or an `Option<_>`.
    ///
    /// # Errors
    /// Returns `StatsError` if the request fails, the session cannot be refreshed,
    /// or the response cannot be parsed.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> StatsResult<T>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        self.execute_request(Method::POST, path, Some(body)).await
    }

    /// Core request execution method. It ensures a session exists, sends the request,
    /// handles 401 by logging in again once, and parses the response.
    async fn execute_request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> StatsResult<T>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        if !self.is_authenticated().await {
            self.login().await?;
        }

        let mut response = self.send(method.clone(), path, body).await?;

        // Session expired or was invalidated server side: log in again, retry exactly once
        if response.status() == StatusCode::UNAUTHORIZED {
            let age = self
                .session()
                .await
                .and_then(|s| s.session_id().created_at().elapsed().ok());
            debug!(path, session_age = ?age, "session rejected, logging in again");
            self.login().await?;
            response = self.send(method, path, body).await?;
        }

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(StatsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StatsError::Connection(format!("Failed to read response: {}", e)))?;
        let bytes: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        serde_json::from_slice(bytes)
            .map_err(|e| StatsError::Connection(format!("Failed to parse response: {}", e)))
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> StatsResult<reqwest::Response>
    where
        B: serde::Serialize,
    {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let url = self.connection.endpoint(path)?;
        let mut req_builder = self.http_client.request(method, url);

        {
            let session = self.session.read().await;
            if let Some(session) = session.as_ref() {
                req_builder = req_builder.header(SESSION_HEADER, session.session_id().as_str());
            }
        }

        if let Some(body) = body {
            req_builder = req_builder.json(body);
        }

        req_builder
            .send()
            .await
            .map_err(|e| StatsError::Connection(format!("HTTP request failed: {}", e)))
    }

    /// Ends the current session. Failures are logged, never returned.
    pub async fn logout(&self) {
        let Some(session) = self.session.write().await.take() else {
            return;
        };
        let Some(session_manager) = session.content().session_manager.clone() else {
            return;
        };

        let path = format!("{}/Logout", session_manager.path());
        let result = match self.connection.endpoint(&path) {
            Ok(url) => self
                .http_client
                .post(url)
                .header(SESSION_HEADER, session.session_id().as_str())
                .send()
                .await
                .map_err(|e| StatsError::Connection(e.to_string())),
            Err(e) => Err(e),
        };
        match result {
            Ok(response) if response.status().is_success() => debug!("logged out"),
            Ok(response) => warn!(status = %response.status(), "logout rejected"),
            Err(e) => warn!(error = %e, "logout failed"),
        }
    }
}
