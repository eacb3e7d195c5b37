use crate::{
    auth::application::{
        request::login_request::LoginRequest, response::login_response::LoginResponse,
    },
    core::{
        domain::{
            error::{StatsError, StatsResult},
            model::{managed_object::ServiceContent, vsphere_session::VsphereSession},
            value_object::{SESSION_HEADER, VsphereSessionId},
        },
        infrastructure::api_client::ApiClient,
    },
};

use reqwest::{
    StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use tracing::{debug, info};

const SERVICE_CONTENT_PATH: &str = "ServiceInstance/ServiceInstance/content";

/// Establishes a VI/JSON session: discovers the service content, then calls
/// `SessionManager.Login` with the connection's credentials.
pub struct LoginService {
    default_headers: HeaderMap,
}

impl LoginService {
    pub fn new() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self { default_headers }
    }

    pub async fn execute(&self, api: &ApiClient) -> StatsResult<VsphereSession> {
        let content = self.fetch_service_content(api).await?;
        let session_manager = content.session_manager.clone().ok_or_else(|| {
            StatsError::Session("endpoint exposes no SessionManager".to_string())
        })?;

        let connection = api.connection();
        let url = connection.endpoint(&format!("{}/Login", session_manager.path()))?;
        let request = LoginRequest {
            user_name: connection.vsphere_username().as_str().to_string(),
            password: connection.vsphere_password().as_str().to_string(),
        };

        let response = api
            .http_client()
            .post(url)
            .headers(self.default_headers.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| StatsError::Connection(e.to_string()))?;

        match response.status() {
            StatusCode::OK => self.handle_successful_login(response, content).await,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StatsError::Authentication(
                "Invalid credentials provided".to_string(),
            )),
            StatusCode::NOT_FOUND => Err(StatsError::Connection(
                "Login endpoint not found (unsupported API release?)".to_string(),
            )),
            StatusCode::SERVICE_UNAVAILABLE => Err(StatsError::Connection(
                "vSphere service is currently unavailable".to_string(),
            )),
            StatusCode::INTERNAL_SERVER_ERROR => {
                let body = response.text().await.unwrap_or_default();
                if body.contains("InvalidLogin") {
                    Err(StatsError::Authentication(
                        "Invalid credentials provided".to_string(),
                    ))
                } else {
                    Err(StatsError::Api {
                        status: 500,
                        message: body,
                    })
                }
            }
            status => Err(StatsError::Connection(format!(
                "Unexpected response status: {}",
                status
            ))),
        }
    }

    async fn fetch_service_content(&self, api: &ApiClient) -> StatsResult<ServiceContent> {
        let url = api.connection().endpoint(SERVICE_CONTENT_PATH)?;
        let response = api
            .http_client()
            .get(url)
            .headers(self.default_headers.clone())
            .send()
            .await
            .map_err(|e| StatsError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StatsError::Connection(format!(
                "Failed to retrieve service content: {}",
                response.status()
            )));
        }

        response.json::<ServiceContent>().await.map_err(|e| {
            StatsError::Connection(format!("Failed to parse service content: {}", e))
        })
    }

    async fn handle_successful_login(
        &self,
        response: reqwest::Response,
        content: ServiceContent,
    ) -> StatsResult<VsphereSession> {
        let session_id = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                StatsError::Session(format!("login response carried no {} header", SESSION_HEADER))
            })?;
        let session_id = VsphereSessionId::new(session_id)?;

        let login = response.json::<LoginResponse>().await.map_err(|e| {
            StatsError::Connection(format!("Failed to parse login response: {}", e))
        })?;
        debug!(full_name = %login.full_name, "session established");
        let about = content.about.as_ref();
        info!(
            user = %login.user_name,
            product = about.map(|a| a.full_name.as_str()).unwrap_or("unknown"),
            api_version = about.map(|a| a.api_version.as_str()).unwrap_or("unknown"),
            "logged in to vSphere"
        );

        Ok(VsphereSession::new(session_id, content))
    }
}

impl Default for LoginService {
    fn default() -> Self {
        Self::new()
    }
}
