//! Authentication endpoint client

use crate::core::config::PortalConfig;
use crate::core::error::{PortalError, Result, GENERIC_LOGIN_FAILURE};
use crate::session::models::{AuthToken, Credentials, ErrorBody, LoginOutcome, LoginResponse};
use reqwest::Url;
use std::time::Duration;

/// Client for the portal's authentication endpoint.
///
/// Performs exactly one POST per [`authenticate`](AuthClient::authenticate)
/// call; retry policy is left to the user, who resubmits manually.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    login_url: Url,
}

impl AuthClient {
    pub fn new(config: &PortalConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| PortalError::ConfigError(format!("base_url: {}", e)))?;
        let login_url = base
            .join(&config.login_path)
            .map_err(|e| PortalError::ConfigError(format!("login_path: {}", e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self { http, login_url })
    }

    /// Exchange credentials for a token.
    ///
    /// # Errors
    ///
    /// - [`PortalError::AuthenticationError`] when the server rejects the
    ///   credentials, carrying the server-supplied message when present and
    ///   the generic fallback otherwise
    /// - [`PortalError::NetworkError`] on transport failures
    /// - [`PortalError::DeserializationError`] when a 2xx body does not
    ///   match the expected shape
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<LoginOutcome> {
        let response = self
            .http
            .post(self.login_url.clone())
            .json(credentials)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Failure bodies are `{ "error": ... }` at best, empty at worst
            let body: ErrorBody = response.json().await.unwrap_or_default();
            let message = body
                .error
                .unwrap_or_else(|| GENERIC_LOGIN_FAILURE.to_string());

            tracing::warn!(status = %status, "Authentication rejected");
            return Err(PortalError::AuthenticationError(message));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| PortalError::DeserializationError(e.to_string()))?;

        Ok(LoginOutcome {
            token: AuthToken::new(body.token),
            message: body.message,
            temporary_password: body.temporary_password,
        })
    }
}
