//! OAuth2 authentication against a Mautic instance, backed by `ureq`.
//!
//! Configure an [`OAuth2Service`] with the instance URL and API credentials,
//! send the user to [`OAuth2Service::authorization_url`], exchange the code
//! from the callback with
//! [`OAuth2Service::exchange_authorization_code`], and pass the service to
//! [`MauticApi`](crate::client::MauticApi). Tokens obtained once can be
//! stored and set again later with the fluent setters; an expired access
//! token is renewed with [`OAuth2Service::refresh_access_token`].

use std::io::Read;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::client::{ApiRequest, Method, OauthService};
use crate::error::{MauticError, OauthError};

/// Success body of the OAuth2 token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// OAuth2 implementation of [`OauthService`].
pub struct OAuth2Service {
    instance_url: String,
    api_key: String,
    api_secret: String,
    callback_url: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    agent: ureq::Agent,
}

impl OAuth2Service {
    /// Create a service for the given Mautic instance and API credentials.
    /// `instance_url` is the base URL of the installation, without a
    /// trailing path.
    pub fn new(
        instance_url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        let instance_url = instance_url.into();
        OAuth2Service {
            instance_url: instance_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            callback_url: None,
            access_token: None,
            refresh_token: None,
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    /// Set the redirect URL registered for this API client. Required for the
    /// authorization-code flow, not for re-using stored tokens.
    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = Some(callback_url.into());
        self
    }

    /// Set a previously stored access token.
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Set a previously stored refresh token.
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Current access token, if one is configured or has been obtained.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Current refresh token, if one is configured or has been obtained.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// URL to send the user to for authorizing this client.
    ///
    /// # Errors
    ///
    /// Fails with [`MauticError::Config`] when no callback URL is set or the
    /// instance URL does not parse.
    pub fn authorization_url(&self) -> Result<String, MauticError> {
        let callback_url = self.callback_url.as_deref().ok_or_else(|| {
            MauticError::Config("a callback URL is required to build an authorization URL".into())
        })?;
        let url = Url::parse_with_params(
            &format!("{}/oauth/v2/authorize", self.instance_url),
            [
                ("client_id", self.api_key.as_str()),
                ("redirect_uri", callback_url),
                ("response_type", "code"),
            ],
        )
        .map_err(|e| MauticError::Config(format!("invalid instance URL: {}", e)))?;
        Ok(url.into())
    }

    /// Exchange the authorization code from the callback redirect for an
    /// access and refresh token.
    pub fn exchange_authorization_code(&mut self, code: &str) -> Result<(), MauticError> {
        let callback_url = self
            .callback_url
            .clone()
            .ok_or_else(|| {
                MauticError::Config(
                    "a callback URL is required to exchange an authorization code".into(),
                )
            })?;
        debug!("exchanging authorization code for tokens");
        self.request_token(&[
            ("client_id", self.api_key.clone()),
            ("client_secret", self.api_secret.clone()),
            ("grant_type", "authorization_code".to_string()),
            ("redirect_uri", callback_url),
            ("code", code.to_string()),
        ])
    }

    /// Obtain a fresh access token using the stored refresh token.
    pub fn refresh_access_token(&mut self) -> Result<(), MauticError> {
        let refresh_token = self.refresh_token.clone().ok_or_else(|| {
            MauticError::Config("no refresh token available to refresh with".into())
        })?;
        debug!("refreshing access token");
        self.request_token(&[
            ("client_id", self.api_key.clone()),
            ("client_secret", self.api_secret.clone()),
            ("grant_type", "refresh_token".to_string()),
            ("refresh_token", refresh_token),
        ])
    }

    fn request_token(&mut self, params: &[(&str, String)]) -> Result<(), MauticError> {
        let endpoint = format!("{}/oauth/v2/token", self.instance_url);
        let form: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        match self.agent.post(&endpoint).send_form(&form) {
            Ok(response) => {
                let token: TokenResponse = serde_json::from_reader(response.into_reader())
                    .map_err(|e| {
                        MauticError::transport(
                            format!("could not read token response: {}", e),
                            Some(Box::new(e)),
                        )
                    })?;
                self.access_token = Some(token.access_token);
                if token.refresh_token.is_some() {
                    self.refresh_token = token.refresh_token;
                }
                Ok(())
            }
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                match serde_json::from_str::<OauthError>(&body) {
                    Ok(error) if !error.error.is_empty() => Err(MauticError::Oauth(error)),
                    _ => Err(api_error(status, body)),
                }
            }
            Err(e) => {
                let message = e.to_string();
                Err(MauticError::transport(message, Some(Box::new(e))))
            }
        }
    }
}

impl OauthService for OAuth2Service {
    fn execute_request(&self, request: &ApiRequest) -> Result<Box<dyn Read>, MauticError> {
        let access_token = self.access_token.as_deref().ok_or_else(|| {
            MauticError::Config("no access token; authorize or refresh first".into())
        })?;
        let url = format!("{}{}", self.instance_url, request.endpoint());
        let authorization = format!("Bearer {}", access_token);
        debug!(url = url.as_str(), "executing api request");

        let result = match request.method() {
            Method::Get => {
                let mut call = self.agent.get(&url).set("Authorization", &authorization);
                for (name, value) in request.parameters() {
                    call = call.query(name, value);
                }
                call.call()
            }
            Method::Post => {
                let form: Vec<(&str, &str)> = request
                    .parameters()
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                self.agent
                    .post(&url)
                    .set("Authorization", &authorization)
                    .send_form(&form)
            }
        };

        match result {
            Ok(response) => Ok(Box::new(response.into_reader())),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(api_error(status, body))
            }
            Err(e) => {
                let message = e.to_string();
                Err(MauticError::transport(message, Some(Box::new(e))))
            }
        }
    }
}

/// Build an [`MauticError::Api`] from an error response body, pulling the
/// message out of the `{"errors": [...]}` or `{"error": {...}}` envelopes
/// the API uses, falling back to the raw body.
fn api_error(status: u16, body: String) -> MauticError {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/errors/0/message")
                .or_else(|| value.pointer("/error/message"))
                .and_then(|m| m.as_str().map(str::to_string))
        })
        .unwrap_or(body);
    MauticError::Api { status, message }
}
