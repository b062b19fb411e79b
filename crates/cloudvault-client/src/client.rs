//! The request function every endpoint wrapper goes through.

use std::time::Duration;

use reqwest::Method;
use reqwest::multipart::Form;
use serde::Serialize;
use serde::de::DeserializeOwned;

use cloudvault_core::config::api::ApiConfig;
use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;

use crate::decode::{self, DecodeContext};

/// Body of an outgoing request.
#[derive(Debug)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// JSON body.
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` body.
    Form(Vec<(String, String)>),
    /// `multipart/form-data` body.
    Multipart(Form),
}

impl RequestBody {
    /// Serialize a value into a JSON body.
    pub fn json<T: Serialize>(value: &T) -> AppResult<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    fn decode_context(&self) -> DecodeContext {
        match self {
            Self::Multipart(_) => DecodeContext::UPLOAD,
            _ => DecodeContext::JSON,
        }
    }
}

/// Client for the CloudVault REST API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    public_base_url: String,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: trim_base(&config.base_url),
            public_base_url: trim_base(config.public_base()),
        })
    }

    /// Build a client against a base URL with default settings.
    pub fn with_base_url(base_url: impl Into<String>) -> AppResult<Self> {
        Self::new(&ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        })
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Base path endpoints are appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an endpoint.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Absolute URL of a public endpoint (download links).
    pub fn public_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.public_base_url, endpoint)
    }

    /// Perform a request and decode the JSON response.
    ///
    /// Multipart bodies use the upload wording for errors; everything else
    /// uses the plain JSON wording. Classification is identical.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: RequestBody,
        token: Option<&str>,
    ) -> AppResult<T> {
        let ctx = body.decode_context();
        self.request_with(method, endpoint, body, token, ctx).await
    }

    /// [`request`](Self::request) with explicit error wording.
    pub async fn request_with<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: RequestBody,
        token: Option<&str>,
        ctx: DecodeContext,
    ) -> AppResult<T> {
        let response = self.send(method, endpoint, body, token).await?;
        decode::decode_response(response, ctx).await
    }

    /// Send a request and return the raw response without decoding.
    pub(crate) async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: RequestBody,
        token: Option<&str>,
    ) -> AppResult<reqwest::Response> {
        let url = self.url(endpoint);
        tracing::debug!(method = %method, endpoint, "Sending API request");

        let mut builder = self.http.request(method.clone(), &url);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(fields) => builder.form(&fields),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(method = %method, endpoint, error = %e, "API request failed");
            AppError::from(e)
        })?;

        tracing::debug!(
            method = %method,
            endpoint,
            status = response.status().as_u16(),
            "API response received"
        );
        Ok(response)
    }

    /// GET a JSON resource.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        token: Option<&str>,
    ) -> AppResult<T> {
        self.request(Method::GET, endpoint, RequestBody::Empty, token)
            .await
    }

    /// POST a JSON body.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        token: Option<&str>,
    ) -> AppResult<T> {
        self.request(Method::POST, endpoint, RequestBody::json(body)?, token)
            .await
    }

    /// DELETE a resource.
    pub async fn delete_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        token: Option<&str>,
    ) -> AppResult<T> {
        self.request(Method::DELETE, endpoint, RequestBody::Empty, token)
            .await
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
