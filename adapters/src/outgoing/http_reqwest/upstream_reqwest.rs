use std::time::Duration;

use domain::fetch::FetchOutcome;
use lunar_tiles_application::{
    error::{AppError, AppResult},
    ports::outgoing::upstream::UpstreamTilePort,
};
use reqwest::{
    Client, StatusCode,
    header::{CONTENT_TYPE, HeaderValue, REFERER},
};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct ReqwestUpstreamConfig {
    pub timeout: Duration,
    pub user_agent: String,
    pub referer: String,
}

/// Fetches tiles over HTTP and classifies the response; it never returns an error.
#[derive(Clone)]
pub struct ReqwestUpstreamAdapter {
    client: Client,
    referer: Option<HeaderValue>,
}

impl ReqwestUpstreamAdapter {
    pub fn new(config: &ReqwestUpstreamConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AppError::ExternalServiceError {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        let referer = if config.referer.is_empty() {
            None
        } else {
            Some(
                HeaderValue::from_str(&config.referer).map_err(|e| AppError::ConfigError {
                    message: format!("Invalid upstream referer '{}': {e}", config.referer),
                })?,
            )
        };

        Ok(Self { client, referer })
    }
}

fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {error}")
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else {
        error.to_string()
    }
}

#[async_trait::async_trait]
impl UpstreamTilePort for ReqwestUpstreamAdapter {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        let mut request = self.client.get(url);
        if let Some(referer) = &self.referer {
            request = request.header(REFERER, referer.clone());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::NetworkError(describe_transport_error(&e)),
        };

        let status = response.status();
        trace!(%url, %status, "Upstream responded");

        if status == StatusCode::NOT_FOUND {
            return FetchOutcome::NotAvailable;
        }
        if !status.is_success() {
            return FetchOutcome::UpstreamError(status.as_u16());
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !content_type.contains("image") {
            return FetchOutcome::InvalidContent(format!(
                "unexpected content type '{content_type}'"
            ));
        }

        match response.bytes().await {
            Ok(body) if body.is_empty() => {
                FetchOutcome::InvalidContent("empty response body".to_string())
            }
            Ok(body) => FetchOutcome::Success(body.to_vec()),
            Err(e) => FetchOutcome::NetworkError(describe_transport_error(&e)),
        }
    }
}
