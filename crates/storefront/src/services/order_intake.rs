//! Order intake client.
//!
//! Hands a finished checkout to the third-party form endpoint configured in
//! `ORDER_INTAKE_URL`. One request per submission: no retry, no timeout, no
//! idempotency key.

use harbor_core::checkout::OrderRequest;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::OrderIntakeConfig;

/// Longest slice of an error body kept for logging.
const MAX_ERROR_BODY: usize = 512;

/// Errors that can occur when submitting an order.
#[derive(Debug, Error)]
pub enum OrderIntakeError {
    /// The request never produced a response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("order rejected: {status} - {message}")]
    Rejected { status: u16, message: String },

    /// The client could not be configured.
    #[error("invalid order intake configuration: {0}")]
    Config(String),
}

/// Client for the order intake endpoint.
#[derive(Clone)]
pub struct OrderIntakeClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl OrderIntakeClient {
    /// Create a new order intake client.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &OrderIntakeConfig) -> Result<Self, OrderIntakeError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(api_key) = &config.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
                .map_err(|e| OrderIntakeError::Config(format!("Invalid API key format: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submit an order.
    ///
    /// Any 2xx response is a success; its body is not read.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-success status.
    #[instrument(skip(self, order), fields(items = order.cart().len(), total = %order.total()))]
    pub async fn submit(&self, order: &OrderRequest) -> Result<(), OrderIntakeError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(order)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let mut message = response.text().await.unwrap_or_default();
            if message.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| message.is_char_boundary(*i))
                    .unwrap_or(0);
                message.truncate(cut);
            }
            return Err(OrderIntakeError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(status = status.as_u16(), "Order accepted by intake endpoint");
        Ok(())
    }
}
