//! # HTTP Inventory Client
//!
//! reqwest-backed implementation of [`InventoryClient`].
//!
//! Every request runs under the configured timeout; HTTP statuses map
//! into the [`ClientError`] taxonomy (404 → not found, 422 → insufficient
//! stock, 400 → invalid request, 5xx → connection).
//!
//! # Examples
//!
//! ```
//! use stockroom::infrastructure::remote::http_client::HttpInventoryClient;
//!
//! let client = HttpInventoryClient::new("http://localhost:8081", 5000).unwrap();
//! assert_eq!(client.timeout_ms(), 5000);
//! ```

use crate::domain::value_objects::ProductId;
use crate::infrastructure::remote::contracts::{
    AvailabilityResponse, ReserveRequest, ReserveResponse,
};
use crate::infrastructure::remote::error::{ClientError, ClientResult};
use crate::infrastructure::remote::traits::InventoryClient;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP implementation of [`InventoryClient`].
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    /// Inner reqwest client.
    client: Client,
    /// Base URL of the inventory service, without trailing slash.
    base_url: String,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpInventoryClient {
    /// Creates a new client against `base_url` with the given timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Internal`] if the underlying client cannot
    /// be constructed.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| {
                ClientError::internal(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_ms,
        })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Returns the configured base URL.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ClientResult<T> {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| {
                ClientError::protocol(format!("failed to parse response: {}", e))
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(map_status_error(status, &body))
        }
    }
}

/// Maps a reqwest error to a [`ClientError`].
fn map_reqwest_error(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::timeout("request timed out")
    } else if error.is_connect() {
        ClientError::connection(format!("connection failed: {}", error))
    } else {
        ClientError::connection(format!("request failed: {}", error))
    }
}

/// Maps an HTTP status code to a [`ClientError`].
fn map_status_error(status: StatusCode, body: &str) -> ClientError {
    match status {
        StatusCode::NOT_FOUND => ClientError::not_found(format!("not found: {}", body)),
        StatusCode::UNPROCESSABLE_ENTITY => {
            ClientError::insufficient_stock(format!("insufficient stock: {}", body))
        }
        StatusCode::BAD_REQUEST => ClientError::invalid_request(format!("bad request: {}", body)),
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => {
            ClientError::connection(format!("server error ({}): {}", status, body))
        }
        _ => ClientError::protocol(format!("unexpected status ({}): {}", status, body)),
    }
}

#[async_trait]
impl InventoryClient for HttpInventoryClient {
    async fn fetch_availability(
        &self,
        product_id: ProductId,
    ) -> ClientResult<AvailabilityResponse> {
        let url = format!("{}/inventory/{}", self.base_url, product_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        self.handle_response(response).await
    }

    async fn reserve(&self, request: &ReserveRequest) -> ClientResult<ReserveResponse> {
        let url = format!("{}/inventory/reserve", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        self.handle_response(response).await
    }
}
