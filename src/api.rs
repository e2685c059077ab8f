// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the device API.
//!
//! Typed wrappers over the four endpoints the server exposes:
//! `GET /devices`, `POST /devices`, `POST /devices/{id}/toggle` and
//! `DELETE /devices/{id}`. All payloads are JSON. Any non-2xx response
//! becomes a [`ServerError`] carrying the server-supplied message when
//! the body has one; delivery failures (including timeouts) surface as
//! [`TransportError`].

use std::time::Duration;

use reqwest::Client;

use crate::device::{Device, NewDevice};
use crate::error::{Error, Result, ServerError, TransportError};
use crate::types::DeviceId;

/// Configuration for the device API endpoint.
///
/// # Examples
///
/// ```
/// use homelink_lib::api::ApiConfig;
/// use std::time::Duration;
///
/// let config = ApiConfig::new("192.168.1.10:3000")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "http://192.168.1.10:3000");
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
}

impl ApiConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given server address.
    ///
    /// A bare `host:port` is assumed to be `http://`.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        let address = address.into();
        let address = address.trim().trim_end_matches('/');
        let base_url = if address.is_empty() {
            String::new()
        } else if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else {
            format!("http://{address}")
        };

        Self {
            base_url,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates an [`ApiClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be created.
    pub fn into_client(self) -> std::result::Result<ApiClient, TransportError> {
        if self.base_url.is_empty() {
            return Err(TransportError::InvalidAddress(
                "address is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(TransportError::Http)?;

        Ok(ApiClient {
            base_url: self.base_url,
            client,
        })
    }
}

/// Client for the device API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Creates a client for the given server address with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(address: impl Into<String>) -> std::result::Result<Self, TransportError> {
        ApiConfig::new(address).into_client()
    }

    /// Returns the base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the complete device set.
    ///
    /// # Errors
    ///
    /// Returns error on delivery failure or a non-2xx response.
    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        let url = format!("{}/devices", self.base_url);
        tracing::debug!(url = %url, "Fetching device list");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(TransportError::Http)?;
        let response = check_status(response).await?;

        let devices: Vec<Device> = response.json().await.map_err(TransportError::Http)?;
        tracing::debug!(count = devices.len(), "Received device list");
        Ok(devices)
    }

    /// Creates a device from a fully-validated payload.
    ///
    /// Returns the created record as acknowledged by the server.
    ///
    /// # Errors
    ///
    /// Returns error on delivery failure or a non-2xx response.
    pub async fn create_device(&self, payload: &NewDevice) -> Result<Device> {
        let url = format!("{}/devices", self.base_url);
        tracing::debug!(url = %url, name = %payload.name, port = %payload.relay_port, "Creating device");

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(TransportError::Http)?;
        let response = check_status(response).await?;

        let device: Device = response.json().await.map_err(TransportError::Http)?;
        tracing::debug!(id = %device.id, "Device created");
        Ok(device)
    }

    /// Toggles a device's status.
    ///
    /// The response body is not interpreted; the caller refetches the
    /// device set afterward rather than trusting a partial update.
    ///
    /// # Errors
    ///
    /// Returns error on delivery failure or a non-2xx response.
    pub async fn toggle_device(&self, id: DeviceId) -> Result<()> {
        let url = format!("{}/devices/{id}/toggle", self.base_url);
        tracing::debug!(url = %url, "Toggling device");

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(TransportError::Http)?;
        check_status(response).await?;
        Ok(())
    }

    /// Deletes a device.
    ///
    /// # Errors
    ///
    /// Returns error on delivery failure or a non-2xx response.
    pub async fn delete_device(&self, id: DeviceId) -> Result<()> {
        let url = format!("{}/devices/{id}", self.base_url);
        tracing::debug!(url = %url, "Deleting device");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(TransportError::Http)?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turns a non-2xx response into a [`ServerError`], extracting the
/// server-supplied message from the body when present.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.ok().and_then(|body| extract_message(&body));
    tracing::debug!(status = status.as_u16(), message = ?message, "Server returned error");

    Err(Error::Server(ServerError {
        status: status.as_u16(),
        message,
    }))
}

/// Pulls a human-readable message out of a JSON error body.
///
/// The server reports errors as `{"error": "..."}` or `{"message": "..."}`.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"].iter().find_map(|key| {
        value
            .get(key)
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_adds_http_scheme() {
        let config = ApiConfig::new("192.168.1.10:3000");
        assert_eq!(config.base_url(), "http://192.168.1.10:3000");
    }

    #[test]
    fn config_keeps_explicit_scheme() {
        let config = ApiConfig::new("https://hub.local");
        assert_eq!(config.base_url(), "https://hub.local");
    }

    #[test]
    fn config_strips_trailing_slash() {
        let config = ApiConfig::new("http://hub.local/");
        assert_eq!(config.base_url(), "http://hub.local");
    }

    #[test]
    fn config_default_timeout() {
        let config = ApiConfig::new("hub.local");
        assert_eq!(config.timeout(), ApiConfig::DEFAULT_TIMEOUT);
    }

    #[test]
    fn empty_address_is_rejected() {
        let result = ApiConfig::new("").into_client();
        assert!(matches!(result, Err(TransportError::InvalidAddress(_))));
    }

    #[test]
    fn extract_message_reads_error_key() {
        assert_eq!(
            extract_message(r#"{"error": "port taken"}"#),
            Some("port taken".to_string())
        );
    }

    #[test]
    fn extract_message_reads_message_key() {
        assert_eq!(
            extract_message(r#"{"message": "not found"}"#),
            Some("not found".to_string())
        );
    }

    #[test]
    fn extract_message_prefers_error_key() {
        assert_eq!(
            extract_message(r#"{"error": "a", "message": "b"}"#),
            Some("a".to_string())
        );
    }

    #[test]
    fn extract_message_tolerates_non_json_bodies() {
        assert_eq!(extract_message("<html>oops</html>"), None);
        assert_eq!(extract_message(""), None);
        assert_eq!(extract_message(r#"{"error": 42}"#), None);
    }
}
