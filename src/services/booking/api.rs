use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::booking::{Booking, BookingPatch};
use crate::models::room::Room;
use crate::models::settings::GridSettings;

/// Data-access collaborator of the grid: the booking REST API.
#[cfg_attr(test, mockall::automock)]
pub trait BookingApi: Send + Sync {
    fn fetch_rooms(&self) -> Result<Vec<Room>, ApiError>;
    fn fetch_bookings(&self) -> Result<Vec<Booking>, ApiError>;
    /// Partial update; returns the booking as stored by the server
    fn update_booking(&self, id: i64, patch: &BookingPatch) -> Result<Booking, ApiError>;
}

pub struct HttpBookingApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBookingApi {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .context("Failed to build booking API HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn from_settings(settings: &GridSettings) -> Result<Self> {
        Self::new(&settings.api_base_url, settings.auth_token.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = if body.trim().is_empty() {
                format!("Request failed with status {}", status.as_u16())
            } else {
                body
            };
            log::error!("Booking API returned {}: {}", status, message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl BookingApi for HttpBookingApi {
    fn fetch_rooms(&self) -> Result<Vec<Room>, ApiError> {
        self.send(self.request(Method::GET, "/api/rooms"))
    }

    fn fetch_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.send(self.request(Method::GET, "/api/bookings"))
    }

    fn update_booking(&self, id: i64, patch: &BookingPatch) -> Result<Booking, ApiError> {
        let path = format!("/api/bookings/{}", id);
        self.send(self.request(Method::PUT, &path).json(patch))
    }
}
