//! HTTP client for the garden controller backend.

use reqwest::{Client, Response};

use crate::config::DashboardConfig;
use crate::device::{DeviceStatus, ValveCommand};
use crate::error::{DashboardError, Result};

/// Cheap to clone; every clone shares one connection pool.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    http: Client,
    base_url: String,
    device_id: String,
}

impl DeviceClient {
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.polling.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.device.base_url.trim_end_matches('/').to_string(),
            device_id: config.device.device_id.clone(),
        })
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn status_url(&self) -> String {
        format!("{}/sensor/{}/status", self.base_url, self.device_id)
    }

    pub fn valve_url(&self) -> String {
        format!("{}/sensor/{}/valve", self.base_url, self.device_id)
    }

    #[tracing::instrument(skip(self), fields(device = %self.device_id))]
    pub async fn fetch_status(&self) -> Result<DeviceStatus> {
        let url = self.status_url();
        let response = self.http.get(&url).send().await?;
        let response = Self::check_status(url, response)?;
        Ok(response.json::<DeviceStatus>().await?)
    }

    /// The response body is ignored; only transport and status failures count.
    #[tracing::instrument(skip(self), fields(device = %self.device_id))]
    pub async fn set_valve(&self, command: ValveCommand) -> Result<()> {
        let url = self.valve_url();
        let response = self.http.post(&url).json(&command).send().await?;
        Self::check_status(url, response)?;
        Ok(())
    }

    fn check_status(url: String, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(DashboardError::UnexpectedStatus { url, status })
        }
    }
}
