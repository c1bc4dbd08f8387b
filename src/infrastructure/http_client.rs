// HTTP adapters for the dashboard service and widget data endpoints
use crate::application::chart_source::{ChartDataSource, FetchError};
use crate::application::dashboard_repository::DashboardRepository;
use crate::domain::dashboard::{DashboardSnapshot, SaveReceipt};
use crate::infrastructure::config::ClientSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

pub const LOAD_PATH: &str = "/api/load_dashboard";
pub const SAVE_PATH: &str = "/api/save_dashboard";

#[derive(Debug, Clone)]
pub struct HttpDashboardRepository {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDashboardRepository {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(settings: &ClientSettings) -> Self {
        Self::new(settings.base_url.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl DashboardRepository for HttpDashboardRepository {
    async fn load_snapshot(&self) -> Result<DashboardSnapshot> {
        let url = self.url(LOAD_PATH);
        tracing::debug!("Loading dashboard from {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send load request to dashboard service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Dashboard load failed with status {}: {}", status, body);
        }

        let payload = response
            .json::<Value>()
            .await
            .context("Failed to parse dashboard service response")?;

        Ok(DashboardSnapshot::decode(payload)?)
    }

    async fn save_snapshot(&self, snapshot: &DashboardSnapshot) -> Result<SaveReceipt> {
        let url = self.url(SAVE_PATH);
        tracing::debug!("Saving {} widgets to {}", snapshot.widgets.len(), url);

        let response = self
            .client
            .post(&url)
            .json(snapshot)
            .send()
            .await
            .context("Failed to send save request to dashboard service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Dashboard save failed with status {}: {}", status, body);
        }

        response
            .json::<SaveReceipt>()
            .await
            .context("Failed to parse save acknowledgement")
    }
}

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches widget payloads from arbitrary endpoints.
#[derive(Debug, Clone)]
pub struct HttpChartDataSource {
    client: reqwest::Client,
    timeout: Duration,
}

impl Default for HttpChartDataSource {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }
}

impl HttpChartDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A hung endpoint fails with a transport error after `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    pub fn from_config(settings: &ClientSettings) -> Self {
        Self::with_timeout(Duration::from_secs(settings.fetch_timeout_secs))
    }
}

#[async_trait]
impl ChartDataSource for HttpChartDataSource {
    async fn fetch(&self, endpoint: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(endpoint)
            .header("Accept", "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                endpoint: endpoint.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|e| FetchError::Body {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }
}
