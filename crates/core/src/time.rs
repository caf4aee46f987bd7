//! Current time lookup
//!
//! Asks an external time API first and falls back to the local clock on any
//! failure, so callers always get an answer.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::{Error, Result};

pub const DEFAULT_TIME_API_URL: &str = "https://timeapi.io";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

pub const EXTERNAL_SOURCE: &str = "TimeAPI.io (External)";
pub const FALLBACK_SOURCE: &str = "System Time (Fallback)";

/// Friendly timezone names and their IANA identifiers
pub const TIMEZONES: &[(&str, &str)] = &[
    ("UTC", "UTC"),
    ("Eastern", "America/New_York"),
    ("Central", "America/Chicago"),
    ("Mountain", "America/Denver"),
    ("Pacific", "America/Los_Angeles"),
    ("London", "Europe/London"),
    ("Beijing", "Asia/Shanghai"),
];

/// Map a friendly name to its IANA zone; unknown names become UTC
pub fn iana_timezone(name: &str) -> &'static str {
    TIMEZONES
        .iter()
        .find(|(friendly, _)| *friendly == name)
        .map(|(_, iana)| *iana)
        .unwrap_or("UTC")
}

/// Answer of a time lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeView {
    pub utc_datetime: String,
    pub timezone: String,
    pub source: String,
}

/// Source of the current time
#[async_trait]
pub trait TimeProvider: Send + Sync {
    async fn current_time(&self, timezone: &str) -> Result<TimeView>;
}

#[derive(Debug, Clone)]
pub struct TimeConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TIME_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UpstreamTime {
    #[serde(rename = "dateTime")]
    date_time: String,
}

/// Time lookup against timeapi.io with a local clock fallback
pub struct TimeService {
    client: reqwest::Client,
    base_url: String,
}

impl TimeService {
    pub fn new(config: TimeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Time(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_external(&self, iana: &str) -> Result<String> {
        let url = format!(
            "{}/api/Time/current/zone?timeZone={}",
            self.base_url,
            urlencoding::encode(iana)
        );
        debug!("Requesting time from {}", url);

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, "TaskTracker/1.0")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Time(e.to_string()))?;

        let body: UpstreamTime = response
            .json()
            .await
            .map_err(|e| Error::Time(format!("Malformed time response: {}", e)))?;
        Ok(body.date_time)
    }
}

/// Local UTC clock reading in the upstream's format
pub fn system_time(timezone: &str) -> TimeView {
    TimeView {
        utc_datetime: Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
        timezone: timezone.to_string(),
        source: FALLBACK_SOURCE.to_string(),
    }
}

#[async_trait]
impl TimeProvider for TimeService {
    async fn current_time(&self, timezone: &str) -> Result<TimeView> {
        match self.fetch_external(iana_timezone(timezone)).await {
            Ok(utc_datetime) => Ok(TimeView {
                utc_datetime,
                timezone: timezone.to_string(),
                source: EXTERNAL_SOURCE.to_string(),
            }),
            Err(e) => {
                warn!("Time API request failed, using system time: {}", e);
                Ok(system_time(timezone))
            }
        }
    }
}
