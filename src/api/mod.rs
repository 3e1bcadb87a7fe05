//! Client for the external defense-mesh backend API.
//!
//! The server side is out of scope; this client consumes three endpoints
//! (live threat polling, threat submission, report generation) with no
//! authentication, retries, or backoff.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::models::threat::{LiveThreat, SubmitThreat};

/// Errors that can occur talking to the backend
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("submission rejected: {0}")]
    Rejected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct LiveThreatsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    threats: Vec<LiveThreat>,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a client for the given base URL, e.g.
    /// `http://localhost:5001/api`.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        ApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Poll the full live threat list. Returns `Ok(None)` when the server
    /// answered but did not confirm success or sent a malformed payload;
    /// callers treat that as "no update".
    pub async fn fetch_live_threats(&self) -> Result<Option<Vec<LiveThreat>>, ApiError> {
        let response = self.client.get(self.url("live-threats")).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        match response.json::<LiveThreatsResponse>().await {
            Ok(body) if body.success => Ok(Some(body.threats)),
            Ok(_) => Ok(None),
            Err(e) => {
                log::debug!("Malformed live-threats payload: {}", e);
                Ok(None)
            }
        }
    }

    /// Submit a user-entered threat for monitoring. Returns the server's
    /// confirmation message.
    pub async fn submit_threat(&self, threat: &SubmitThreat) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.url("submit-threat"))
            .json(threat)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let body: SubmitResponse = response.json().await?;
        if body.success {
            Ok(body
                .message
                .unwrap_or_else(|| "Threat submitted successfully".to_string()))
        } else {
            Err(ApiError::Rejected(
                body.message.unwrap_or_else(|| "unspecified".to_string()),
            ))
        }
    }

    /// Request a PDF report over the live threat list and return its bytes.
    pub async fn generate_report(&self) -> Result<Vec<u8>, ApiError> {
        let response = self
            .client
            .post(self.url("reports/generate/live-threats"))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Generate a report and save it under `dir` with an epoch-millisecond
    /// file name. Returns the written path.
    pub async fn download_report(&self, dir: &Path) -> Result<PathBuf, ApiError> {
        let bytes = self.generate_report().await?;
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(report_file_name(Utc::now().timestamp_millis()));
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

/// `live_threats_report_<epoch-ms>.pdf`
pub fn report_file_name(epoch_millis: i64) -> String {
    format!("live_threats_report_{}.pdf", epoch_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building_strips_trailing_slash() {
        let client = ApiClient::new("http://localhost:5001/api/", Duration::from_secs(5));
        assert_eq!(
            client.url("live-threats"),
            "http://localhost:5001/api/live-threats"
        );
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(
            report_file_name(1_700_000_000_000),
            "live_threats_report_1700000000000.pdf"
        );
    }

    #[test]
    fn test_missing_success_field_means_no_update() {
        let body: LiveThreatsResponse = serde_json::from_str(r#"{"threats": []}"#).unwrap();
        assert!(!body.success);

        let body: LiveThreatsResponse =
            serde_json::from_str(r#"{"success": true, "threats": []}"#).unwrap();
        assert!(body.success);
        assert!(body.threats.is_empty());
    }

    #[test]
    fn test_submit_response_defaults() {
        let body: SubmitResponse = serde_json::from_str("{}").unwrap();
        assert!(!body.success);
        assert!(body.message.is_none());
    }
}
