//! HTTP client for the relay API

use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Outcome of a message submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Accepted,
    /// The relay already accepted an identical body; non-fatal
    Duplicate,
}

#[derive(Deserialize)]
struct ResponseBody {
    response: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.unwrap_or_else(|| "http://localhost:5001/api/v1".to_string()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a message for relay to the consumer
    pub async fn send_message(&self, message: &str) -> Result<SendOutcome> {
        let url = format!("{}/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(SendOutcome::Accepted);
        }
        if status == StatusCode::BAD_REQUEST {
            if let Ok(body) = response.json::<ErrorBody>().await {
                if body.error.contains("already processed") {
                    return Ok(SendOutcome::Duplicate);
                }
                anyhow::bail!("Server rejected message: {}", body.error);
            }
        }
        anyhow::bail!("Server returned error: {}", status)
    }

    /// Single probe for the next unseen reply
    ///
    /// `None` covers both "no reply yet" and "caught up"; either way the
    /// caller should keep polling.
    pub async fn latest_response(&self) -> Result<Option<String>> {
        let url = format!("{}/response/latest", self.base_url);
        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::OK => {
                let body: ResponseBody = response.json().await?;
                Ok(Some(body.response))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => anyhow::bail!("Server returned error: {}", status),
        }
    }

    /// Poll for a reply until `timeout` expires
    pub async fn wait_for_response(
        &self,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<Option<String>> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if let Some(text) = self.latest_response().await? {
                return Ok(Some(text));
            }
            if tokio::time::Instant::now() >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Check that the relay answers at all
    ///
    /// Sends a validation-only request (empty message, always rejected),
    /// which proves reachability without touching relay state.
    pub async fn probe(&self) -> bool {
        let url = format!("{}/chat", self.base_url);
        self.client
            .post(&url)
            .json(&serde_json::json!({ "message": "" }))
            .send()
            .await
            .is_ok()
    }
}
