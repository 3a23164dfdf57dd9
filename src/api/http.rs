//! HTTP implementation of [`SchedulerApi`].
//!
//! Thin reqwest client: resolves endpoint URLs against the configured base,
//! attaches the session cookie, and turns non-success responses into
//! structured errors. The backend reports failures FastAPI-style as
//! `{"detail": "..."}`; the detail text is preferred, then the raw body,
//! then a generic message.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;
use url::Url;

use super::SchedulerApi;
use crate::config::ServerConfig;
use crate::constants::server::SESSION_COOKIE;
use crate::types::{
    ApprovalOutcome, DailyTasks, Goal, NewGoal, OverviewStats, Result, Roadmap, StrideError, Task,
    TaskUpdate,
};

/// reqwest-backed API client with secure session handling
pub struct HttpClient {
    base: Url,
    client: reqwest::Client,
    /// Session cookie value stored securely - never exposed in logs or debug output
    session: Option<SecretString>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base", &self.base.as_str())
            .field("session", &self.session.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HttpClient {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let base = Url::parse(&config.url)
            .map_err(|e| StrideError::config(format!("Invalid server URL: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base,
            client,
            session: config.session.clone().map(SecretString::from),
        })
    }

    /// Append endpoint segments to the base URL, keeping any path component
    /// the base carries (a `Url::join` with a leading slash would drop it).
    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StrideError::config("Server URL cannot be a base URL"))?;
            segments.pop_if_empty();
            for segment in path.trim_start_matches('/').split('/') {
                segments.push(segment);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "Sending request");
        let mut builder = self.client.request(method, url);
        if let Some(session) = &self.session {
            builder = builder.header(
                "Cookie",
                format!("{}={}", SESSION_COOKIE, session.expose_secret()),
            );
        }
        Ok(builder)
    }

    /// Map a response's status: 401 is the uniform session-expiry signal,
    /// other non-success statuses carry the server's message.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(StrideError::SessionExpired);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StrideError::api(status.as_u16(), extract_detail(&body)));
        }
        Ok(response)
    }
}

/// Pull the human-readable message out of an error body.
fn extract_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "request failed".to_string()
            } else {
                trimmed.to_string()
            }
        })
}

#[async_trait]
impl SchedulerApi for HttpClient {
    async fn goal(&self, goal_id: u64) -> Result<Goal> {
        let response = self
            .request(Method::GET, &format!("/goals/{}", goal_id))?
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn goals(&self, status: Option<&str>) -> Result<Vec<Goal>> {
        let mut builder = self.request(Method::GET, "/goals")?;
        if let Some(status) = status {
            builder = builder.query(&[("status", status)]);
        }
        let response = builder.send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_goal(&self, goal: &NewGoal) -> Result<Goal> {
        let response = self
            .request(Method::POST, "/goals")?
            .json(goal)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete_goal(&self, goal_id: u64) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/goals/{}", goal_id))?
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn roadmap(&self, goal_id: u64) -> Result<Roadmap> {
        let response = self
            .request(Method::GET, &format!("/goals/{}/roadmap", goal_id))?
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn generate_roadmap(&self, goal_id: u64) -> Result<Roadmap> {
        let response = self
            .request(Method::POST, &format!("/goals/{}/roadmap", goal_id))?
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn approve_roadmap(&self, roadmap_id: u64) -> Result<ApprovalOutcome> {
        let response = self
            .request(Method::PUT, &format!("/roadmaps/{}/approve", roadmap_id))?
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn refine_roadmap(&self, roadmap_id: u64, feedback: &str) -> Result<Roadmap> {
        let response = self
            .request(Method::POST, &format!("/roadmaps/{}/refine", roadmap_id))?
            .json(&json!({ "feedback": feedback }))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn today(&self) -> Result<DailyTasks> {
        let response = self.request(Method::GET, "/tasks/today")?.send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update_task(&self, task_id: u64, update: &TaskUpdate) -> Result<Task> {
        let response = self
            .request(Method::PUT, &format!("/tasks/{}", task_id))?
            .json(update)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn overview(&self) -> Result<OverviewStats> {
        let response = self.request(Method::GET, "/stats/overview")?.send().await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail_prefers_fastapi_shape() {
        assert_eq!(
            extract_detail(r#"{"detail": "Goal not found"}"#),
            "Goal not found"
        );
    }

    #[test]
    fn test_extract_detail_falls_back_to_body() {
        assert_eq!(extract_detail("plain failure text"), "plain failure text");
        assert_eq!(extract_detail(r#"{"error": "other shape"}"#), r#"{"error": "other shape"}"#);
    }

    #[test]
    fn test_extract_detail_generic_on_empty() {
        assert_eq!(extract_detail(""), "request failed");
        assert_eq!(extract_detail("   "), "request failed");
    }

    #[test]
    fn test_endpoint_keeps_base_path_component() {
        let config = ServerConfig {
            url: "http://host/scheduler".to_string(),
            ..ServerConfig::default()
        };
        let client = HttpClient::new(&config).expect("client");
        let url = client.endpoint("/goals/7/roadmap").expect("endpoint");
        assert_eq!(url.as_str(), "http://host/scheduler/goals/7/roadmap");

        // A trailing slash on the base must not double up
        let config = ServerConfig {
            url: "http://host/scheduler/".to_string(),
            ..ServerConfig::default()
        };
        let client = HttpClient::new(&config).expect("client");
        let url = client.endpoint("/tasks/today").expect("endpoint");
        assert_eq!(url.as_str(), "http://host/scheduler/tasks/today");
    }

    #[test]
    fn test_endpoint_against_host_root() {
        let client = HttpClient::new(&ServerConfig::default()).expect("client");
        let url = client.endpoint("/stats/overview").expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost:8000/stats/overview");
    }

    #[test]
    fn test_debug_redacts_session() {
        let config = ServerConfig {
            session: Some("uid.signature".to_string()),
            ..ServerConfig::default()
        };
        let client = HttpClient::new(&config).expect("client");
        let rendered = format!("{:?}", client);
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("uid.signature"));
    }
}
