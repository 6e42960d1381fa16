//! Graph presence client: request building and response handling.

use async_trait::async_trait;
use bridge_core::{PortResult, PreferredPresence, PresenceApi};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, Url};
use serde_json::Value;
use tracing::debug;

use crate::config::GraphConfig;
use crate::error::GraphError;

/// Authenticated client for the presence endpoints of one player.
///
/// Requests are sent once; failures are returned to the caller, which decides how to log them.
#[derive(Debug)]
pub struct GraphClient {
    config: GraphConfig,
    base_url: Url,
    http: reqwest::Client,
}

impl GraphClient {
    pub fn new(config: GraphConfig) -> Result<Self, GraphError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| GraphError::Build(format!("invalid base url {}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(GraphError::Build(format!(
                "base url cannot be a base: {}",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GraphError::Build(e.to_string()))?;

        Ok(Self {
            config,
            base_url,
            http,
        })
    }

    /// `{base}/me/presence`
    pub fn presence_url(&self) -> Result<Url, GraphError> {
        self.endpoint(&["me", "presence"])
    }

    /// `{base}/users/{subject}/presence/setUserPreferredPresence`
    pub fn preferred_presence_url(&self, subject: &str) -> Result<Url, GraphError> {
        self.endpoint(&["users", subject, "presence", "setUserPreferredPresence"])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GraphError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GraphError::Build(format!("base url cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Read the presence of the token's owner, returning the raw JSON body.
    pub async fn fetch_presence(&self) -> Result<Value, GraphError> {
        let url = self.presence_url()?;
        debug!(%url, "Presence read request");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.config.token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let text = response.text().await?;

        serde_json::from_str(&text).map_err(|e| GraphError::Parse(e.to_string()))
    }

    /// Set the preferred presence of `subject`. The response body is ignored.
    pub async fn update_preferred_presence(
        &self,
        subject: &str,
        presence: &PreferredPresence,
    ) -> Result<(), GraphError> {
        let url = self.preferred_presence_url(subject)?;
        debug!(
            %url,
            availability = %presence.availability(),
            activity = %presence.activity(),
            "Preferred presence write request"
        );

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.token)
            .header(CONTENT_TYPE, "application/json")
            .json(presence)
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn check_status(response: Response) -> Result<Response, GraphError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let body = body.chars().take(500).collect::<String>();
        Err(GraphError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl PresenceApi for GraphClient {
    async fn get_presence(&self) -> PortResult<Value> {
        Ok(self.fetch_presence().await?)
    }

    async fn set_preferred_presence(
        &self,
        subject: &str,
        presence: &PreferredPresence,
    ) -> PortResult<()> {
        Ok(self.update_preferred_presence(subject, presence).await?)
    }
}
