//! reqwest-backed [`StoryService`].

use crate::{ServiceConfig, ServiceReply, StoryService};
use async_trait::async_trait;
use cuentos_core::{
    Endpoint, HeroesRequest, ScrapeRequest, StageReply, StoryRequest, SummaryRequest,
    VillainsRequest,
};
use cuentos_error::{TransportError, TransportErrorKind};
use serde::Serialize;
use tracing::instrument;

/// Client for the story generation service.
#[derive(Debug, Clone)]
pub struct HttpStoryClient {
    config: ServiceConfig,
    client: reqwest::Client,
}

impl HttpStoryClient {
    /// Create a new client.
    #[instrument(skip(config), fields(base_url = %config.base_url()))]
    pub fn new(config: ServiceConfig) -> Result<Self, TransportError> {
        tracing::debug!("Creating story service client");
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            TransportError::new(TransportErrorKind::ClientCreation(e.to_string()))
        })?;
        Ok(Self { config, client })
    }

    /// Get the service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Full URL for `endpoint`.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}{}",
            self.config.base_url().trim_end_matches('/'),
            endpoint.path()
        )
    }

    /// POST `body` to `endpoint` and classify the reply.
    ///
    /// The HTTP status does not decide the outcome: the service sends its
    /// `error` bodies with 4xx/5xx codes, and those are business errors.
    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    async fn post<B>(&self, endpoint: Endpoint, body: &B) -> ServiceReply
    where
        B: Serialize + Sync,
    {
        let url = self.endpoint_url(endpoint);
        tracing::debug!("Sending request to {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request failed: {}", e);
                TransportError::new(TransportErrorKind::Send(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "Service returned non-success status");
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            TransportError::new(TransportErrorKind::Body(e.to_string()))
        })?;

        let reply = StageReply::from_slice(endpoint, &bytes).inspect_err(|e| {
            tracing::error!(%status, "Failed to decode reply: {}", e);
        })?;

        match &reply {
            StageReply::Success(text) => tracing::debug!(len = text.len(), "Reply received"),
            StageReply::BusinessError(message) => {
                tracing::warn!(%message, "Service reported an error")
            }
        }
        Ok(reply)
    }
}

#[async_trait]
impl StoryService for HttpStoryClient {
    async fn summary(&self, request: &SummaryRequest) -> ServiceReply {
        self.post(Endpoint::Summary, request).await
    }

    async fn villains(&self, request: &VillainsRequest) -> ServiceReply {
        self.post(Endpoint::Villains, request).await
    }

    async fn heroes(&self, request: &HeroesRequest) -> ServiceReply {
        self.post(Endpoint::Heroes, request).await
    }

    async fn story(&self, request: &StoryRequest) -> ServiceReply {
        self.post(Endpoint::Story, request).await
    }

    async fn scrape(&self, request: &ScrapeRequest) -> ServiceReply {
        self.post(Endpoint::Scrape, request).await
    }
}
