//! Scripted story service for testing.

use async_trait::async_trait;
use cuentos_client::{ServiceReply, StoryService};
use cuentos_core::{
    Endpoint, HeroesRequest, ScrapeRequest, StageReply, StoryRequest, SummaryRequest,
    VillainsRequest,
};
use cuentos_error::{TransportError, TransportErrorKind};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// One scripted outcome for an endpoint.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Success field present with this text
    Success(String),
    /// `error` field present with this message
    Business(String),
    /// Request never produced a readable reply
    Transport,
}

impl MockReply {
    fn into_reply(self) -> ServiceReply {
        match self {
            MockReply::Success(text) => Ok(StageReply::Success(text)),
            MockReply::Business(message) => Ok(StageReply::BusinessError(message)),
            MockReply::Transport => Err(TransportError::new(TransportErrorKind::Send(
                "connection refused".to_string(),
            ))),
        }
    }
}

/// Story service that answers from a script and records every request body.
///
/// Endpoints without a script fail at the transport level.
#[derive(Debug, Default)]
pub struct MockStoryService {
    script: HashMap<Endpoint, MockReply>,
    calls: Mutex<Vec<(Endpoint, Value)>>,
}

impl MockStoryService {
    /// Service with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Service scripted for a full run: summary `S`, villains `A`/`B`/`C`,
    /// heroes `X`/`Y`, story `The End`.
    pub fn happy_path() -> Self {
        Self::new()
            .with(Endpoint::Summary, MockReply::Success("S".into()))
            .with(Endpoint::Villains, MockReply::Success("A\nB\nC".into()))
            .with(Endpoint::Heroes, MockReply::Success("X\nY".into()))
            .with(Endpoint::Story, MockReply::Success("The End".into()))
    }

    /// Script `endpoint`, replacing any earlier script.
    pub fn with(mut self, endpoint: Endpoint, reply: MockReply) -> Self {
        self.script.insert(endpoint, reply);
        self
    }

    /// Every request so far, in order.
    pub fn calls(&self) -> Vec<(Endpoint, Value)> {
        self.calls.lock().unwrap().clone()
    }

    /// Endpoints hit so far, in order.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.calls().into_iter().map(|(e, _)| e).collect()
    }

    /// Body of the most recent request to `endpoint`.
    pub fn body(&self, endpoint: Endpoint) -> Option<Value> {
        self.calls()
            .into_iter()
            .rev()
            .find(|(e, _)| *e == endpoint)
            .map(|(_, body)| body)
    }

    fn answer<B: Serialize>(&self, endpoint: Endpoint, body: &B) -> ServiceReply {
        let body = serde_json::to_value(body).unwrap();
        self.calls.lock().unwrap().push((endpoint, body));
        self.script
            .get(&endpoint)
            .cloned()
            .unwrap_or(MockReply::Transport)
            .into_reply()
    }
}

#[async_trait]
impl StoryService for MockStoryService {
    async fn summary(&self, request: &SummaryRequest) -> ServiceReply {
        self.answer(Endpoint::Summary, request)
    }

    async fn villains(&self, request: &VillainsRequest) -> ServiceReply {
        self.answer(Endpoint::Villains, request)
    }

    async fn heroes(&self, request: &HeroesRequest) -> ServiceReply {
        self.answer(Endpoint::Heroes, request)
    }

    async fn story(&self, request: &StoryRequest) -> ServiceReply {
        self.answer(Endpoint::Story, request)
    }

    async fn scrape(&self, request: &ScrapeRequest) -> ServiceReply {
        self.answer(Endpoint::Scrape, request)
    }
}
