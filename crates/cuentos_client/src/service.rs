//! The generation service seam.

use async_trait::async_trait;
use cuentos_core::{
    HeroesRequest, ScrapeRequest, StageReply, StoryRequest, SummaryRequest, VillainsRequest,
};
use cuentos_error::TransportError;

/// Outcome of one exchange: a parsed reply, or a transport failure.
pub type ServiceReply = Result<StageReply<String>, TransportError>;

/// One JSON request/response exchange per workflow stage.
///
/// Implementations keep no state between calls and never retry.
#[async_trait]
pub trait StoryService: Send + Sync {
    /// `/resumen`: generate the summary.
    async fn summary(&self, request: &SummaryRequest) -> ServiceReply;

    /// `/villanos`: newline-delimited villain candidates for a summary.
    async fn villains(&self, request: &VillainsRequest) -> ServiceReply;

    /// `/heroes`: newline-delimited hero candidates for a summary and villain.
    async fn heroes(&self, request: &HeroesRequest) -> ServiceReply;

    /// `/historia`: the final story.
    async fn story(&self, request: &StoryRequest) -> ServiceReply;

    /// `/scrape`: fetch a page server-side so its text seeds the next summary.
    /// Succeeds with the path of the stored text file.
    async fn scrape(&self, request: &ScrapeRequest) -> ServiceReply;
}
