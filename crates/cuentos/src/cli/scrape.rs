//! Page scraping command handler.

use super::run::load_config;
use cuentos::{
    CuentosResult, Endpoint, GenerationError, HttpStoryClient, ScrapeRequest, StageReply,
    StoryService,
};
use std::path::Path;
use tracing::{info, instrument};

/// Ask the service to fetch `url`; prints where the extracted text was stored.
#[instrument(skip(config, base_url))]
pub async fn scrape_page(
    url: &str,
    config: Option<&Path>,
    base_url: Option<&str>,
) -> CuentosResult<()> {
    let (service, _) = load_config(config, base_url, None)?.into_parts();
    let client = HttpStoryClient::new(service)?;

    let request = ScrapeRequest {
        url: url.to_string(),
    };
    match client.scrape(&request).await? {
        StageReply::Success(path) => {
            info!(%path, "Page text stored");
            println!("{}", path);
            Ok(())
        }
        StageReply::BusinessError(message) => {
            Err(GenerationError::new(Endpoint::Scrape.path(), message).into())
        }
    }
}
