use domain::fetch::FetchOutcome;
use std::sync::Arc;

#[async_trait::async_trait]
pub trait UpstreamTilePort: Send + Sync {
    /// Never fails: transport and protocol problems are folded into the outcome.
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

pub type DynUpstreamTilePort = Arc<dyn UpstreamTilePort>;
