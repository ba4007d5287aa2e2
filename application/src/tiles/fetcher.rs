use domain::{
    fetch::FetchOutcome,
    product::Product,
    tile::{DecodedTile, TileAddress},
};
use tracing::{debug, info, warn};

use crate::ports::outgoing::{codec_offload::DynCodecOffloadPort, upstream::DynUpstreamTilePort};

use super::resolver;

#[derive(Debug)]
pub enum FetchedTile {
    Fetched(DecodedTile),
    Unavailable(FetchOutcome),
}

/// Pulls one tile from upstream and decodes it. Failures are logged here and never raised.
#[derive(Clone)]
pub struct TileFetcher {
    upstream: DynUpstreamTilePort,
    codec: DynCodecOffloadPort,
}

impl TileFetcher {
    pub fn new(upstream: DynUpstreamTilePort, codec: DynCodecOffloadPort) -> Self {
        Self { upstream, codec }
    }

    pub async fn fetch(&self, product: &Product, address: &TileAddress) -> FetchedTile {
        let url = resolver::upstream_url(address, product);
        debug!(%url, "Fetching tile {} from upstream", address);

        match self.upstream.fetch(&url).await {
            FetchOutcome::Success(body) => {
                let body_len = body.len();
                match self.codec.decode(body).await {
                    Ok(tile) => {
                        debug!(
                            "Fetched tile {} ({} bytes, {}x{})",
                            address,
                            body_len,
                            tile.width(),
                            tile.height()
                        );
                        FetchedTile::Fetched(tile)
                    }
                    Err(e) => {
                        warn!(%url, error = %e, "Upstream tile {} could not be decoded", address);
                        FetchedTile::Unavailable(FetchOutcome::InvalidContent(e.to_string()))
                    }
                }
            }
            FetchOutcome::NotAvailable => {
                info!(%url, "Tile {} not available upstream", address);
                FetchedTile::Unavailable(FetchOutcome::NotAvailable)
            }
            failure => {
                warn!(%url, outcome = %failure, "Upstream fetch failed for tile {}", address);
                FetchedTile::Unavailable(failure)
            }
        }
    }
}
