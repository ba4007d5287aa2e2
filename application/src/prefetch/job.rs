use domain::{
    prefetch::{PrefetchProgress, PrefetchRegion, PrefetchTileOutcome},
    product::Product,
    tile::TileAddress,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::tiles::{gateway::TileGateway, resolver};

/// One background download pass over a region. Tiles already on disk are skipped;
/// failures are counted and never retried.
pub struct PrefetchJob {
    id: Uuid,
    product: Product,
    region: PrefetchRegion,
    gateway: TileGateway,
}

impl PrefetchJob {
    #[must_use]
    pub fn new(product: Product, region: PrefetchRegion, gateway: TileGateway) -> Self {
        Self {
            id: Uuid::new_v4(),
            product,
            region,
            gateway,
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[instrument(skip(self), fields(job_id = %self.id, product = %self.product.id, zoom = self.region.zoom))]
    pub async fn run(self) -> PrefetchProgress {
        let total = self.region.tile_count();
        info!(
            total,
            rows = %self.region.rows,
            cols = %self.region.cols,
            "Prefetch started"
        );

        let mut progress = PrefetchProgress::default();
        for (row, col) in self.region.coordinates() {
            let outcome = self.process_tile(row, col).await;
            progress.record(outcome);
            info!(
                row,
                col,
                outcome = ?outcome,
                "Prefetch progress {}/{}",
                progress.processed(),
                total
            );
        }

        info!(
            downloaded = progress.downloaded,
            skipped = progress.skipped,
            failed = progress.failed,
            "Prefetch finished"
        );
        progress
    }

    async fn process_tile(&self, row: u32, col: u32) -> PrefetchTileOutcome {
        let address = TileAddress::new(self.product.id.clone(), self.region.zoom, row, col);
        let key = resolver::cache_key(&address, self.product.format);

        match self.gateway.is_persisted(&key).await {
            Ok(true) => return PrefetchTileOutcome::Skipped,
            Ok(false) => {}
            Err(e) => {
                warn!(error = %e, "Could not check stored tile {}", key);
                return PrefetchTileOutcome::Failed;
            }
        }

        match self
            .gateway
            .fetch_and_persist(&self.product, &address, &key)
            .await
        {
            Ok(Some(_)) => PrefetchTileOutcome::Downloaded,
            Ok(None) => PrefetchTileOutcome::Failed,
            Err(e) => {
                warn!(error = %e, "Failed to store prefetched tile {}", key);
                PrefetchTileOutcome::Failed
            }
        }
    }
}
