use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use domain::{prefetch::PrefetchRegion, product::ProductId};

use crate::{
    error::AppResult,
    ports::{incoming::prefetch::PrefetchUseCase, outgoing::task_spawn::DynTaskSpawnPort},
    products::registry::ProductRegistry,
    tiles::gateway::TileGateway,
};

use super::job::PrefetchJob;

#[derive(Debug, Clone)]
pub struct PrefetchTicket {
    pub job_id: Uuid,
    pub product_id: ProductId,
    pub product_name: String,
    pub region: PrefetchRegion,
    pub total_tiles: u64,
}

pub struct PrefetchService {
    registry: Arc<ProductRegistry>,
    gateway: TileGateway,
    task_spawn: DynTaskSpawnPort,
}

impl PrefetchService {
    pub fn new(
        registry: Arc<ProductRegistry>,
        gateway: TileGateway,
        task_spawn: DynTaskSpawnPort,
    ) -> Arc<Self> {
        Arc::new(Self {
            registry,
            gateway,
            task_spawn,
        })
    }

    #[instrument(skip(self))]
    pub fn schedule(&self, product_id: &str, region: PrefetchRegion) -> AppResult<PrefetchTicket> {
        let product = self.registry.lookup(product_id)?;
        ProductRegistry::ensure_zoom(product, region.zoom)?;

        let job = PrefetchJob::new(product.clone(), region, self.gateway.clone());
        let ticket = PrefetchTicket {
            job_id: job.id(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            region,
            total_tiles: region.tile_count(),
        };

        info!(
            job_id = %ticket.job_id,
            total = ticket.total_tiles,
            "Scheduling prefetch for {} z{} rows {} cols {}",
            product.id,
            region.zoom,
            region.rows,
            region.cols
        );

        self.task_spawn.spawn(
            "prefetch",
            Box::pin(async move {
                job.run().await;
            }),
        );

        Ok(ticket)
    }
}

impl PrefetchUseCase for PrefetchService {
    fn schedule_prefetch(&self, product: &str, region: PrefetchRegion) -> AppResult<PrefetchTicket> {
        self.schedule(product, region)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        test_support::{CollectingSpawner, Harness, VALID_BODY},
    };
    use domain::fetch::FetchOutcome;

    fn service(harness: &Harness, spawner: &Arc<CollectingSpawner>) -> Arc<PrefetchService> {
        PrefetchService::new(
            Arc::clone(&harness.registry),
            harness.gateway.clone(),
            Arc::clone(spawner) as DynTaskSpawnPort,
        )
    }

    #[tokio::test]
    async fn returns_ticket_before_any_download() {
        let harness = Harness::new(FetchOutcome::Success(VALID_BODY.to_vec()));
        let spawner = Arc::new(CollectingSpawner::default());
        let service = service(&harness, &spawner);
        let region = PrefetchRegion::new(2, (0, 4), (0, 4)).unwrap();

        let ticket = service.schedule("moon_jpg", region).unwrap();

        assert_eq!(ticket.total_tiles, 25);
        assert_eq!(ticket.product_id.as_str(), "moon_jpg");
        assert_eq!(ticket.product_name, "Moon JPEG");
        assert_eq!(spawner.pending(), 1);
        assert_eq!(harness.upstream.call_count(), 0);

        spawner.run_all().await;
        assert_eq!(harness.upstream.call_count(), 25);
        assert_eq!(harness.store.len(), 25);
    }

    #[tokio::test]
    async fn jobs_get_distinct_ids() {
        let harness = Harness::new(FetchOutcome::NotAvailable);
        let spawner = Arc::new(CollectingSpawner::default());
        let service = service(&harness, &spawner);
        let region = PrefetchRegion::new(0, (0, 0), (0, 0)).unwrap();

        let a = service.schedule("moon_png", region).unwrap();
        let b = service.schedule("moon_png", region).unwrap();

        assert_ne!(a.job_id, b.job_id);
    }

    #[tokio::test]
    async fn rejects_unknown_product_and_bad_zoom_without_spawning() {
        let harness = Harness::new(FetchOutcome::NotAvailable);
        let spawner = Arc::new(CollectingSpawner::default());
        let service = service(&harness, &spawner);

        let unknown = service.schedule("venus", PrefetchRegion::new(0, (0, 0), (0, 0)).unwrap());
        let too_deep = service.schedule("moon_png", PrefetchRegion::new(3, (0, 0), (0, 0)).unwrap());

        assert!(matches!(unknown, Err(AppError::ProductNotFound { .. })));
        assert!(matches!(too_deep, Err(AppError::InvalidZoom { max_zoom: 2, .. })));
        assert_eq!(spawner.pending(), 0);
    }
}
