use crate::{error::AppResult, prefetch::service::PrefetchTicket};
use domain::prefetch::PrefetchRegion;

pub trait PrefetchUseCase: Send + Sync {
    /// Validates the request and starts the job in the background; returns immediately.
    fn schedule_prefetch(&self, product: &str, region: PrefetchRegion) -> AppResult<PrefetchTicket>;
}
