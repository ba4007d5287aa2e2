use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type BackgroundTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Detached background execution. `label` names the task in logs.
pub trait TaskSpawnPort: Send + Sync {
    fn spawn(&self, label: &'static str, task: BackgroundTask);
}

pub type DynTaskSpawnPort = Arc<dyn TaskSpawnPort>;
