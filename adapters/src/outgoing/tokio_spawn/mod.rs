pub mod codec_offload_tokio;

use lunar_tiles_application::ports::outgoing::task_spawn::{BackgroundTask, TaskSpawnPort};
use tracing::{Instrument, debug, info_span};

pub struct TokioTaskSpawnAdapter;

impl TokioTaskSpawnAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TokioTaskSpawnAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskSpawnPort for TokioTaskSpawnAdapter {
    fn spawn(&self, label: &'static str, task: BackgroundTask) {
        debug!(task = label, "Spawning background task");
        tokio::spawn(task.instrument(info_span!("background_task", task = label)));
    }
}
