use crate::snake::Replay;
use crate::stats::{GenerationMetrics, ProgressRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSnapshot {
    pub record: ProgressRecord,
    pub metrics: GenerationMetrics,
    pub replay: Replay,
}

pub type SharedSnapshot = Arc<RwLock<Option<GenerationSnapshot>>>;

#[derive(Clone)]
pub struct StateStream {
    state: SharedSnapshot,
}

impl StateStream {
    pub fn new(state: SharedSnapshot) -> Self {
        Self { state }
    }

    pub async fn get_state(&self) -> Option<GenerationSnapshot> {
        self.state.read().await.clone()
    }

    pub async fn latest_generation(&self) -> Option<u32> {
        self.state.read().await.as_ref().map(|s| s.record.generation)
    }

    #[cfg(test)]
    pub async fn publish(&self, snapshot: GenerationSnapshot) {
        *self.state.write().await = Some(snapshot);
    }

    /// Publish from a thread outside the async runtime.
    pub fn publish_blocking(&self, snapshot: GenerationSnapshot) {
        *self.state.blocking_write() = Some(snapshot);
    }
}
