use super::state_stream::GenerationSnapshot;
use crate::snake::Replay;
use crate::stats::{GenerationMetrics, ProgressRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "generation")]
    Generation {
        record: ProgressRecord,
        metrics: GenerationMetrics,
        replay: Replay,
    },
    #[serde(rename = "waiting")]
    Waiting,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "get_replay")]
    GetReplay,
}

impl ServerMessage {
    pub fn from_snapshot(snapshot: Option<GenerationSnapshot>) -> Self {
        match snapshot {
            Some(snapshot) => ServerMessage::Generation {
                record: snapshot.record,
                metrics: snapshot.metrics,
                replay: snapshot.replay,
            },
            None => ServerMessage::Waiting,
        }
    }
}
