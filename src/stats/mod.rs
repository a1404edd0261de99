pub mod metrics;
pub mod progress;

pub use metrics::GenerationMetrics;
pub use progress::{ProgressLog, ProgressRecord};
