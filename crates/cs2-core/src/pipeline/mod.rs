pub mod backend;
pub mod config;
pub mod transform;

pub use backend::{Backend, BackendInput};
pub use config::{DebugConfig, PassConfig};
pub use transform::{Transform, TransformPipeline, TransformResult, VALID_PASS_NAMES};

use crate::transforms::DeleteNops;

/// Build the default transform pipeline, honoring the pass config.
pub fn default_pipeline(config: &PassConfig) -> TransformPipeline {
    let mut pipeline = TransformPipeline::new();
    if config.delete_nops {
        pipeline.add(Box::new(DeleteNops));
    }
    pipeline
}
