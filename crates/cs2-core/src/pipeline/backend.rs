use std::path::PathBuf;

use crate::error::CoreError;
use crate::ir::Module;

/// Input to a backend.
pub struct BackendInput {
    /// The pruned IR module to render.
    pub module: Module,
    /// Output directory for generated pseudo-source.
    pub output_dir: PathBuf,
}

/// Emits target text from IR.
pub trait Backend {
    /// Name of this backend (e.g., "strict").
    fn name(&self) -> &str;

    /// Generate output for every function in the module.
    fn emit(&self, input: BackendInput) -> Result<(), CoreError>;
}
