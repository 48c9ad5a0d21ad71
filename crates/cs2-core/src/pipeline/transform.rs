use crate::error::CoreError;
use crate::ir::Module;
use crate::names::{script_name, NameResolver};

use super::config::DebugConfig;

/// Result of applying a transform pass.
pub struct TransformResult {
    pub module: Module,
    /// Whether the pass modified the module.
    pub changed: bool,
}

/// A pass that rewrites IR modules before emission.
pub trait Transform {
    /// Name of this transform pass.
    fn name(&self) -> &str;

    /// Apply this transform to a module, returning the transformed module
    /// and whether any changes were made.
    fn apply(&self, module: Module) -> Result<TransformResult, CoreError>;
}

/// Valid pass names for `--skip-pass`, in pipeline order.
pub const VALID_PASS_NAMES: &[&str] = &["delete-nops"];

/// An ordered sequence of transforms to apply.
pub struct TransformPipeline {
    transforms: Vec<Box<dyn Transform>>,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    pub fn add(&mut self, transform: Box<dyn Transform>) {
        self.transforms.push(transform);
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Run all transforms in order on the given module.
    pub fn run(&self, module: Module) -> Result<Module, CoreError> {
        let mut module = module;
        for transform in &self.transforms {
            let result = transform.apply(module)?;
            if result.changed {
                eprintln!("[cs2] pass {} changed the module", transform.name());
            }
            module = result.module;
        }
        Ok(module)
    }

    /// Run the pipeline, then dump the resulting IR of every script accepted
    /// by `debug` to stderr when `debug.dump_ir` is set.
    pub fn run_with_debug(
        &self,
        module: Module,
        debug: &DebugConfig,
        names: &dyn NameResolver,
    ) -> Result<Module, CoreError> {
        let module = self.run(module)?;
        if debug.dump_ir {
            dump_ir_functions(&module, debug, names);
        }
        Ok(module)
    }
}

/// Dump IR for all scripts in `module` that pass the debug filter.
fn dump_ir_functions(module: &Module, debug: &DebugConfig, names: &dyn NameResolver) {
    for func in &module.functions {
        let name = script_name(names, func.id);
        if debug.should_dump(&name) {
            eprintln!("=== IR: {name} ===\n{func}=== end IR ===\n");
        }
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}
