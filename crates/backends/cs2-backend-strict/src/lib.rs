//! Strict pseudo-source backend.
//!
//! Renders structured ClientScript IR as re-parseable text: one file per
//! script, every local declared exactly once, constants decoded through
//! their type's literal rules.

mod emit;
pub mod literal;
mod printer;
mod writer;

use std::fs;
use std::path::Path;

use cs2_core::error::{CoreError, EmitError};
use cs2_core::ir::{Function, Module};
use cs2_core::names::{script_name, NameResolver};
use cs2_core::pipeline::{Backend, BackendInput};

use printer::ScriptEmitter;

/// Formatting knobs for the strict backend.
#[derive(Debug, Clone)]
pub struct StrictOptions {
    /// Text repeated once per nesting level.
    pub indent: String,
}

impl Default for StrictOptions {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
        }
    }
}

/// Emit one function to a string. On error no text is produced.
pub fn emit_function_to_string(
    func: &Function,
    names: &dyn NameResolver,
    options: &StrictOptions,
) -> Result<String, EmitError> {
    ScriptEmitter::new(func, names, options).emit()
}

/// Emit every function of a module, separated by blank lines. Stops at the
/// first function that fails.
pub fn emit_module_to_string(
    module: &Module,
    names: &dyn NameResolver,
    options: &StrictOptions,
) -> Result<String, CoreError> {
    let mut out = String::new();
    for (i, func) in module.functions.iter().enumerate() {
        let text = emit_function_to_string(func, names, options).map_err(|source| {
            CoreError::Emit {
                script: func.id,
                source,
            }
        })?;
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&text);
    }
    Ok(out)
}

/// File name for a script: its resolved name, or `script<id>`, with path
/// separators replaced.
pub fn script_file_name(names: &dyn NameResolver, id: i32) -> String {
    let name: String = script_name(names, id)
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{name}.cs2")
}

/// Writes each script of a module to `<output_dir>/<name>.cs2`.
pub struct StrictBackend {
    names: Box<dyn NameResolver>,
    options: StrictOptions,
}

impl StrictBackend {
    pub fn new(names: Box<dyn NameResolver>) -> Self {
        Self {
            names,
            options: StrictOptions::default(),
        }
    }

    pub fn with_options(mut self, options: StrictOptions) -> Self {
        self.options = options;
        self
    }

    fn emit_one(&self, func: &Function, output_dir: &Path) -> Result<bool, CoreError> {
        match emit_function_to_string(func, &*self.names, &self.options) {
            Ok(text) => {
                let path = output_dir.join(script_file_name(&*self.names, func.id));
                fs::write(&path, text).map_err(CoreError::Io)?;
                Ok(true)
            }
            Err(err) => {
                eprintln!("[strict] script {}: {err}", func.id);
                Ok(false)
            }
        }
    }
}

impl Backend for StrictBackend {
    fn name(&self) -> &str {
        "strict"
    }

    fn emit(&self, input: BackendInput) -> Result<(), CoreError> {
        fs::create_dir_all(&input.output_dir).map_err(CoreError::Io)?;

        let total = input.module.functions.len();
        let mut failed = 0;
        for func in &input.module.functions {
            if !self.emit_one(func, &input.output_dir)? {
                failed += 1;
            }
        }

        eprintln!(
            "[strict] wrote {} of {total} scripts to {}",
            total - failed,
            input.output_dir.display()
        );
        if failed > 0 {
            return Err(CoreError::EmitFailures { failed, total });
        }
        Ok(())
    }
}
