use std::path::PathBuf;

use thiserror::Error;

use crate::ir::{Opcode, Type};

/// Errors raised while rendering a single function.
///
/// Every variant is fatal for the function being emitted: callers must drop
/// whatever text was produced for it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmitError {
    /// A constant falls outside the closed value table of its type.
    #[error("cannot decode {value} as {ty}")]
    Decode { ty: Type, value: i32 },

    /// An operation or construct does not have the shape its category needs.
    #[error("malformed {context}: {message}")]
    Shape {
        context: &'static str,
        message: String,
    },

    #[error("no display name for opcode {0}")]
    UnknownOpcode(Opcode),

    /// Anonymous stack slots must be resolved before emission.
    #[error("stack variable {0} reached emission")]
    StackVariable(u32),

    #[error("statement follows the elided final return")]
    StatementAfterReturn,
}

impl EmitError {
    pub fn shape(context: &'static str, message: impl Into<String>) -> Self {
        Self::Shape {
            context,
            message: message.into(),
        }
    }
}

/// Top-level error type shared by passes, backends and the driver.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse {}: {message}", file.display())]
    Parse { file: PathBuf, message: String },

    #[error("script {script}: {source}")]
    Emit {
        script: i32,
        #[source]
        source: EmitError,
    },

    #[error("{failed} of {total} scripts failed to emit")]
    EmitFailures { failed: usize, total: usize },
}
