use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::func::Function;
use crate::error::CoreError;

/// A batch of scripts decompiled from one cache dump.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub functions: Vec<Function>,
}

impl Module {
    pub fn new(name: String) -> Self {
        Self {
            name,
            functions: Vec::new(),
        }
    }

    /// Read a module from its JSON form on disk.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| CoreError::Parse {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
