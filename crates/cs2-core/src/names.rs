//! Symbol name lookups (id → human name).
//!
//! The tables come from community-maintained dumps; a miss is never an
//! error, callers fall back to a synthesized placeholder.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::CoreError;

/// Symbol kinds that have name tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    Script,
    Graphic,
    Stat,
    Obj,
    Inv,
    MapArea,
    Param,
}

impl NameKind {
    pub const ALL: [NameKind; 7] = [
        NameKind::Script,
        NameKind::Graphic,
        NameKind::Stat,
        NameKind::Obj,
        NameKind::Inv,
        NameKind::MapArea,
        NameKind::Param,
    ];

    /// File stem of this kind's table inside a names directory.
    pub fn file_stem(self) -> &'static str {
        match self {
            NameKind::Script => "scripts",
            NameKind::Graphic => "graphics",
            NameKind::Stat => "stats",
            NameKind::Obj => "objs",
            NameKind::Inv => "invs",
            NameKind::MapArea => "mapareas",
            NameKind::Param => "params",
        }
    }
}

/// Resolves ids to names. Implementations must be pure.
pub trait NameResolver {
    fn resolve(&self, kind: NameKind, id: i32) -> Option<&str>;
}

/// Resolved script name, or the `script<id>` placeholder on a miss.
pub fn script_name(names: &dyn NameResolver, id: i32) -> String {
    match names.resolve(NameKind::Script, id) {
        Some(name) => name.to_string(),
        None => format!("script{id}"),
    }
}

/// Resolver that knows no names.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNames;

impl NameResolver for NoNames {
    fn resolve(&self, _kind: NameKind, _id: i32) -> Option<&str> {
        None
    }
}

/// In-memory name tables.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    names: HashMap<(NameKind, i32), String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: NameKind, id: i32, name: impl Into<String>) {
        self.names.insert((kind, id), name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Load every `<kind>.tsv` table found in `dir`.
    ///
    /// Each line is `id<TAB>name`; blank lines and lines starting with `#`
    /// are skipped. Tables that are absent are treated as empty.
    pub fn load_dir(dir: &Path) -> Result<Self, CoreError> {
        let mut table = Self::new();
        for kind in NameKind::ALL {
            let path = dir.join(format!("{}.tsv", kind.file_stem()));
            if !path.is_file() {
                continue;
            }
            let text = fs::read_to_string(&path)?;
            table.parse_into(kind, &text).map_err(|message| CoreError::Parse {
                file: path.clone(),
                message,
            })?;
        }
        Ok(table)
    }

    fn parse_into(&mut self, kind: NameKind, text: &str) -> Result<(), String> {
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let (id, name) = line
                .split_once('\t')
                .ok_or_else(|| format!("line {}: expected `id<TAB>name`", idx + 1))?;
            let id: i32 = id
                .trim()
                .parse()
                .map_err(|e| format!("line {}: bad id {id:?}: {e}", idx + 1))?;
            self.insert(kind, id, name);
        }
        Ok(())
    }
}

impl NameResolver for NameTable {
    fn resolve(&self, kind: NameKind, id: i32) -> Option<&str> {
        self.names.get(&(kind, id)).map(String::as_str)
    }
}
