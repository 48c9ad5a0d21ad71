/// Configuration for debug dumps during the pipeline.
///
/// When enabled, dumps IR to stderr after the transform passes. An optional
/// function filter restricts output to matching scripts (see
/// [`DebugConfig::should_dump`] for matching rules).
#[derive(Debug, Clone, Default)]
pub struct DebugConfig {
    /// Dump post-transform IR to stderr before emission.
    pub dump_ir: bool,
    /// Filter dumps to scripts whose name matches this string.
    pub function_filter: Option<String>,
}

impl DebugConfig {
    /// Returns `true` if no filter is set, or if the script name contains the
    /// filter, first case-sensitively and then case-insensitively.
    ///
    /// Script names are the resolved cache names (`[clientscript,bank_init]`)
    /// or the `script<id>` placeholder when no name is known.
    pub fn should_dump(&self, func_name: &str) -> bool {
        let Some(filter) = self.function_filter.as_deref() else {
            return true;
        };
        if func_name.contains(filter) {
            return true;
        }
        func_name.to_lowercase().contains(&filter.to_lowercase())
    }
}

/// Configuration for which transform passes to run.
///
/// All passes are enabled by default. Disable individual passes by setting
/// their fields to `false`, or use `from_skip_list` with pass name strings.
#[derive(Debug, Clone)]
pub struct PassConfig {
    pub delete_nops: bool,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self { delete_nops: true }
    }
}

impl PassConfig {
    /// Create a config with all passes enabled except those in the skip list.
    ///
    /// Pass names correspond to `Transform::name()` values (see
    /// [`VALID_PASS_NAMES`](super::VALID_PASS_NAMES)). Unknown names are
    /// ignored.
    pub fn from_skip_list(skip: &[&str]) -> Self {
        let mut config = Self::default();
        for name in skip {
            if *name == "delete-nops" {
                config.delete_nops = false;
            }
        }
        config
    }
}
