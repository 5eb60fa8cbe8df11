use serde::{Deserialize, Serialize};

/// Config format version understood by this build
pub const CONFIG_VERSION: u32 = 1;

/// gdxatlas configuration file structure.
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Atlas file paths or glob patterns
    pub input: Vec<String>,
    /// Directory for JSON output; stdout when unset
    pub output_dir: Option<String>,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Fail when any atlas produces diagnostics
    pub strict: bool,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            input: Vec::new(),
            output_dir: None,
            pretty: true,
            strict: false,
        }
    }
}
