use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::debug;

use super::types::{AtlasConfig, CONFIG_VERSION};

const ATLAS_EXTENSION: &str = "atlas";

/// A config file together with the directory its relative paths start from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AtlasConfig,
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: AtlasConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        if config.version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {} (expected {})",
                config.version,
                path.display(),
                CONFIG_VERSION
            );
        }

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { config, config_dir })
    }

    /// Expand the configured inputs into atlas file paths.
    ///
    /// Explicit paths are kept as written. Glob matches are narrowed to
    /// `.atlas` files so a pattern like `packs/**/*` does not pick up the
    /// page images sitting next to them.
    pub fn resolve_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut atlases = Vec::new();

        for pattern in &self.config.input {
            if !is_glob_pattern(pattern) {
                atlases.push(self.config_dir.join(pattern));
                continue;
            }

            let full_pattern = self.config_dir.join(pattern);
            let matches = glob::glob(&full_pattern.to_string_lossy())
                .with_context(|| format!("invalid glob pattern: {}", pattern))?;

            let before = atlases.len();
            for entry in matches {
                let path = entry.with_context(|| format!("failed to read glob entry: {}", pattern))?;
                if path.is_file() && is_atlas_file(&path) {
                    atlases.push(path);
                }
            }
            debug!("{} matched {} atlas file(s)", pattern, atlases.len() - before);
        }

        Ok(atlases)
    }

    /// Output directory relative to the config file, if one is configured.
    pub fn resolve_output_dir(&self) -> Option<PathBuf> {
        self.config
            .output_dir
            .as_ref()
            .map(|dir| self.config_dir.join(dir))
    }
}

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

fn is_atlas_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ATLAS_EXTENSION))
}
