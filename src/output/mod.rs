mod json;
mod pages;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::AtlasError;

pub use json::write_entries_json;
pub use pages::{Page, PageBounds, PageCollector, PageRegion, write_pages_json};

/// Write a rendered JSON document to `path`
pub fn write_output_file(path: &Path, content: &[u8]) -> Result<()> {
    fs::write(path, content).map_err(|e| AtlasError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Output filename for an input atlas: `ui.atlas` becomes `ui.json`
pub fn json_filename(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "atlas".to_string());
    format!("{}.json", stem)
}

/// Output file in `dir` for each input, in input order.
///
/// Fails if two inputs share a stem, since the later one would overwrite
/// the earlier one's output.
pub fn output_paths(inputs: &[PathBuf], dir: &Path) -> Result<Vec<PathBuf>, AtlasError> {
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    let mut paths = Vec::with_capacity(inputs.len());

    for input in inputs {
        let output = dir.join(json_filename(input));
        if let Some(first) = claimed.insert(output.clone(), input) {
            return Err(AtlasError::DuplicateOutput {
                output,
                first: first.to_path_buf(),
                second: input.clone(),
            });
        }
        paths.push(output);
    }

    Ok(paths)
}
