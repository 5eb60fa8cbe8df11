use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("Failed to read atlas '{path}': {source}")]
    InputUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("'{first}' and '{second}' would both write '{output}'")]
    DuplicateOutput {
        output: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("No atlas files found in input")]
    NoInputs,

    #[error("{files} atlas file(s) produced diagnostics")]
    Strict { files: usize },
}
