use std::path::PathBuf;

use crate::error::AtlasError;

/// Something that can hand over the full text of an atlas description
pub trait AtlasSource {
    /// Read the whole description. The only failure is the text being
    /// unavailable.
    fn read_text(&self) -> Result<String, AtlasError>;

    /// Human-readable origin, used as a prefix in logs
    fn describe(&self) -> String;
}

/// An atlas file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AtlasSource for FileSource {
    fn read_text(&self) -> Result<String, AtlasError> {
        std::fs::read_to_string(&self.path).map_err(|e| AtlasError::InputUnavailable {
            path: self.path.clone(),
            source: e,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Atlas text already held in memory
#[derive(Debug, Clone)]
pub struct TextSource<'a> {
    text: &'a str,
}

impl<'a> TextSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl AtlasSource for TextSource<'_> {
    fn read_text(&self) -> Result<String, AtlasError> {
        Ok(self.text.to_string())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}
