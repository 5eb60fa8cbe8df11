use serde::Serialize;

use super::Diagnostic;
use crate::geometry::Rect2i;

/// Nine-slice border margins unpacked from a `split:` line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NineSliceMargins {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

/// One named line of an atlas file: a source image or a region within it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtlasEntry {
    /// Image filename for source entries, `/`-separated logical path for regions
    pub name: String,
    /// Set by a `size:` line
    pub is_source: bool,
    /// Disambiguating suffix for repeated names, `-1` when absent
    pub index: i32,
    /// Region position and size within the source image
    pub bounds: Rect2i,
    /// Set by any `split:` line, even one whose value failed to parse
    pub is_9slice: bool,
    /// Packed margins: `(left, right)` in position, `(top, bottom)` in size
    pub split: Rect2i,
}

impl AtlasEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_source: false,
            index: -1,
            bounds: Rect2i::default(),
            is_9slice: false,
            split: Rect2i::default(),
        }
    }

    pub fn has_index(&self) -> bool {
        self.index >= 0
    }

    /// Margins for a nine-slice region, `None` if no `split:` line was seen
    pub fn nine_slice(&self) -> Option<NineSliceMargins> {
        self.is_9slice.then(|| NineSliceMargins {
            left: self.split.x,
            right: self.split.y,
            top: self.split.width,
            bottom: self.split.height,
        })
    }

    /// Non-empty components of the logical name
    pub fn path_segments(&self) -> impl Iterator<Item = &str> {
        self.name.split('/').filter(|s| !s.is_empty())
    }

    /// Last component of the logical name
    pub fn leaf_name(&self) -> &str {
        self.path_segments().last().unwrap_or(self.name.as_str())
    }
}

/// Result of parsing one atlas description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedAtlas {
    /// Entries in the order their names appear
    pub entries: Vec<AtlasEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedAtlas {
    pub fn sources(&self) -> impl Iterator<Item = &AtlasEntry> {
        self.entries.iter().filter(|e| e.is_source)
    }

    pub fn regions(&self) -> impl Iterator<Item = &AtlasEntry> {
        self.entries.iter().filter(|e| !e.is_source)
    }
}
