use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::atlas::{AtlasEntry, Diagnostic, NineSliceMargins, ParsedAtlas};
use crate::geometry::Rect2i;

#[derive(Serialize)]
struct JsonOutput<'a> {
    meta: Meta,
    entries: Vec<JsonEntry<'a>>,
    diagnostics: &'a [Diagnostic],
}

#[derive(Serialize)]
struct Meta {
    app: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    name: &'a str,
    source: bool,
    index: i32,
    bounds: Rect2i,
    #[serde(skip_serializing_if = "Option::is_none")]
    nine_slice: Option<NineSliceMargins>,
}

/// Write every parsed entry and diagnostic as one JSON document
pub fn write_entries_json(parsed: &ParsedAtlas, writer: impl Write, pretty: bool) -> Result<()> {
    let output = JsonOutput {
        meta: Meta {
            app: "gdxatlas",
            version: env!("CARGO_PKG_VERSION"),
        },
        entries: parsed.entries.iter().map(entry_to_json).collect(),
        diagnostics: &parsed.diagnostics,
    };

    if pretty {
        serde_json::to_writer_pretty(writer, &output)?;
    } else {
        serde_json::to_writer(writer, &output)?;
    }

    Ok(())
}

fn entry_to_json(entry: &AtlasEntry) -> JsonEntry<'_> {
    JsonEntry {
        name: &entry.name,
        source: entry.is_source,
        index: entry.index,
        bounds: entry.bounds,
        nine_slice: entry.nine_slice(),
    }
}
