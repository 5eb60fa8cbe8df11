use anyhow::Result;
use log::{debug, info};
use serde::Serialize;

use crate::atlas::{AtlasEntry, NineSliceMargins, Severity, parse_source};
use crate::error::AtlasError;
use crate::sink::DiagnosticSink;
use crate::source::AtlasSource;

/// Turns parsed entries into whatever the caller needs (textures, scene
/// nodes, metadata, ...)
pub trait AtlasConsumer {
    /// Called once per source image, before any of its regions
    fn source_image(&mut self, entry: &AtlasEntry) -> Result<()>;

    /// Called for every region that follows a successfully consumed source
    fn region(&mut self, source: &AtlasEntry, entry: &AtlasEntry) -> Result<()>;

    /// Called after `region` succeeds for entries that carried a `split:` line
    fn nine_slice(
        &mut self,
        _source: &AtlasEntry,
        _entry: &AtlasEntry,
        _margins: NineSliceMargins,
    ) -> Result<()> {
        Ok(())
    }
}

/// Counts gathered while importing one atlas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Source images accepted by the consumer
    pub sources: usize,
    /// Regions accepted by the consumer
    pub regions: usize,
    /// Nine-slice regions accepted by the consumer
    pub nine_slices: usize,
    /// Regions with no usable source image
    pub skipped: usize,
    /// Consumer calls that returned an error
    pub failed: usize,
    /// Parse diagnostics forwarded to the sink
    pub diagnostics: usize,
}

/// Read, parse and import one atlas.
///
/// Only an unreadable source is fatal. Parse diagnostics and consumer
/// failures go to `sink` and the walk carries on with the next entry.
pub fn import_atlas(
    source: &impl AtlasSource,
    sink: &mut impl DiagnosticSink,
    consumer: &mut impl AtlasConsumer,
) -> Result<ImportSummary, AtlasError> {
    let parsed = parse_source(source)?;
    let mut summary = ImportSummary {
        diagnostics: parsed.diagnostics.len(),
        ..ImportSummary::default()
    };

    for diagnostic in &parsed.diagnostics {
        sink.report(diagnostic.severity, &diagnostic.to_string());
    }

    let mut current: Option<&AtlasEntry> = None;

    for entry in &parsed.entries {
        if entry.is_source {
            match consumer.source_image(entry) {
                Ok(()) => {
                    summary.sources += 1;
                    current = Some(entry);
                }
                Err(e) => {
                    sink.report(
                        Severity::Error,
                        &format!("Could not load source image '{}': {:#}", entry.name, e),
                    );
                    summary.failed += 1;
                    current = None;
                }
            }
            continue;
        }

        let Some(page) = current else {
            sink.report(
                Severity::Warning,
                &format!("Region '{}' has no source image, skipping", entry.name),
            );
            summary.skipped += 1;
            continue;
        };

        if entry.bounds.is_empty() {
            debug!("Region '{}' has empty bounds", entry.name);
        }

        if let Err(e) = consumer.region(page, entry) {
            sink.report(
                Severity::Error,
                &format!("Failed to import region '{}': {:#}", entry.name, e),
            );
            summary.failed += 1;
            continue;
        }
        summary.regions += 1;

        if let Some(margins) = entry.nine_slice() {
            match consumer.nine_slice(page, entry, margins) {
                Ok(()) => summary.nine_slices += 1,
                Err(e) => {
                    sink.report(
                        Severity::Error,
                        &format!("Failed to import nine-slice '{}': {:#}", entry.name, e),
                    );
                    summary.failed += 1;
                }
            }
        }
    }

    info!(
        "Imported {}: {} source(s), {} region(s), {} nine-slice(s)",
        source.describe(),
        summary.sources,
        summary.regions,
        summary.nine_slices
    );

    Ok(summary)
}
