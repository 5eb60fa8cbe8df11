pub mod atlas;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod import;
pub mod output;
pub mod sink;
pub mod source;

pub use atlas::{AtlasEntry, Diagnostic, NineSliceMargins, ParsedAtlas, Severity, parse, parse_file};
pub use cli::{CliArgs, Command, CommonArgs};
pub use error::AtlasError;
pub use geometry::Rect2i;
pub use import::{AtlasConsumer, ImportSummary, import_atlas};
pub use sink::{DiagnosticSink, LogSink};
pub use source::{AtlasSource, FileSource, TextSource};
