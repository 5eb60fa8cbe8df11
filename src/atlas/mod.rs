mod diagnostic;
mod parser;
mod types;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use parser::{parse, parse_file, parse_source};
pub use types::{AtlasEntry, NineSliceMargins, ParsedAtlas};
