use std::path::Path;

use log::debug;

use super::{AtlasEntry, Diagnostic, DiagnosticKind, ParsedAtlas};
use crate::error::AtlasError;
use crate::geometry::Rect2i;
use crate::source::{AtlasSource, FileSource};

/// Parse the text of a libGDX `.atlas` description.
///
/// Every line is stripped of all whitespace first. A line without a colon
/// starts a new entry; a `key:value` line sets a property on the most
/// recently started entry. Malformed lines never abort the parse: they are
/// recorded in [`ParsedAtlas::diagnostics`] and the affected field keeps its
/// previous value.
pub fn parse(text: &str) -> ParsedAtlas {
    let mut entries: Vec<AtlasEntry> = Vec::new();
    let mut diagnostics = Vec::new();
    // Receives properties that appear before the first name line
    let mut orphan = AtlasEntry::new("");

    // Byte order mark is not whitespace and would end up in the first name
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

        // Blank lines separate pages
        if line.is_empty() {
            continue;
        }

        if !line.contains(':') {
            entries.push(AtlasEntry::new(line));
            continue;
        }

        let mut parts = line.split(':').filter(|s| !s.is_empty());
        let (key, value) = match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => (key, value),
            _ => {
                push_diagnostic(
                    &mut diagnostics,
                    line_no,
                    DiagnosticKind::MalformedProperty,
                    format!("Unexpected line encountered: {line}"),
                );
                continue;
            }
        };

        let entry = match entries.last_mut() {
            Some(entry) => entry,
            None => &mut orphan,
        };

        match key {
            "bounds" => match parse_rect(value) {
                Some(rect) => entry.bounds = rect,
                None => push_diagnostic(
                    &mut diagnostics,
                    line_no,
                    DiagnosticKind::MalformedValue,
                    format!("Unexpected rect encountered: {line}"),
                ),
            },
            "index" => match value.parse::<i32>() {
                Ok(index) => entry.index = index,
                Err(e) => push_diagnostic(
                    &mut diagnostics,
                    line_no,
                    DiagnosticKind::MalformedValue,
                    format!("Unexpected index encountered: {line} ({e})"),
                ),
            },
            "split" => {
                entry.is_9slice = true;
                match parse_rect(value) {
                    Some(rect) => entry.split = rect,
                    None => push_diagnostic(
                        &mut diagnostics,
                        line_no,
                        DiagnosticKind::MalformedValue,
                        format!("Unexpected rect encountered: {line}"),
                    ),
                }
            }
            "size" => entry.is_source = true,
            _ => {}
        }
    }

    ParsedAtlas {
        entries,
        diagnostics,
    }
}

/// Read and parse an atlas through any text source
pub fn parse_source(source: &impl AtlasSource) -> Result<ParsedAtlas, AtlasError> {
    let text = source.read_text()?;
    let parsed = parse(&text);
    debug!(
        "Parsed {}: {} entries, {} diagnostics",
        source.describe(),
        parsed.entries.len(),
        parsed.diagnostics.len()
    );
    Ok(parsed)
}

/// Read and parse an atlas file from disk
pub fn parse_file(path: &Path) -> Result<ParsedAtlas, AtlasError> {
    parse_source(&FileSource::new(path))
}

fn push_diagnostic(
    diagnostics: &mut Vec<Diagnostic>,
    line: usize,
    kind: DiagnosticKind,
    message: String,
) {
    debug!("line {}: {}", line, message);
    diagnostics.push(Diagnostic::new(line, kind, message));
}

/// Parse `x,y,w,h`. Needs exactly four non-empty fields; a field that is
/// not an integer reads as 0.
fn parse_rect(value: &str) -> Option<Rect2i> {
    let fields: Vec<&str> = value.split(',').filter(|s| !s.is_empty()).collect();
    let [x, y, w, h] = fields.as_slice() else {
        return None;
    };

    Some(Rect2i::new(
        int_or_zero(x),
        int_or_zero(y),
        int_or_zero(w),
        int_or_zero(h),
    ))
}

fn int_or_zero(field: &str) -> i32 {
    field.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::Severity;
    use crate::source::TextSource;

    const SAMPLE: &str = "\
sheet.png
size: 256, 128
format: RGBA8888
filter: Nearest, Nearest
repeat: none
ui/button
  bounds: 0, 0, 48, 16
  split: 4, 4, 3, 3
hero/walk
  bounds: 48, 0, 16, 16
  index: 0
hero/walk
  bounds: 64, 0, 16, 16
  index: 1

sheet2.png
size: 64, 64
coin
  bounds: 0, 0, 8, 8
";

    #[test]
    fn test_no_names_no_entries() {
        assert!(parse("").entries.is_empty());
        assert!(parse("\n\n   \n\t\n").entries.is_empty());
        assert!(parse("size:1,1\nbounds:1,2,3,4\nfoo:bar\n").entries.is_empty());
    }

    #[test]
    fn test_source_entry() {
        let parsed = parse("img.png\nsize:64,64\n");

        assert_eq!(parsed.entries.len(), 1);
        let e = &parsed.entries[0];
        assert_eq!(e.name, "img.png");
        assert!(e.is_source);
        assert_eq!(e.bounds, Rect2i::default());
        assert!(!e.is_9slice);
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_properties_apply_to_latest_entry() {
        let parsed = parse("a\nbounds:1,2,3,4\nb\nbounds:5,6,7,8\nindex:2\n");

        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.entries[0].name, "a");
        assert_eq!(parsed.entries[0].bounds, Rect2i::new(1, 2, 3, 4));
        assert_eq!(parsed.entries[0].index, -1);
        assert_eq!(parsed.entries[1].name, "b");
        assert_eq!(parsed.entries[1].bounds, Rect2i::new(5, 6, 7, 8));
        assert_eq!(parsed.entries[1].index, 2);
    }

    #[test]
    fn test_split_sets_nine_slice() {
        let parsed = parse("a\nsplit:1,2,3,4\n");

        assert_eq!(parsed.entries.len(), 1);
        assert!(parsed.entries[0].is_9slice);
        assert_eq!(parsed.entries[0].split, Rect2i::new(1, 2, 3, 4));
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_malformed_split_still_flags_nine_slice() {
        let parsed = parse("a\nsplit:1,2\n");

        assert_eq!(parsed.entries.len(), 1);
        assert!(parsed.entries[0].is_9slice);
        assert_eq!(parsed.entries[0].split, Rect2i::default());
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.diagnostics[0].kind, DiagnosticKind::MalformedValue);
        assert_eq!(parsed.diagnostics[0].line, 2);
    }

    #[test]
    fn test_non_numeric_field_defaults_to_zero() {
        let parsed = parse("a\nbounds:x,2,3,4\n");

        assert_eq!(parsed.entries[0].bounds, Rect2i::new(0, 2, 3, 4));
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_out_of_range_field_defaults_to_zero() {
        let parsed = parse("a\nbounds:1,99999999999,3,-4\n");
        assert_eq!(parsed.entries[0].bounds, Rect2i::new(1, 0, 3, -4));
    }

    #[test]
    fn test_wrong_arity_keeps_previous_bounds() {
        let parsed = parse("a\nbounds:1,2,3,4\nbounds:9,9,9\nbounds:1,2,3,4,5\n");

        assert_eq!(parsed.entries[0].bounds, Rect2i::new(1, 2, 3, 4));
        assert_eq!(parsed.diagnostics.len(), 2);
        assert_eq!(parsed.diagnostics[0].line, 3);
        assert_eq!(parsed.diagnostics[1].line, 4);
    }

    #[test]
    fn test_empty_tuple_fields_are_dropped() {
        let parsed = parse("a\nbounds:1,,2,3,4,\n");
        assert_eq!(parsed.entries[0].bounds, Rect2i::new(1, 2, 3, 4));
    }

    #[test]
    fn test_bad_index_keeps_default() {
        let parsed = parse("a\nindex:two\n");

        assert_eq!(parsed.entries[0].index, -1);
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.diagnostics[0].kind, DiagnosticKind::MalformedValue);
        assert_eq!(parsed.diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn test_malformed_property_shape() {
        let parsed = parse("a\nbounds:\n:1,2,3,4\na:b:c\nbounds:1,2,3,4\n");

        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].bounds, Rect2i::new(1, 2, 3, 4));
        assert_eq!(parsed.diagnostics.len(), 3);
        assert!(
            parsed
                .diagnostics
                .iter()
                .all(|d| d.kind == DiagnosticKind::MalformedProperty
                    && d.severity == Severity::Error)
        );
        assert_eq!(
            parsed.diagnostics.iter().map(|d| d.line).collect::<Vec<_>>(),
            [2, 3, 4]
        );
    }

    #[test]
    fn test_repeated_colons_collapse() {
        let parsed = parse("a\nbounds::1,2,3,4\n");

        assert_eq!(parsed.entries[0].bounds, Rect2i::new(1, 2, 3, 4));
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_key_is_silent() {
        let parsed = parse("a\nrotate:false\norig:1,2\noffset:0,0\n");

        assert_eq!(parsed.entries.len(), 1);
        assert!(parsed.diagnostics.is_empty());
        assert_eq!(parsed.entries[0], AtlasEntry::new("a"));
    }

    #[test]
    fn test_properties_before_first_name_are_discarded() {
        let parsed = parse("bounds:1,2,3,4\nsplit:1,2\na\n");

        assert_eq!(parsed.entries, vec![AtlasEntry::new("a")]);
        // The value is still checked
        assert_eq!(parsed.diagnostics.len(), 1);
    }

    #[test]
    fn test_whitespace_insensitive() {
        assert_eq!(
            parse("a \n bounds : 1,2,3,4 \n"),
            parse("a\nbounds:1,2,3,4\n")
        );
        assert_eq!(parse("a\r\nbounds:\t1, 2, 3, 4\r\n"), parse("a\nbounds:1,2,3,4\n"));

        let parsed = parse("my sprite\n");
        assert_eq!(parsed.entries[0].name, "mysprite");
    }

    #[test]
    fn test_leading_bom_is_dropped() {
        let parsed = parse("\u{feff}sheet.png\nsize:8,8\n");

        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].name, "sheet.png");
        assert!(parsed.entries[0].is_source);
        assert_eq!(parsed, parse("sheet.png\nsize:8,8\n"));
    }

    #[test]
    fn test_bom_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.atlas");
        std::fs::write(&path, "\u{feff}sheet.png\r\nsize:8,8\r\n").unwrap();

        let parsed = parse_file(&path).unwrap();
        assert_eq!(parsed.entries[0].name, "sheet.png");
    }

    #[test]
    fn test_order_preserved() {
        let parsed = parse(SAMPLE);
        let names: Vec<_> = parsed.entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(
            names,
            [
                "sheet.png",
                "ui/button",
                "hero/walk",
                "hero/walk",
                "sheet2.png",
                "coin"
            ]
        );
    }

    #[test]
    fn test_full_sample() {
        let parsed = parse(SAMPLE);

        assert!(parsed.diagnostics.is_empty());
        assert_eq!(parsed.sources().count(), 2);
        assert_eq!(parsed.regions().count(), 4);

        let button = &parsed.entries[1];
        assert_eq!(button.bounds, Rect2i::new(0, 0, 48, 16));
        let margins = button.nine_slice().unwrap();
        assert_eq!((margins.left, margins.right), (4, 4));
        assert_eq!((margins.top, margins.bottom), (3, 3));

        assert_eq!(parsed.entries[2].index, 0);
        assert_eq!(parsed.entries[3].index, 1);
        assert_eq!(parsed.entries[3].bounds, Rect2i::new(64, 0, 16, 16));
        assert_eq!(parsed.entries[5].bounds, Rect2i::new(0, 0, 8, 8));
    }

    #[test]
    fn test_reparse_is_identical() {
        assert_eq!(parse(SAMPLE), parse(SAMPLE));

        let broken = "a\nbounds:1\nx:y:z\nsplit:\n";
        assert_eq!(parse(broken), parse(broken));
    }

    #[test]
    fn test_parse_source_text() {
        let parsed = parse_source(&TextSource::new("a\nbounds:1,2,3,4\n")).unwrap();
        assert_eq!(parsed.entries.len(), 1);
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.atlas");
        std::fs::write(&path, SAMPLE).unwrap();

        let parsed = parse_file(&path).unwrap();
        assert_eq!(parsed, parse(SAMPLE));
    }

    #[test]
    fn test_parse_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.atlas");

        let err = parse_file(&path).unwrap_err();
        assert!(matches!(err, AtlasError::InputUnavailable { .. }));
        assert!(err.to_string().contains("missing.atlas"));
    }
}
