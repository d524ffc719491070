//! Write a traverse back out as a record stream

use crate::ast::{Directive, TraverseDocument};
use crate::bearing::{format_bearing, parse_direction};
use crate::config::TraverseConfig;
use crate::defaults::{EXPORT_FORMAT_TAG, EXPORT_UNIT_TAG};
use crate::errors::{RowDiagnostic, StreamError, TraverseError};
use crate::log::warn;
use crate::record::{SegmentRecord, TANGENT_TOKEN, is_tangent_token};

/// Exported text plus the rows left out of it
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    pub text: String,
    pub diagnostics: Vec<RowDiagnostic>,
}

/// Render `document` as `DT`/`DU`/`SP`/`EP` followed by one `DD` or `CV`
/// line per record.
///
/// The closing point is the document's `EP` if it has one, otherwise the end
/// of the walk. Directions are rewritten as quadrant bearings; rows whose
/// direction does not parse are skipped.
pub fn export(document: &TraverseDocument, config: &TraverseConfig) -> Result<Export, StreamError> {
    let start = document.start()?;
    let closing = document.closing_point(config)?;

    let mut directives = vec![
        Directive::FormatTag(EXPORT_FORMAT_TAG.to_string()),
        Directive::UnitTag(EXPORT_UNIT_TAG.to_string()),
        Directive::StartPoint(start),
        Directive::EndPoint(closing),
    ];
    let mut diagnostics = Vec::new();

    for (row, record) in document.records.iter().enumerate() {
        match export_direction(&record.direction) {
            Ok(direction) => directives.push(Directive::segment(SegmentRecord {
                direction,
                ..record.clone()
            })),
            Err(error) => {
                warn!(row, %error, "not exporting row");
                diagnostics.push(RowDiagnostic { row, error });
            }
        }
    }

    let mut text = String::new();
    for directive in &directives {
        text.push_str(&directive.to_string());
        text.push('\n');
    }

    Ok(Export { text, diagnostics })
}

/// Tangent tokens stay `*`; everything else becomes a formatted bearing
fn export_direction(token: &str) -> Result<String, TraverseError> {
    if is_tangent_token(token) {
        return Ok(TANGENT_TOKEN.to_string());
    }
    let azimuth = parse_direction(token)?;
    Ok(format_bearing(azimuth.degrees()))
}
