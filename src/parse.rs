//! Parse the record stream into a `TraverseDocument`

use miette::SourceSpan;
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::{Pair, Pairs};

use crate::ast::{Directive, TraverseDocument};
use crate::errors::StreamError;
use crate::log::{debug, warn};
use crate::record::SegmentRecord;
use crate::types::Point;
use crate::{RecordParser, Rule};

/// Result of reading a record stream: whatever parsed, plus one diagnostic
/// per skipped line
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Import {
    pub document: TraverseDocument,
    pub diagnostics: Vec<StreamError>,
}

impl Import {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Read a whole record stream.
///
/// Never fails outright: blank lines are skipped, bad lines become
/// diagnostics and the rest of the stream is still read.
pub fn import(source: &str) -> Import {
    let mut import = Import::default();

    for (index, (offset, text)) in lines(source).enumerate() {
        let at = LineContext {
            line: index + 1,
            offset,
        };
        match at.parse(text) {
            Ok(Some(directive)) => {
                debug!(line = at.line, keyword = directive.keyword(), "directive");
                import.document.apply(directive);
            }
            Ok(None) => {}
            Err(error) => {
                warn!(line = at.line, %error, "skipping line");
                import.diagnostics.push(error);
            }
        }
    }

    import
}

/// Parse a single line on its own. `Ok(None)` for a blank line.
pub fn parse_directive(text: &str) -> Result<Option<Directive>, StreamError> {
    LineContext { line: 1, offset: 0 }.parse(text)
}

/// Byte offset and text of every line, without its terminator
fn lines(source: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    source.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        let text = raw.strip_suffix('\n').unwrap_or(raw);
        let text = text.strip_suffix('\r').unwrap_or(text);
        (start, text)
    })
}

/// Canonical keyword and the fields it needs
fn known_keyword(word: &str) -> Option<(&'static str, &'static str)> {
    match word.to_ascii_uppercase().as_str() {
        "DT" => Some(("DT", "a format name")),
        "DU" => Some(("DU", "a unit name")),
        "SP" => Some(("SP", "<x> <y>")),
        "EP" => Some(("EP", "<x> <y>")),
        "DD" => Some(("DD", "<direction> <distance>")),
        "CV" => Some(("CV", "<direction> <radius> <arc_length>")),
        _ => None,
    }
}

/// Where a line sits in the whole source
struct LineContext {
    /// One-based
    line: usize,
    /// Byte offset of the line's first character
    offset: usize,
}

impl LineContext {
    fn parse(&self, text: &str) -> Result<Option<Directive>, StreamError> {
        let pairs = RecordParser::parse(Rule::line, text).map_err(|e| self.syntax_error(e))?;

        let Some(pair) = pairs
            .flatten()
            .find(|p| !matches!(p.as_rule(), Rule::line | Rule::EOI))
        else {
            return Ok(None);
        };

        let rule = pair.as_rule();
        let mut fields = pair.clone().into_inner();
        match rule {
            Rule::format_tag => Ok(Some(Directive::FormatTag(self.word(&mut fields)))),
            Rule::unit_tag => Ok(Some(Directive::UnitTag(self.word(&mut fields)))),
            Rule::start_point => Ok(Some(Directive::StartPoint(self.point("SP", &mut fields)?))),
            Rule::end_point => Ok(Some(Directive::EndPoint(self.point("EP", &mut fields)?))),
            Rule::line_seg => {
                skip_keyword(&mut fields);
                let direction = self.text(&mut fields);
                let distance = self.number("DD", &mut fields)?;
                Ok(Some(Directive::Line(SegmentRecord::line(direction, distance))))
            }
            Rule::curve_seg => {
                skip_keyword(&mut fields);
                let direction = self.text(&mut fields);
                let radius = self.number("CV", &mut fields)?;
                let arc_length = self.number("CV", &mut fields)?;
                Ok(Some(Directive::Curve(SegmentRecord::curve(direction, radius, arc_length))))
            }
            Rule::unknown => Err(self.unknown(pair)),
            other => Err(StreamError::Syntax {
                line: self.line,
                message: format!("unexpected rule {other:?}"),
                span: self.span(&pair),
            }),
        }
    }

    fn span(&self, pair: &Pair<'_, Rule>) -> SourceSpan {
        let span = pair.as_span();
        (self.offset + span.start(), span.end() - span.start()).into()
    }

    /// Next field's text; the grammar guarantees the required ones exist
    fn text(&self, fields: &mut Pairs<'_, Rule>) -> String {
        fields.next().map(|p| p.as_str().to_string()).unwrap_or_default()
    }

    fn word(&self, fields: &mut Pairs<'_, Rule>) -> String {
        skip_keyword(fields);
        self.text(fields)
    }

    fn point(
        &self,
        directive: &'static str,
        fields: &mut Pairs<'_, Rule>,
    ) -> Result<Point, StreamError> {
        skip_keyword(fields);
        let x = self.number(directive, fields)?;
        let y = self.number(directive, fields)?;
        Ok(Point::new(x, y))
    }

    fn number(
        &self,
        directive: &'static str,
        fields: &mut Pairs<'_, Rule>,
    ) -> Result<f64, StreamError> {
        let Some(field) = fields.next() else {
            return Err(self.incomplete(directive));
        };
        field
            .as_str()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| StreamError::MalformedNumericField {
                line: self.line,
                directive,
                text: field.as_str().to_string(),
                span: self.span(&field),
            })
    }

    fn unknown(&self, pair: Pair<'_, Rule>) -> StreamError {
        let whole = self.span(&pair);
        let first = pair.into_inner().next();
        let word = first.as_ref().map(|p| p.as_str()).unwrap_or_default();

        match known_keyword(word) {
            Some((directive, expected)) => StreamError::IncompleteDirective {
                line: self.line,
                directive,
                expected,
                span: whole,
            },
            None => StreamError::UnrecognizedDirective {
                line: self.line,
                directive: word.to_string(),
                span: first.as_ref().map(|p| self.span(p)).unwrap_or(whole),
            },
        }
    }

    fn incomplete(&self, directive: &'static str) -> StreamError {
        let expected = known_keyword(directive).map(|(_, e)| e).unwrap_or_default();
        StreamError::IncompleteDirective {
            line: self.line,
            directive,
            expected,
            span: (self.offset, 0).into(),
        }
    }

    fn syntax_error(&self, error: pest::error::Error<Rule>) -> StreamError {
        let (start, len) = match error.location {
            InputLocation::Pos(pos) => (pos, 0),
            InputLocation::Span((start, end)) => (start, end - start),
        };
        StreamError::Syntax {
            line: self.line,
            message: error.variant.message().to_string(),
            span: (self.offset + start, len).into(),
        }
    }
}

fn skip_keyword(fields: &mut Pairs<'_, Rule>) {
    if matches!(
        fields.peek().map(|p| p.as_rule()),
        Some(Rule::kw_dt | Rule::kw_du | Rule::kw_sp | Rule::kw_ep | Rule::kw_dd | Rule::kw_cv)
    ) {
        fields.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn reads_every_directive() {
        let source = "DT QB\nDU DMS\nSP 100 200\nEP 110.5 190\nDD N45-30-15E 12.5\nCV * -50 25\n";
        let import = import(source);
        assert!(import.is_clean(), "{:?}", import.diagnostics);

        let doc = import.document;
        assert_eq!(doc.format_tag.as_deref(), Some("QB"));
        assert_eq!(doc.unit_tag.as_deref(), Some("DMS"));
        assert_eq!(doc.start, Some(Point::new(100.0, 200.0)));
        assert_eq!(doc.closing, Some(Point::new(110.5, 190.0)));
        assert_eq!(
            doc.records,
            vec![
                SegmentRecord::line("N45-30-15E", 12.5),
                SegmentRecord::curve("*", -50.0, 25.0),
            ]
        );
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(
            parse_directive("sp 1 2").unwrap(),
            Some(Directive::StartPoint(Point::new(1.0, 2.0)))
        );
        assert_eq!(
            parse_directive("Dd S60E 3").unwrap(),
            Some(Directive::Line(SegmentRecord::line("S60E", 3.0)))
        );
    }

    #[test]
    fn blank_lines_and_crlf() {
        let import = import("\r\n   \nSP 0 0\r\n\t\nDD N 1\r\n");
        assert!(import.is_clean());
        assert_eq!(import.document.records.len(), 1);
        assert_eq!(parse_directive("   ").unwrap(), None);
    }

    #[test]
    fn extra_fields_are_ignored() {
        assert_eq!(
            parse_directive("SP 1 2 3 extra").unwrap(),
            Some(Directive::StartPoint(Point::new(1.0, 2.0)))
        );
        assert_eq!(
            parse_directive("DD E 5 trailing").unwrap(),
            Some(Directive::Line(SegmentRecord::line("E", 5.0)))
        );
    }

    #[test]
    fn incomplete_known_directive() {
        let err = parse_directive("SP 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompleteDirective);
        assert_eq!(err.to_string(), "line 1: SP expects <x> <y>");

        assert_eq!(parse_directive("cv N 20").unwrap_err().kind(), ErrorKind::IncompleteDirective);
        assert_eq!(parse_directive("DT").unwrap_err().kind(), ErrorKind::IncompleteDirective);
    }

    #[test]
    fn unknown_directive() {
        let err = parse_directive("XY 1 2").unwrap_err();
        assert_eq!(
            err,
            StreamError::UnrecognizedDirective {
                line: 1,
                directive: "XY".into(),
                span: (0, 2).into(),
            }
        );
        // Keyword glued to more text is not a keyword
        assert_eq!(
            parse_directive("SPX 1 2").unwrap_err().kind(),
            ErrorKind::UnrecognizedDirective
        );
    }

    #[test]
    fn malformed_number_points_at_field() {
        let source = "SP 0 0\nDD N ten\n";
        let import = import(source);
        assert_eq!(import.diagnostics.len(), 1);
        let err = &import.diagnostics[0];
        assert_eq!(
            *err,
            StreamError::MalformedNumericField {
                line: 2,
                directive: "DD",
                text: "ten".into(),
                span: (12, 3).into(),
            }
        );
        assert_eq!(&source[12..15], "ten");
    }

    #[test]
    fn non_finite_numbers_are_malformed() {
        assert_eq!(
            parse_directive("EP inf 0").unwrap_err().kind(),
            ErrorKind::MalformedNumericField
        );
    }

    #[test]
    fn bad_lines_do_not_stop_import() {
        let source = "SP 0 0\nQQ\nDD N 1\nSP 1\nDD E 2\n";
        let import = import(source);
        let lines: Vec<Option<usize>> = import.diagnostics.iter().map(|d| d.line()).collect();
        assert_eq!(lines, vec![Some(2), Some(4)]);
        assert_eq!(import.document.records.len(), 2);
        assert_eq!(import.document.start, Some(Point::ORIGIN));
    }

    #[test]
    fn directions_are_not_validated_at_import() {
        let import = import("SP 0 0\nDD sideways 4\n");
        assert!(import.is_clean());
        assert_eq!(import.document.records[0].direction, "sideways");
    }
}
