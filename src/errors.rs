//! Error types with rich diagnostics using miette
//!
//! Every error here is row-local: the walker and the importer collect them
//! into diagnostics and keep going.

use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

/// Flat error category shared by engine and stream errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidBearing,
    InvalidDirection,
    MissingFirstDirection,
    NoTangentReference,
    MalformedNumericField,
    UnrecognizedDirective,
    IncompleteDirective,
    Syntax,
    MissingStartPoint,
}

// ============================================================================
// Engine Errors
// ============================================================================

/// Errors raised while decoding directions and resolving tangents
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum TraverseError {
    #[error("invalid bearing '{text}': {reason}")]
    #[diagnostic(
        code(traverse::bearing::invalid),
        help("bearings look like N45-30-15E, S60E, NW or N")
    )]
    InvalidBearing { text: String, reason: String },

    #[error("invalid direction '{text}': {reason}")]
    #[diagnostic(
        code(traverse::direction::invalid),
        help("expected decimal degrees (e.g. 45.00) or a bearing (e.g. N45-30-15E)")
    )]
    InvalidDirection { text: String, reason: String },

    #[error("first segment must have an explicit direction")]
    #[diagnostic(code(traverse::tangent::missing_first_direction))]
    MissingFirstDirection,

    #[error("no previous exit direction to continue tangent from")]
    #[diagnostic(
        code(traverse::tangent::no_reference),
        help("give this row an explicit direction, or fix the row before it")
    )]
    NoTangentReference,

    #[error("malformed {field} '{text}'")]
    #[diagnostic(code(traverse::record::malformed_numeric))]
    MalformedNumericField { field: &'static str, text: String },
}

impl TraverseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TraverseError::InvalidBearing { .. } => ErrorKind::InvalidBearing,
            TraverseError::InvalidDirection { .. } => ErrorKind::InvalidDirection,
            TraverseError::MissingFirstDirection => ErrorKind::MissingFirstDirection,
            TraverseError::NoTangentReference => ErrorKind::NoTangentReference,
            TraverseError::MalformedNumericField { .. } => ErrorKind::MalformedNumericField,
        }
    }

    pub(crate) fn invalid_bearing(text: &str, reason: impl Into<String>) -> Self {
        TraverseError::InvalidBearing {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}

/// A row that the walker (or exporter) skipped, with the reason
#[derive(Debug, Clone, PartialEq)]
pub struct RowDiagnostic {
    /// Zero-based index into the record list
    pub row: usize,
    pub error: TraverseError,
}

impl RowDiagnostic {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

// ============================================================================
// Record Stream Errors
// ============================================================================

/// Errors that occur while reading or writing the flat-text record stream
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum StreamError {
    #[error("line {line}: unrecognized directive '{directive}'")]
    #[diagnostic(
        code(traverse::stream::unrecognized_directive),
        help("known directives are DT, DU, SP, EP, DD and CV")
    )]
    UnrecognizedDirective {
        line: usize,
        directive: String,
        #[label("unknown directive")]
        span: SourceSpan,
    },

    #[error("line {line}: {directive} expects {expected}")]
    #[diagnostic(code(traverse::stream::incomplete_directive))]
    IncompleteDirective {
        line: usize,
        directive: &'static str,
        expected: &'static str,
        #[label("incomplete")]
        span: SourceSpan,
    },

    #[error("line {line}: malformed numeric field '{text}' for {directive}")]
    #[diagnostic(code(traverse::stream::malformed_numeric))]
    MalformedNumericField {
        line: usize,
        directive: &'static str,
        text: String,
        #[label("not a number")]
        span: SourceSpan,
    },

    #[error("line {line}: syntax error: {message}")]
    #[diagnostic(code(traverse::stream::syntax))]
    Syntax {
        line: usize,
        message: String,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("no start point set")]
    #[diagnostic(
        code(traverse::stream::missing_start_point),
        help("add an `SP <x> <y>` line")
    )]
    MissingStartPoint,
}

impl StreamError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StreamError::UnrecognizedDirective { .. } => ErrorKind::UnrecognizedDirective,
            StreamError::IncompleteDirective { .. } => ErrorKind::IncompleteDirective,
            StreamError::MalformedNumericField { .. } => ErrorKind::MalformedNumericField,
            StreamError::Syntax { .. } => ErrorKind::Syntax,
            StreamError::MissingStartPoint => ErrorKind::MissingStartPoint,
        }
    }

    /// One-based line number, if the error belongs to a line
    pub fn line(&self) -> Option<usize> {
        match self {
            StreamError::UnrecognizedDirective { line, .. }
            | StreamError::IncompleteDirective { line, .. }
            | StreamError::MalformedNumericField { line, .. }
            | StreamError::Syntax { line, .. } => Some(*line),
            StreamError::MissingStartPoint => None,
        }
    }

    /// Attach the source text so miette can render the labelled span
    pub fn to_report(&self, name: &str, source: &str) -> Report {
        Report::new(self.clone()).with_source_code(NamedSource::new(name, source.to_string()))
    }
}
