//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that every compilation stage returns.

use ariadne::{Color, Report, Source};
use std::{fmt::{self, Debug}, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// The plain, single-line message describing this error. This is what library consumers see
    /// when errors are reported as data instead of rendered to a terminal.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns the plain message of this error.
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<'a, (&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the report for this error into a [`String`], including any terminal color codes.
    pub fn render(&self, src_id: &str, input: &str) -> io::Result<String> {
        let mut buf = Vec::new();
        self.build_report(src_id).write((src_id, Source::from(input)), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use ariadne::{Label, ReportKind};
    use pretty_assertions::assert_eq;
    use super::*;

    #[derive(Debug)]
    struct Unbalanced;

    impl ErrorKind for Unbalanced {
        fn message(&self) -> String {
            "unbalanced input".to_string()
        }

        fn build_report<'a>(
            &self,
            src_id: &'a str,
            spans: &[Range<usize>],
        ) -> Report<'a, (&'a str, Range<usize>)> {
            Report::build(ReportKind::Error, src_id, spans[0].start)
                .with_message(self.message())
                .with_label(Label::new((src_id, spans[0].clone())).with_message("right here"))
                .finish()
        }
    }

    #[test]
    fn plain_message() {
        let err = Error::new(vec![4..5], Unbalanced);
        assert_eq!(err.message(), "unbalanced input");
        assert_eq!(err.to_string(), "unbalanced input");
    }

    #[test]
    fn rendered_report_points_at_span() {
        let err = Error::new(vec![4..5], Unbalanced);
        let rendered = err.render("input", "x = (").unwrap();
        let plain = String::from_utf8(strip_ansi_escapes::strip(rendered.as_bytes())).unwrap();

        assert!(plain.contains("unbalanced input"));
        assert!(plain.contains("right here"));
        assert!(plain.contains("x = ("));
    }

    #[test]
    fn report_to_stderr_succeeds() {
        let err = Error::new(vec![4..5], Unbalanced);
        assert!(err.report_to_stderr("input", "x = (").is_ok());
    }
}
