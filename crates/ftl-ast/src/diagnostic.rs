//! Diagnostic rendering for junk annotations.

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use ftl_stream::ParseErrorKind;

use crate::Annotation;

/// Get ariadne config, respecting NO_COLOR env var.
fn ariadne_config() -> Config {
    let no_color = std::env::var("NO_COLOR").is_ok();
    if no_color {
        Config::default().with_color(false)
    } else {
        Config::default()
    }
}

impl Annotation {
    /// Render this annotation with ariadne.
    ///
    /// Returns a string containing the formatted error message with source context.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, writer: W) {
        let range = self.label_range(source);
        let report = self.build_report(filename, range);
        let _ = report
            .with_config(ariadne_config())
            .finish()
            .write((filename, Source::from(source)), writer);
    }

    /// Character range to underline. Annotations are zero-width, so the
    /// label covers the character at the error offset (if any).
    fn label_range(&self, source: &str) -> std::ops::Range<usize> {
        let offset = self
            .span
            .map_or(0, |span| span.start as usize)
            .min(source.len());
        let Some(before) = source.get(..offset) else {
            return 0..0;
        };
        let start = before.chars().count();
        match source[offset..].chars().next() {
            Some(_) => start..start + 1,
            None => start..start,
        }
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
        range: std::ops::Range<usize>,
    ) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
        let report = Report::build(ReportKind::Error, (filename, range.clone()))
            .with_code(self.code())
            .with_message(self.message())
            .with_label(
                Label::new((filename, range))
                    .with_message(label_message(&self.kind))
                    .with_color(Color::Red),
            );

        match help_message(&self.kind) {
            Some(help) => report.with_help(help),
            None => report,
        }
    }
}

fn label_message(kind: &ParseErrorKind) -> String {
    match kind {
        ParseErrorKind::ExpectedEntry => "not a message, term or comment".to_string(),
        ParseErrorKind::ExpectedToken('\u{2424}') => "expected end of line here".to_string(),
        ParseErrorKind::ExpectedToken(ch) => format!("expected '{}' here", ch),
        ParseErrorKind::ExpectedCharRange(range) => format!("expected one of {}", range),
        ParseErrorKind::ExpectedMessageField(_) | ParseErrorKind::ExpectedTermField(_) => {
            "value missing".to_string()
        }
        ParseErrorKind::UnterminatedStringExpression => "string ends here".to_string(),
        ParseErrorKind::UnknownEscapeSequence(_)
        | ParseErrorKind::InvalidUnicodeEscapeSequence(_) => "invalid escape".to_string(),
        _ => "here".to_string(),
    }
}

fn help_message(kind: &ParseErrorKind) -> Option<&'static str> {
    match kind {
        ParseErrorKind::ExpectedEntry => {
            Some("entries start with an identifier, '-', '#', or '//' at the beginning of a line")
        }
        ParseErrorKind::ExpectedMessageField(_) => {
            Some("add a value after '=' or at least one indented '.attribute = value' line")
        }
        ParseErrorKind::ForbiddenCallee => Some("function names must match [A-Z][A-Z_?-]*"),
        ParseErrorKind::MissingVariants => {
            Some("select expressions need at least one '[key] value' line after '->'")
        }
        ParseErrorKind::PositionalArgumentFollowsNamed => {
            Some("move positional arguments before named ones")
        }
        ParseErrorKind::UnknownEscapeSequence(_) => {
            Some("valid escapes are: \\\\, \\\", \\uXXXX, \\UXXXXXX")
        }
        ParseErrorKind::InvalidUnicodeEscapeSequence(_) => {
            Some("\\u takes four hex digits and \\U takes six")
        }
        ParseErrorKind::UnterminatedStringExpression => Some("add a closing '\"'"),
        _ => None,
    }
}
