//! Error rendering with source snippets, using ariadne.
//!
//! Errors that carry a byte offset into a template are drawn as a report
//! pointing at the offending placeholder. The rest print as a single line.

use std::io::Write;
use std::ops::Range;

use ariadne::{Color, IndexType, Label, Report, ReportKind, Source};

use crate::Error;

/// Character set for rendering error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSet {
    #[default]
    Unicode,
    Ascii,
}

/// How to draw an error report.
#[derive(Debug, Clone)]
pub struct RenderConfig<'a> {
    /// Emit ANSI colors.
    pub color: bool,
    /// Name shown in the report header. Defaults to `<template>`.
    pub filename: Option<&'a str>,
    pub charset: CharSet,
}

impl Default for RenderConfig<'_> {
    fn default() -> Self {
        Self {
            color: true,
            filename: None,
            charset: CharSet::Unicode,
        }
    }
}

/// Render `error` against the template `source` to stderr.
pub fn render_error(error: &Error, source: &str) {
    render_error_to(error, source, &mut std::io::stderr(), &RenderConfig::default()).ok();
}

/// Render `error` against the template `source` to `writer`.
///
/// ```
/// use blacksquid::{CharSet, RenderConfig, Template, render_error_to};
///
/// let source = "Hi {{name";
/// let err = Template::parse(source).unwrap_err();
///
/// let mut buf = Vec::new();
/// let config = RenderConfig { color: false, charset: CharSet::Ascii, ..Default::default() };
/// render_error_to(&err, source, &mut buf, &config).unwrap();
/// assert!(String::from_utf8_lossy(&buf).contains("unterminated placeholder"));
/// ```
pub fn render_error_to(
    error: &Error,
    source: &str,
    writer: &mut dyn Write,
    config: &RenderConfig,
) -> std::io::Result<()> {
    let filename = config.filename.unwrap_or("<template>");

    let Some((span, label)) = error_span(error, source) else {
        return writeln!(writer, "Error: {error}");
    };

    let charset = match config.charset {
        CharSet::Unicode => ariadne::CharSet::Unicode,
        CharSet::Ascii => ariadne::CharSet::Ascii,
    };
    let ariadne_config = ariadne::Config::default()
        .with_color(config.color)
        .with_char_set(charset)
        .with_index_type(IndexType::Byte);

    let mut report = Report::build(ReportKind::Error, (filename, span.clone()))
        .with_message(error.to_string())
        .with_config(ariadne_config)
        .with_label(
            Label::new((filename, span))
                .with_message(label)
                .with_color(Color::Red),
        );
    if let Error::MissingKey { .. } = error {
        report = report.with_help("pass a value for it, or render with a lenient missing-key policy");
    }

    report
        .finish()
        .write((filename, Source::from(source)), &mut *writer)
}

/// Byte range in `source` an error points at, with the label to draw there.
fn error_span(error: &Error, source: &str) -> Option<(Range<usize>, &'static str)> {
    let (start, end, label) = match *error {
        Error::TemplateSyntax { offset, message } => (offset, source.len(), message),
        Error::MissingKey { ref key, offset } => {
            (offset, offset + key.len() + 4, "no value for this placeholder")
        }
        Error::Format { offset, message } => (offset, offset + 1, message),
        _ => return None,
    };
    if start > source.len() {
        return None;
    }
    Some((start..end.clamp(start, source.len()), label))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Arena, Map, MissingKey, RenderOptions, Template, render};

    const ASCII_CONFIG: RenderConfig = RenderConfig {
        color: false,
        filename: Some("test.tmpl"),
        charset: CharSet::Ascii,
    };

    fn render_to_string(error: &Error, source: &str) -> String {
        let mut buf = Vec::new();
        render_error_to(error, source, &mut buf, &ASCII_CONFIG).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn syntax_error_points_at_placeholder() {
        let source = "Hello {{name";
        let err = Template::parse(source).unwrap_err();
        let out = render_to_string(&err, source);

        assert!(out.contains("test.tmpl:1:7"), "{out}");
        assert!(out.contains("Hello {{name"), "{out}");
        assert!(out.contains("unterminated placeholder"), "{out}");
    }

    #[test]
    fn missing_key_points_at_placeholder() {
        let arena = Arena::new();
        let source = "a\nb {{who}}";
        let options = RenderOptions {
            missing_key: MissingKey::Error,
            ..RenderOptions::default()
        };
        let err = render(&arena, source, Map::new(&arena), &options).unwrap_err();
        let out = render_to_string(&err, source);

        assert!(out.contains("test.tmpl:2:3"), "{out}");
        assert!(out.contains("no value for this placeholder"), "{out}");
        assert!(out.contains("Help"), "{out}");
    }

    #[test]
    fn errors_without_offset_are_one_line() {
        let err = Error::NotFound {
            key: "k".to_string(),
        };
        assert_eq!(render_to_string(&err, "{{k}}"), "Error: key \"k\" not found\n");
    }

    #[test]
    fn span_is_clamped_to_source() {
        let err = Error::MissingKey {
            key: "long".to_string(),
            offset: 2,
        };
        assert_eq!(error_span(&err, "ab{{lo"), Some((2..6, "no value for this placeholder")));
        assert_eq!(error_span(&err, "a"), None);
    }

    #[test]
    fn default_config() {
        let config = RenderConfig::default();
        assert!(config.color);
        assert_eq!(config.charset, CharSet::Unicode);
    }
}
