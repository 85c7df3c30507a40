//! Output templates
//!
//! A template is free text in which `.name` stands for the value of the
//! `name` field, e.g. `[.time] .level: .msg`. A placeholder must start the
//! template or follow a character that can't be part of a name, so
//! `.msg.example` prints the `msg` field followed by the text `.example`.
//! Missing fields render as an empty string.

use crate::filter::FieldLookup;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^a-zA-Z0-9_])(?P<field>\.[a-zA-Z0-9_]+)").expect("valid placeholder regex")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template is empty")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(String),
}

/// A parsed output template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        if source.is_empty() {
            return Err(TemplateError::Empty);
        }

        let mut segments = Vec::new();
        let mut last_end = 0;
        for caps in PLACEHOLDER_RE.captures_iter(source) {
            let Some(field) = caps.name("field") else {
                continue;
            };
            if field.start() > last_end {
                segments.push(Segment::Literal(source[last_end..field.start()].to_string()));
            }
            // drop the leading '.'
            segments.push(Segment::Field(field.as_str()[1..].to_string()));
            last_end = field.end();
        }
        if last_end < source.len() {
            segments.push(Segment::Literal(source[last_end..].to_string()));
        }

        Ok(Template {
            source: source.to_string(),
            segments,
        })
    }

    /// The template text as given by the user
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Names of the fields referenced by the template
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    pub fn render<R: FieldLookup + ?Sized>(&self, record: &R) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(name) => out.push_str(record.field(name).unwrap_or_default()),
            }
        }
        out
    }
}
