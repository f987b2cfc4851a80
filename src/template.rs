//! Output templates
//!
//! A template is free text with placeholders substituted once per item:
//!
//! | Placeholder | Rendered as |
//! |-------------|-------------|
//! | `$Value`    | extracted value, or `n/a` |
//! | `$Uri`      | address being processed |
//! | `$Index`    | 1-based position, decimal |
//! | `$Count`    | total number of items, decimal |
//! | `$Percent`  | completed percentage 0–100, decimal |
//!
//! `${Name}` is accepted where a placeholder runs into following text
//! (`${Index}th`). Names are case-insensitive. `$$` renders a single `$`.
//! A `$Name` that is not a placeholder is kept verbatim; `${Name}` with an
//! unknown name is rejected when the template is parsed.

use crate::error::TemplateError;
use std::fmt;
use std::str::FromStr;

/// Default output template
pub const DEFAULT_TEMPLATE: &str = "$Value <<< $Uri";

/// Substitution points in a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Extraction result
    Value,
    /// Current address
    Uri,
    /// 1-based item position
    Index,
    /// Total items
    Count,
    /// Completed percentage
    Percent,
}

impl Placeholder {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "value" => Some(Placeholder::Value),
            "uri" => Some(Placeholder::Uri),
            "index" => Some(Placeholder::Index),
            "count" => Some(Placeholder::Count),
            "percent" => Some(Placeholder::Percent),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Placeholder::Value => "Value",
            Placeholder::Uri => "Uri",
            Placeholder::Index => "Index",
            Placeholder::Count => "Count",
            Placeholder::Percent => "Percent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Placeholder),
}

/// Values substituted into a template for one item
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    /// Extracted value or sentinel
    pub value: &'a str,
    /// Current address
    pub uri: &'a str,
    /// 1-based position
    pub index: usize,
    /// Total items
    pub count: usize,
    /// Completed percentage
    pub percent: u8,
}

/// A parsed output template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl OutputTemplate {
    /// Parse a template string
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;
        let mut offset = 0usize;

        while let Some(pos) = rest.find('$') {
            literal.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            let consumed;

            if after.starts_with('$') {
                literal.push('$');
                consumed = pos + 2;
            } else if let Some(braced) = after.strip_prefix('{') {
                let close = braced
                    .find('}')
                    .ok_or(TemplateError::UnclosedPlaceholder(offset + pos))?;
                let name = &braced[..close];
                let slot = Placeholder::from_name(name)
                    .ok_or_else(|| TemplateError::UnknownPlaceholder(name.to_string()))?;
                flush(&mut literal, &mut segments);
                segments.push(Segment::Slot(slot));
                consumed = pos + 2 + close + 1;
            } else {
                let len = after
                    .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
                    .unwrap_or(after.len());
                match Placeholder::from_name(&after[..len]) {
                    Some(slot) => {
                        flush(&mut literal, &mut segments);
                        segments.push(Segment::Slot(slot));
                    }
                    None => {
                        literal.push('$');
                        literal.push_str(&after[..len]);
                    }
                }
                consumed = pos + 1 + len;
            }

            rest = &rest[consumed..];
            offset += consumed;
        }
        literal.push_str(rest);
        flush(&mut literal, &mut segments);

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Template text as supplied
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the template references the given placeholder
    pub fn uses(&self, placeholder: Placeholder) -> bool {
        self.segments.contains(&Segment::Slot(placeholder))
    }

    /// Render one output line
    pub fn render(&self, ctx: &TemplateContext<'_>) -> String {
        let mut out = String::with_capacity(self.source.len() + ctx.value.len() + ctx.uri.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(Placeholder::Value) => out.push_str(ctx.value),
                Segment::Slot(Placeholder::Uri) => out.push_str(ctx.uri),
                Segment::Slot(Placeholder::Index) => out.push_str(&ctx.index.to_string()),
                Segment::Slot(Placeholder::Count) => out.push_str(&ctx.count.to_string()),
                Segment::Slot(Placeholder::Percent) => out.push_str(&ctx.percent.to_string()),
            }
        }
        out
    }
}

fn flush(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

impl Default for OutputTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_TEMPLATE.to_string(),
            segments: vec![
                Segment::Slot(Placeholder::Value),
                Segment::Literal(" <<< ".to_string()),
                Segment::Slot(Placeholder::Uri),
            ],
        }
    }
}

impl FromStr for OutputTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for OutputTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.name())
    }
}
