//! SMS body rendering and budget truncation.
//!
//! Lengths are counted in `char`s. Truncation is a hard cut with a
//! trailing `"..."` so the result is exactly the budget long.

use serde::Deserialize;

use crate::config::SmsConfig;
use crate::feed::Headline;

/// Header line of the bulleted rendering.
pub const HEADER: &str = "Top News:";

const ELLIPSIS: &str = "...";

/// Number of segments and characters per segment a message may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmsBudget {
    pub segments: usize,
    pub chars_per_segment: usize,
}

impl SmsBudget {
    pub const fn new(segments: usize, chars_per_segment: usize) -> Self {
        Self {
            segments,
            chars_per_segment,
        }
    }

    /// Total characters allowed in one message.
    pub fn max_chars(&self) -> usize {
        self.segments.saturating_mul(self.chars_per_segment)
    }
}

impl Default for SmsBudget {
    fn default() -> Self {
        Self::new(2, 70)
    }
}

/// How a headline batch is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStyle {
    /// `Top News:` header followed by `- {title}` lines.
    #[default]
    Bulleted,
    /// `{n}) {title}` lines with an optional prefix line.
    Numbered,
}

/// Render the `Top News:` bulleted list. Links are omitted.
pub fn render_bulleted(headlines: &[Headline]) -> String {
    let mut lines = Vec::with_capacity(headlines.len() + 1);
    lines.push(HEADER.to_string());
    lines.extend(headlines.iter().map(|h| format!("- {}", h.title)));
    lines.join("\n")
}

/// Render a 1-based numbered list, preceded by `prefix` when non-empty.
pub fn render_numbered(headlines: &[Headline], prefix: &str) -> String {
    let body = headlines
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{}) {}", i + 1, h.title))
        .collect::<Vec<_>>()
        .join("\n");

    if prefix.is_empty() {
        body
    } else {
        format!("{}\n{}", prefix, body)
    }
}

/// Cut `body` to at most `max_chars` characters, ending in `"..."` when cut.
pub fn truncate_to_budget(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        return body.to_string();
    }
    if max_chars < ELLIPSIS.len() {
        return ".".repeat(max_chars);
    }

    let mut truncated: String = body.chars().take(max_chars - ELLIPSIS.len()).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Bulleted rendering truncated to `budget`.
pub fn format_body(headlines: &[Headline], budget: SmsBudget) -> String {
    truncate_to_budget(&render_bulleted(headlines), budget.max_chars())
}

/// Formatter carrying the budget and rendering style chosen at construction.
#[derive(Debug, Clone, Default)]
pub struct SmsFormatter {
    budget: SmsBudget,
    style: MessageStyle,
    numbered_prefix: String,
}

impl SmsFormatter {
    pub fn new(budget: SmsBudget, style: MessageStyle) -> Self {
        Self {
            budget,
            style,
            numbered_prefix: String::new(),
        }
    }

    pub fn from_config(config: &SmsConfig) -> Self {
        Self::new(config.budget(), config.style).with_numbered_prefix(&config.numbered_prefix)
    }

    pub fn with_numbered_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.numbered_prefix = prefix.into();
        self
    }

    pub fn budget(&self) -> SmsBudget {
        self.budget
    }

    pub fn style(&self) -> MessageStyle {
        self.style
    }

    /// Render `headlines` in the configured style and fit it to the budget.
    pub fn format(&self, headlines: &[Headline]) -> String {
        let body = match self.style {
            MessageStyle::Bulleted => render_bulleted(headlines),
            MessageStyle::Numbered => render_numbered(headlines, &self.numbered_prefix),
        };
        truncate_to_budget(&body, self.budget.max_chars())
    }
}
