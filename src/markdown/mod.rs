//! Markdown rendering for remote messages
//!
//! Converts reply text to styled ratatui Lines. Handles code blocks, inline
//! code, bold, italic, strikethrough, headings, lists, and links. Bare
//! `http(s)://` URLs in plain text are highlighted too.
//!
//! Replies are rendered while they stream in, so unterminated constructs
//! (an open code fence, a dangling `**`) must render as whatever
//! pulldown-cmark makes of them without failing.

mod styles;

pub use styles::{STYLE_CODE_BLOCK, STYLE_HEADING, STYLE_INLINE_CODE, STYLE_LINK, STYLE_LIST_MARKER};

use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;

/// Plain-text URL: scheme followed by anything up to whitespace or brackets
static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s<>\[\]()]+").expect("Invalid URL regex pattern"));

/// Bare URLs found in `text`, in order.
pub fn detect_plain_urls(text: &str) -> Vec<&str> {
    URL_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}

/// Split `text` into spans, giving URLs the link style.
fn spans_with_urls(text: &str, base: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut last_end = 0;

    for m in URL_REGEX.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(text[last_end..m.start()].to_string(), base));
        }
        spans.push(Span::styled(m.as_str().to_string(), base.patch(STYLE_LINK)));
        last_end = m.end();
    }
    if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base));
    }
    spans
}

/// State threaded through one render pass
struct Renderer {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    style_stack: Vec<Style>,
    /// Counter of the innermost ordered list, `None` for bullets
    list_stack: Vec<Option<u64>>,
    in_code_block: bool,
    in_link: bool,
}

impl Renderer {
    fn new(base: Style) -> Self {
        Self {
            lines: Vec::new(),
            spans: Vec::new(),
            style_stack: vec![base],
            list_stack: Vec::new(),
            in_code_block: false,
            in_link: false,
        }
    }

    fn style(&self) -> Style {
        self.style_stack.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, patch: Style) {
        let next = self.style().patch(patch);
        self.style_stack.push(next);
    }

    fn pop_style(&mut self) {
        // The base style is never popped
        if self.style_stack.len() > 1 {
            self.style_stack.pop();
        }
    }

    fn flush(&mut self) {
        if !self.spans.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        }
    }

    fn blank_line(&mut self) {
        self.flush();
        if !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
    }

    fn start(&mut self, tag: Tag) {
        match tag {
            Tag::Paragraph => {
                if self.list_stack.is_empty() {
                    self.blank_line();
                }
            }
            Tag::Heading { .. } => {
                self.blank_line();
                self.push_style(STYLE_HEADING);
            }
            Tag::CodeBlock(_) => {
                self.blank_line();
                self.in_code_block = true;
                self.push_style(STYLE_CODE_BLOCK);
            }
            Tag::Strong => self.push_style(Style::new().add_modifier(Modifier::BOLD)),
            Tag::Emphasis => self.push_style(Style::new().add_modifier(Modifier::ITALIC)),
            Tag::Strikethrough => {
                self.push_style(Style::new().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { .. } => {
                self.in_link = true;
                self.push_style(STYLE_LINK);
            }
            Tag::List(start) => {
                if self.list_stack.is_empty() {
                    self.blank_line();
                } else {
                    self.flush();
                }
                self.list_stack.push(start);
            }
            Tag::Item => {
                self.flush();
                let depth = self.list_stack.len().saturating_sub(1);
                let marker = match self.list_stack.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.spans.push(Span::raw("  ".repeat(depth)));
                self.spans.push(Span::styled(marker, STYLE_LIST_MARKER));
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::Item => self.flush(),
            TagEnd::Heading(_) => {
                self.flush();
                self.pop_style();
            }
            TagEnd::CodeBlock => {
                self.flush();
                self.in_code_block = false;
                self.pop_style();
            }
            TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.in_link = false;
                self.pop_style();
            }
            TagEnd::List(_) => {
                self.flush();
                self.list_stack.pop();
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        let style = self.style();
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                // Keep empty code lines
                let spans = std::mem::take(&mut self.spans);
                self.lines.push(Line::from(spans));
            }
            if part.is_empty() {
                continue;
            }
            if self.in_code_block || self.in_link {
                self.spans.push(Span::styled(part.to_string(), style));
            } else {
                self.spans.extend(spans_with_urls(part, style));
            }
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        // Code block text ends with a newline, which leaves a trailing blank
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        if self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.lines
    }
}

/// Render markdown `text` to styled lines on top of `base`.
///
/// Always returns at least one line.
pub fn render_markdown(text: &str, base: Style) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut renderer = Renderer::new(base);
    for event in Parser::new_ext(text, options) {
        match event {
            Event::Start(tag) => renderer.start(tag),
            Event::End(tag) => renderer.end(tag),
            Event::Text(text) => renderer.text(&text),
            Event::Code(code) => {
                let style = renderer.style().patch(STYLE_INLINE_CODE);
                renderer.spans.push(Span::styled(code.to_string(), style));
            }
            Event::SoftBreak | Event::HardBreak => renderer.flush(),
            Event::Rule => {
                renderer.blank_line();
                renderer.lines.push(Line::styled("───", STYLE_CODE_BLOCK));
            }
            _ => {}
        }
    }
    renderer.finish()
}
