//! Markdown to ratatui rendering.
//!
//! The solver answers in markdown; this renders the subset it produces
//! (paragraphs, emphasis/strong, inline and fenced code, headings,
//! lists, rules) to styled [`Line`]s.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::theme::Palette;

/// Render markdown content to ratatui lines with `base_style` as the
/// default text style.
#[must_use]
pub fn render_markdown(content: &str, base_style: Style, palette: &Palette) -> Vec<Line<'static>> {
    MarkdownRenderer::new(base_style, palette).render(content)
}

struct MarkdownRenderer<'p> {
    base_style: Style,
    palette: &'p Palette,
    lines: Vec<Line<'static>>,
    current_spans: Vec<Span<'static>>,

    // Style stack for nested formatting (counters, not booleans), so
    // `**bold with *italic***` nests correctly.
    bold_count: usize,
    italic_count: usize,

    in_code_block: bool,
    list_stack: Vec<Option<u64>>,
}

impl<'p> MarkdownRenderer<'p> {
    fn new(base_style: Style, palette: &'p Palette) -> Self {
        Self {
            base_style,
            palette,
            lines: Vec::new(),
            current_spans: Vec::new(),
            bold_count: 0,
            italic_count: 0,
            in_code_block: false,
            list_stack: Vec::new(),
        }
    }

    fn render(mut self, content: &str) -> Vec<Line<'static>> {
        let parser = Parser::new_ext(content, Options::empty());

        for event in parser {
            match event {
                Event::Start(tag) => self.start_tag(&tag),
                Event::End(tag) => self.end_tag(&tag),
                Event::Text(text) => self.push_text(&text),
                Event::Code(code) => {
                    let style = self
                        .base_style
                        .fg(self.palette.accent)
                        .bg(self.palette.bg_panel);
                    self.current_spans
                        .push(Span::styled(code.into_string(), style));
                }
                Event::SoftBreak => self.current_spans.push(Span::styled(
                    " ".to_string(),
                    self.current_style(),
                )),
                Event::HardBreak => self.flush_line(),
                Event::Rule => {
                    self.flush_line();
                    self.lines.push(Line::from(Span::styled(
                        "────────".to_string(),
                        Style::default().fg(self.palette.bg_border),
                    )));
                }
                _ => {}
            }
        }

        self.flush_line();
        // Drop a trailing blank separator line, if any.
        while self
            .lines
            .last()
            .is_some_and(|line| line.spans.iter().all(|s| s.content.trim().is_empty()))
        {
            self.lines.pop();
        }
        self.lines
    }

    fn start_tag(&mut self, tag: &Tag<'_>) {
        match tag {
            Tag::Paragraph => {}
            Tag::Heading { .. } => {
                self.flush_line();
                self.bold_count += 1;
            }
            Tag::Emphasis => self.italic_count += 1,
            Tag::Strong => self.bold_count += 1,
            Tag::CodeBlock(_) => {
                self.flush_line();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                self.flush_line();
                self.list_stack.push(*start);
            }
            Tag::Item => {
                self.flush_line();
                let depth = self.list_stack.len().saturating_sub(1);
                let marker = match self.list_stack.last_mut() {
                    Some(Some(number)) => {
                        let marker = format!("{}{}. ", "  ".repeat(depth), number);
                        *number += 1;
                        marker
                    }
                    _ => format!("{}• ", "  ".repeat(depth)),
                };
                self.current_spans.push(Span::styled(
                    marker,
                    self.base_style.fg(self.palette.primary),
                ));
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: &TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_line();
                self.lines.push(Line::default());
            }
            TagEnd::Heading(_) => {
                self.bold_count = self.bold_count.saturating_sub(1);
                self.flush_line();
                self.lines.push(Line::default());
            }
            TagEnd::Emphasis => self.italic_count = self.italic_count.saturating_sub(1),
            TagEnd::Strong => self.bold_count = self.bold_count.saturating_sub(1),
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.flush_line();
            }
            TagEnd::List(_) => {
                self.list_stack.pop();
                self.flush_line();
            }
            TagEnd::Item => self.flush_line(),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.in_code_block {
            let style = self
                .base_style
                .fg(self.palette.accent)
                .bg(self.palette.bg_panel);
            for line in text.lines() {
                self.lines
                    .push(Line::from(Span::styled(format!("  {line}"), style)));
            }
            return;
        }

        let style = self.current_style();
        self.current_spans
            .push(Span::styled(text.to_string(), style));
    }

    fn current_style(&self) -> Style {
        let mut style = self.base_style;
        if self.bold_count > 0 {
            style = style
                .add_modifier(Modifier::BOLD)
                .fg(self.palette.text_primary);
        }
        if self.italic_count > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }

    fn flush_line(&mut self) {
        if !self.current_spans.is_empty() {
            let spans = std::mem::take(&mut self.current_spans);
            self.lines.push(Line::from(spans));
        }
    }
}
