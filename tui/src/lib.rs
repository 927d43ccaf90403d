//! Terminal UI for Nebula.
//!
//! Rendering is a pure function of `&App`: the cli calls [`draw`] once per
//! frame and [`handle_events`] to drain pending input. Views mirror the
//! application structure: a header tab bar, the calculator (display +
//! keypad grid generated from the static key tables), the AI solver chat,
//! and a sliding history sidebar overlay.

mod format;
mod input;
mod markdown;
pub mod theme;

pub use input::handle_events;
pub use markdown::render_markdown;
pub use theme::{Glyphs, Palette};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use nebula_engine::{App, KeypadFocus, Mode};
use nebula_types::{EntryKind, KeyConfig, KeyType, Role, SCIENTIFIC_KEYS, STANDARD_KEYS};

const KEYPAD_WIDTH: u16 = 46;
const SIDEBAR_WIDTH: u16 = 36;

/// Render one frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = Palette::new(app.options());
    let glyphs = Glyphs::new(app.options().ascii_only);

    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg_dark)),
        area,
    );

    let [header_area, content_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_header(frame, app, &palette, &glyphs, header_area);

    match app.mode() {
        Mode::Standard => draw_calculator(frame, app, &palette, content_area),
        Mode::Ai => draw_chat(frame, app, &palette, &glyphs, content_area),
    }

    draw_footer(frame, app, &palette, footer_area);

    if app.history_open() {
        draw_history(frame, app, &palette, content_area);
    }
}

// ----------------------------------------------------------------------
// Header
// ----------------------------------------------------------------------

fn draw_header(frame: &mut Frame, app: &App, palette: &Palette, glyphs: &Glyphs, area: Rect) {
    let block = Block::bordered()
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_dark));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let tab = |label: &str, active: bool| -> Span<'static> {
        let style = if active {
            Style::default()
                .fg(palette.primary)
                .bg(palette.bg_highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text_secondary)
        };
        Span::styled(format!("  {label}  "), style)
    };

    let tabs = Line::from(vec![
        tab("Calculator", app.mode() == Mode::Standard),
        Span::raw(" "),
        tab("AI Solver", app.mode() == Mode::Ai),
    ]);
    frame.render_widget(Paragraph::new(tabs), inner);

    let mut right = vec![Span::styled("NEBULA CALC", palette.title())];
    if !app.history().is_empty() {
        right.push(Span::raw(" "));
        right.push(Span::styled(glyphs.dot, Style::default().fg(palette.primary)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(right)).alignment(Alignment::Right),
        inner,
    );
}

// ----------------------------------------------------------------------
// Calculator view
// ----------------------------------------------------------------------

fn draw_calculator(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let width = KEYPAD_WIDTH.min(area.width);
    let [_, column, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(area);

    let sci_height = if app.scientific() { 3 } else { 0 };
    let [display_area, sci_area, keypad_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(sci_height),
        Constraint::Fill(1),
    ])
    .areas(column);

    draw_display(frame, app, palette, display_area);
    if app.scientific() {
        draw_scientific_row(frame, app, palette, sci_area);
    }
    draw_keypad(frame, app, palette, keypad_area);
}

fn draw_display(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let calc = app.calc();

    let block = Block::bordered()
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_panel));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let expression = Line::from(Span::styled(
        calc.expression_text(),
        Style::default().fg(palette.text_muted),
    ));
    let value_style = if calc.is_error() {
        palette.error_text()
    } else {
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD)
    };
    let value = Line::from(Span::styled(calc.display_value().to_string(), value_style));

    frame.render_widget(
        Paragraph::new(vec![expression, value]).alignment(Alignment::Right),
        inner,
    );
}

fn draw_scientific_row(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let constraints = vec![Constraint::Ratio(1, SCIENTIFIC_KEYS.len() as u32); SCIENTIFIC_KEYS.len()];
    let cells = Layout::horizontal(constraints).split(area);

    for (index, key) in SCIENTIFIC_KEYS.iter().enumerate() {
        let selected = app.keypad_focus() == KeypadFocus::Scientific(index);
        draw_key_cell(frame, palette, cells[index], *key, selected);
    }
}

fn draw_keypad(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let rows = grid_rows();
    let row_constraints = vec![Constraint::Length(3); rows.len()];
    let row_areas = Layout::vertical(row_constraints).split(area);

    for (row_index, row) in rows.iter().enumerate() {
        let constraints: Vec<Constraint> = row
            .iter()
            .map(|&key_index| {
                Constraint::Ratio(
                    u32::from(STANDARD_KEYS[key_index].span),
                    u32::from(nebula_engine::STANDARD_COLUMNS),
                )
            })
            .collect();
        let cells = Layout::horizontal(constraints).split(row_areas[row_index]);

        for (cell, &key_index) in cells.iter().zip(row) {
            let selected = app.keypad_focus() == KeypadFocus::Standard(key_index);
            draw_key_cell(frame, palette, *cell, STANDARD_KEYS[key_index], selected);
        }
    }
}

fn draw_key_cell(frame: &mut Frame, palette: &Palette, area: Rect, key: KeyConfig, selected: bool) {
    let label_style = match key.kind {
        KeyType::Number => Style::default().fg(palette.text_primary),
        KeyType::Operator => Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
        KeyType::Action if key.token == "=" => Style::default()
            .fg(palette.text_primary)
            .bg(palette.primary_dim)
            .add_modifier(Modifier::BOLD),
        KeyType::Action => Style::default().fg(palette.warning),
        KeyType::Scientific => Style::default().fg(palette.primary),
    };

    let (border_style, cell_style) = if selected {
        (
            Style::default().fg(palette.primary),
            Style::default().bg(palette.bg_highlight),
        )
    } else {
        (
            Style::default().fg(palette.bg_border),
            Style::default().bg(palette.bg_panel),
        )
    };

    let block = Block::bordered().border_style(border_style).style(cell_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(key.label.to_string(), label_style)))
            .alignment(Alignment::Center),
        inner,
    );
}

/// Key indices grouped into grid rows, honoring spans.
fn grid_rows() -> Vec<Vec<usize>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut col = 0u8;
    for (index, key) in STANDARD_KEYS.iter().enumerate() {
        row.push(index);
        col += key.span;
        if col >= nebula_engine::STANDARD_COLUMNS {
            rows.push(std::mem::take(&mut row));
            col = 0;
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

// ----------------------------------------------------------------------
// AI solver view
// ----------------------------------------------------------------------

fn draw_chat(frame: &mut Frame, app: &App, palette: &Palette, glyphs: &Glyphs, area: Rect) {
    let [transcript_area, input_area, hint_area] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_transcript(frame, app, palette, glyphs, transcript_area);
    draw_chat_input(frame, app, palette, input_area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Powered by Gemini. AI can make mistakes.",
            Style::default().fg(palette.text_muted),
        )))
        .alignment(Alignment::Center),
        hint_area,
    );
}

fn draw_transcript(frame: &mut Frame, app: &App, palette: &Palette, glyphs: &Glyphs, area: Rect) {
    let block = Block::bordered()
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_dark));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line<'static>> = Vec::new();
    for message in app.chat().messages() {
        match message.role() {
            Role::User => {
                lines.push(Line::from(Span::styled(
                    "You",
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                )));
                for text_line in message.content().lines() {
                    lines.push(Line::from(Span::styled(
                        text_line.to_string(),
                        Style::default().fg(palette.text_primary),
                    )));
                }
            }
            Role::Model => {
                if message.is_error() {
                    lines.push(Line::from(Span::styled(
                        format!("{} Gemini Assistant", glyphs.spark),
                        palette.error_text(),
                    )));
                    for text_line in message.content().lines() {
                        lines.push(Line::from(Span::styled(
                            text_line.to_string(),
                            Style::default().fg(palette.error),
                        )));
                    }
                } else {
                    lines.push(Line::from(Span::styled(
                        format!("{} Gemini Assistant", glyphs.spark),
                        palette.title(),
                    )));
                    lines.extend(markdown::render_markdown(
                        message.content(),
                        Style::default().fg(palette.text_secondary),
                        palette,
                    ));
                }
            }
        }
        lines.push(Line::default());
    }

    if app.solver_pending() {
        lines.push(Line::from(vec![
            Span::styled(
                glyphs.spinner_frame(app.tick_count()).to_string(),
                Style::default().fg(palette.primary),
            ),
            Span::styled(" Thinking…", Style::default().fg(palette.text_muted)),
        ]));
    }

    let total = lines.len() as u16;
    let visible = inner.height;
    let bottom_scroll = total.saturating_sub(visible);
    let scroll = bottom_scroll.saturating_sub(app.chat().scroll_offset());

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        inner,
    );
}

fn draw_chat_input(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let pending = app.solver_pending();
    let border_style = if pending {
        Style::default().fg(palette.bg_border)
    } else {
        Style::default().fg(palette.primary_dim)
    };
    let block = Block::bordered()
        .border_style(border_style)
        .style(Style::default().bg(palette.bg_panel));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let draft = app.chat().draft();
    let content = if draft.is_empty() && !pending {
        Line::from(Span::styled(
            "Ask anything… e.g., 'Derivative of x^2 + 5x'",
            Style::default().fg(palette.text_muted),
        ))
    } else {
        Line::from(Span::styled(
            draft.to_string(),
            Style::default().fg(palette.text_primary),
        ))
    };
    frame.render_widget(Paragraph::new(content), inner);

    if !pending {
        let cursor_x = inner.x + (draft.width() as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position(Position::new(cursor_x, inner.y));
    }
}

// ----------------------------------------------------------------------
// History sidebar
// ----------------------------------------------------------------------

fn draw_history(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let width = SIDEBAR_WIDTH.min(area.width);
    let sidebar = Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height: area.height,
    };

    frame.render_widget(Clear, sidebar);
    let block = Block::bordered()
        .title(" History ")
        .title_bottom(" Enter copy · d clear · Esc close ")
        .border_style(Style::default().fg(palette.primary_dim))
        .style(Style::default().bg(palette.bg_panel));
    let inner = block.inner(sidebar);
    frame.render_widget(block, sidebar);

    if app.history().is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No calculations yet.",
                Style::default().fg(palette.text_muted),
            )))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    const ITEM_HEIGHT: usize = 4;
    let mut lines: Vec<Line<'static>> = Vec::new();
    for (index, item) in app.history().entries().iter().enumerate() {
        let selected = index == app.history_cursor();
        let row_style = if selected {
            Style::default().bg(palette.bg_highlight)
        } else {
            Style::default()
        };

        let badge_style = match item.kind() {
            EntryKind::Standard => Style::default().fg(palette.accent),
            EntryKind::Ai => Style::default().fg(palette.primary),
        };
        lines.push(
            Line::from(vec![
                Span::styled(format!("[{}]", item.kind().badge()), badge_style),
                Span::raw(" "),
                Span::styled(
                    format::clock_time(item.timestamp()),
                    Style::default().fg(palette.text_muted),
                ),
            ])
            .style(row_style),
        );
        lines.push(
            Line::from(Span::styled(
                format::truncate(item.expression(), inner.width.saturating_sub(1) as usize),
                Style::default().fg(palette.text_secondary),
            ))
            .style(row_style),
        );
        lines.push(
            Line::from(Span::styled(
                format!("= {}", format::truncate(item.result(), inner.width.saturating_sub(3) as usize)),
                Style::default()
                    .fg(palette.success)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(row_style),
        );
        lines.push(Line::default());
    }

    // Keep the cursor's item in view.
    let cursor_top = app.history_cursor() * ITEM_HEIGHT;
    let visible = inner.height as usize;
    let scroll = cursor_top.saturating_sub(visible.saturating_sub(ITEM_HEIGHT)) as u16;

    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

// ----------------------------------------------------------------------
// Footer
// ----------------------------------------------------------------------

fn draw_footer(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let hints = if app.history_open() {
        "↑/↓ select · Enter copy · d clear · Esc close"
    } else {
        match app.mode() {
            Mode::Standard => "Tab ai · arrows move · Space press · s sci · h history · q quit",
            Mode::Ai => "Tab calc · Enter send · ↑/↓ scroll · F2 history · Ctrl+C quit",
        }
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(palette.text_muted),
        ))),
        area,
    );

    if let Some(status) = app.status() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                status.to_string(),
                Style::default()
                    .fg(palette.success)
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Right),
            area,
        );
    }
}
