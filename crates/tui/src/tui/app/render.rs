use std::cmp::min;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, HighlightSpacing, List, ListItem, Paragraph, Wrap,
};
use ratatui::Frame;

use crate::tui::constants::{APP_VERSION, HIGHLIGHT_SYMBOL, KEY_HINTS, STATUS_PANEL_HIDDEN};
use crate::tui::helpers::{
    accent_title, build_help_lines, centered_rect, row_text, BG_ACCENT, BG_BASE, BG_PANEL,
};

use super::{App, InputMode};

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);
        let input_height = if self.input_mode == InputMode::Add { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(input_height),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        if self.input_mode == InputMode::Add {
            self.draw_input(f, chunks[1]);
        }
        self.draw_error(f, chunks[2]);
        self.draw_body(f, chunks[3]);
        self.draw_footer(f, chunks[4]);

        if self.input_mode == InputMode::Help {
            self.draw_help_overlay(f, size);
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                format!(" taskpad v{} ", APP_VERSION),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("— {} ", self.surface.counter())),
            Span::styled(
                format!("🔍 {}", self.controller.filter()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("  "),
            Span::styled(
                format!("💾 {}", self.config.db_path().display()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(
            Paragraph::new(line).style(Style::default().bg(BG_BASE)),
            area,
        );
    }

    fn draw_input(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("➕ Add Task"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(Paragraph::new(self.input.as_str()), inner);

        let column = min(self.input.cursor_column() as u16, inner.width.saturating_sub(1));
        f.set_cursor(inner.x + column, inner.y);
    }

    fn draw_error(&self, f: &mut Frame<'_>, area: Rect) {
        if let Some(message) = self.surface.error() {
            let line = Line::from(vec![Span::styled(
                format!(" {}", message),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]);
            f.render_widget(Paragraph::new(line), area);
        }
    }

    fn draw_body(&mut self, f: &mut Frame<'_>, area: Rect) {
        if !self.surface.panel_visible() {
            self.surface.set_viewport(Rect::default(), 0);
            let hint = Paragraph::new(STATUS_PANEL_HIDDEN)
                .style(Style::default().fg(Color::DarkGray).bg(BG_PANEL))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(hint, area);
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(&format!("Tasks · {}", self.controller.filter())))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        let width =
            usize::from(inner.width).saturating_sub(HIGHLIGHT_SYMBOL.chars().count());
        let dragged = self.pointer_drag.map(|drag| drag.position);

        let items: Vec<ListItem> = self
            .surface
            .displayed()
            .into_iter()
            .filter_map(|position| {
                let row = self.surface.row(position)?;
                let mut style = if row.completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::White)
                };
                if dragged == Some(position) {
                    style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
                }
                Some(ListItem::new(Line::from(Span::styled(
                    row_text(row.completed, &row.text, width),
                    style,
                ))))
            })
            .collect();

        let empty = items.is_empty();
        let list = List::new(items)
            .block(block)
            .highlight_symbol(HIGHLIGHT_SYMBOL)
            .highlight_spacing(HighlightSpacing::Always)
            .highlight_style(Style::default().bg(BG_ACCENT));
        f.render_stateful_widget(list, area, &mut self.list_state);
        self.surface.set_viewport(inner, self.list_state.offset());

        if empty {
            let hint = Paragraph::new("Nothing here yet — press a to add a task")
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true });
            f.render_widget(hint, inner);
        }
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.style())])
        } else {
            Line::from(vec![Span::raw("Ready")])
        };
        f.render_widget(Paragraph::new(status_line), lines[0]);

        let help = match self.input_mode {
            InputMode::Normal => KEY_HINTS,
            InputMode::Add => "Enter to add ✍️ • Esc to cancel",
            InputMode::Help => "Enter/Esc to close ❔",
        };
        let help_line = Line::from(vec![Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )]);
        f.render_widget(Paragraph::new(help_line), lines[1]);
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let entries = build_help_lines();
        let height = entries.len() as u16 + 2;
        let popup_area = centered_rect(min(area.width.saturating_sub(4), 64), height, area);
        f.render_widget(Clear, popup_area);

        let lines: Vec<Line> = entries
            .into_iter()
            .map(|(keys, description)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<16}", keys),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(description),
                ])
            })
            .collect();
        let help = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(accent_title("❔ Keys"))
                .style(Style::default().bg(BG_PANEL)),
        );
        f.render_widget(help, popup_area);
    }
}
