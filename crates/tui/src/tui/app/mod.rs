use std::time::Instant;

use ratatui::style::{Color, Style};
use ratatui::widgets::ListState;

use super::buffer::InputLine;
use super::constants::*;
use super::surface::TerminalSurface;
use crate::config::AppConfig;
use crate::core::{Gesture, Outcome, ViewController};
use crate::model::FilterMode;

mod input;
mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Add,
    Help,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusKind {
    Info,
    Error,
}

/// A mouse drag in progress: the dragged position and the last pointer row seen.
#[derive(Debug, Clone, Copy)]
struct PointerDrag {
    position: usize,
    last_row: u16,
}

pub(crate) struct App {
    config: AppConfig,
    controller: ViewController,
    surface: TerminalSurface,
    selected: usize,
    list_state: ListState,
    input_mode: InputMode,
    input: InputLine,
    status: Option<StatusMessage>,
    pointer_drag: Option<PointerDrag>,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(config: AppConfig, controller: ViewController) -> Self {
        let mut surface = TerminalSurface::new();
        controller.mount(&mut surface);
        let mut app = Self {
            config,
            controller,
            surface,
            selected: 0,
            list_state: ListState::default(),
            input_mode: InputMode::Normal,
            input: InputLine::new(),
            status: None,
            pointer_drag: None,
            should_quit: false,
        };
        app.sync_selection();
        app
    }

    pub(crate) fn on_tick(&mut self) {
        if let Some(status) = &self.status {
            if status.created_at.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn dispatch(&mut self, gesture: Gesture) -> Outcome {
        let outcome = self.controller.dispatch(gesture, &mut self.surface);
        // Mutations abandon the controller's drag; the pointer drag goes with it.
        if !self.controller.is_dragging() {
            self.pointer_drag = None;
        }
        self.sync_selection();
        outcome
    }

    /// Store position of the highlighted row, if any row is drawn.
    fn selected_position(&self) -> Option<usize> {
        self.surface.displayed().get(self.selected).copied()
    }

    fn select_position(&mut self, position: usize) {
        if let Some(slot) = self
            .surface
            .displayed()
            .iter()
            .position(|&candidate| candidate == position)
        {
            self.selected = slot;
        }
        self.sync_selection();
    }

    fn sync_selection(&mut self) {
        let count = self.surface.displayed().len();
        if count == 0 || !self.surface.panel_visible() {
            self.selected = 0;
            self.list_state.select(None);
            return;
        }
        if self.selected >= count {
            self.selected = count - 1;
        }
        self.list_state.select(Some(self.selected));
    }

    fn select_next(&mut self) {
        let count = self.surface.displayed().len();
        if count == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(count - 1);
        self.sync_selection();
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.sync_selection();
    }

    fn begin_add(&mut self) {
        self.input_mode = InputMode::Add;
        self.input.clear();
        self.set_status_info(STATUS_ENTER_ADD);
    }

    fn submit_input(&mut self) {
        let text = self.input.as_str().to_string();
        match self.dispatch(Gesture::Submit(text)) {
            Outcome::Added(added) => {
                self.input.clear();
                self.input_mode = InputMode::Normal;
                self.select_position(added.position);
                self.set_status_info(format!("Added {}", added.text));
            }
            // The surface shows the validation message; keep the text for correction.
            Outcome::Rejected(_) => self.set_status_error("Task not added"),
            Outcome::Updated | Outcome::Ignored => {}
        }
    }

    fn cancel_add(&mut self) {
        self.input.clear();
        self.input_mode = InputMode::Normal;
        self.surface.clear_error();
        self.status = None;
    }

    fn toggle_position(&mut self, position: usize) {
        self.dispatch(Gesture::Toggle(position));
        let done = self
            .surface
            .row(position)
            .is_some_and(|row| row.completed);
        self.set_status_info(if done {
            "Marked task complete"
        } else {
            "Marked task active"
        });
    }

    fn toggle_selected(&mut self) {
        match self.selected_position() {
            Some(position) => self.toggle_position(position),
            None => self.set_status_info("Nothing to toggle"),
        }
    }

    fn delete_position(&mut self, position: usize) {
        self.dispatch(Gesture::Delete(position));
        self.set_status_info("Deleted task 🗑️");
    }

    fn delete_selected(&mut self) {
        match self.selected_position() {
            Some(position) => self.delete_position(position),
            None => self.set_status_info("Nothing to delete"),
        }
    }

    /// Swap the selected row with its drawn neighbour (`-1` up, `1` down).
    fn move_selected(&mut self, step: isize) {
        let displayed = self.surface.displayed();
        let Some(&from) = displayed.get(self.selected) else {
            self.set_status_info("Nothing to move");
            return;
        };
        let Some(&to) = self
            .selected
            .checked_add_signed(step)
            .and_then(|slot| displayed.get(slot))
        else {
            return;
        };
        self.dispatch(Gesture::Reorder { from, to });
        self.select_position(to);
    }

    fn set_filter(&mut self, mode: FilterMode) {
        self.dispatch(Gesture::SetFilter(mode));
        self.set_status_info(format!("Showing {} tasks", mode));
    }

    fn toggle_panel(&mut self) {
        self.dispatch(Gesture::TogglePanel);
        if self.surface.panel_visible() {
            self.set_status_info("List shown");
        } else {
            self.set_status_info(STATUS_PANEL_HIDDEN);
        }
    }

    fn show_help_overlay(&mut self) {
        self.input_mode = InputMode::Help;
        self.set_status_info(STATUS_HELP);
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("ℹ️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Info));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("⚠️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Error));
    }
}
