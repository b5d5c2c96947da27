use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::core::{Gesture, Outcome};
use crate::model::FilterMode;
use crate::tui::constants::STATUS_DRAGGING;
use crate::tui::surface::RowHit;

use super::{App, InputMode, PointerDrag};

#[derive(Debug, Clone, Copy)]
pub(crate) enum NormalAction {
    Quit,
    EnterAdd,
    ShowHelp,
    Toggle,
    Delete,
    MoveUp,
    MoveDown,
    CycleFilter,
    Filter(FilterMode),
    TogglePanel,
    CancelDrag,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
}

impl NormalAction {
    fn from_event(key: &KeyEvent) -> Option<Self> {
        if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }

        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char('a') => Some(Self::EnterAdd),
            KeyCode::Char('h') | KeyCode::Char('?') => Some(Self::ShowHelp),
            KeyCode::Char(' ') | KeyCode::Char('c') => Some(Self::Toggle),
            KeyCode::Char('x') | KeyCode::Delete => Some(Self::Delete),
            KeyCode::Char('K') => Some(Self::MoveUp),
            KeyCode::Char('J') => Some(Self::MoveDown),
            KeyCode::Char('f') => Some(Self::CycleFilter),
            KeyCode::Char('1') => Some(Self::Filter(FilterMode::All)),
            KeyCode::Char('2') => Some(Self::Filter(FilterMode::Active)),
            KeyCode::Char('3') => Some(Self::Filter(FilterMode::Completed)),
            KeyCode::Char('v') => Some(Self::TogglePanel),
            KeyCode::Esc => Some(Self::CancelDrag),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
            KeyCode::Home => Some(Self::SelectFirst),
            KeyCode::End => Some(Self::SelectLast),
            _ => None,
        }
    }
}

/// Terminal rows are whole cells, so place the pointer in the half of the cell it
/// entered from: moving down it sits low in the cell, moving up it sits high.
fn pointer_y(row: u16, last_row: u16) -> f32 {
    let within = if row > last_row { 0.75 } else { 0.25 };
    f32::from(row) + within
}

impl App {
    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Add => self.handle_add_mode(key),
            InputMode::Help => self.handle_help_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        if let Some(action) = NormalAction::from_event(&key) {
            self.execute_normal_action(action);
        }
    }

    fn execute_normal_action(&mut self, action: NormalAction) {
        match action {
            NormalAction::Quit => {
                self.should_quit = true;
            }
            NormalAction::EnterAdd => self.begin_add(),
            NormalAction::ShowHelp => self.show_help_overlay(),
            NormalAction::Toggle => self.toggle_selected(),
            NormalAction::Delete => self.delete_selected(),
            NormalAction::MoveUp => self.move_selected(-1),
            NormalAction::MoveDown => self.move_selected(1),
            NormalAction::CycleFilter => {
                let next = self.controller.filter().next();
                self.set_filter(next);
            }
            NormalAction::Filter(mode) => self.set_filter(mode),
            NormalAction::TogglePanel => self.toggle_panel(),
            NormalAction::CancelDrag => {
                self.pointer_drag = None;
                if self.dispatch(Gesture::DragCancel) == Outcome::Updated {
                    self.set_status_info("Drag cancelled");
                }
            }
            NormalAction::SelectNext => self.select_next(),
            NormalAction::SelectPrev => self.select_prev(),
            NormalAction::SelectFirst => {
                self.selected = 0;
                self.sync_selection();
            }
            NormalAction::SelectLast => {
                self.selected = usize::MAX;
                self.sync_selection();
            }
        }
    }

    fn handle_add_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_input(),
            KeyCode::Esc => self.cancel_add(),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete_char(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Char(c) => self.input.insert_char(c),
            _ => {}
        }
    }

    fn handle_help_mode(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            self.input_mode = InputMode::Normal;
            self.status = None;
        }
    }

    pub(crate) fn on_mouse(&mut self, event: MouseEvent) {
        if self.input_mode != InputMode::Normal {
            return;
        }
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pointer_down(event.column, event.row),
            MouseEventKind::Drag(MouseButton::Left) => self.pointer_moved(event.row),
            MouseEventKind::Up(MouseButton::Left) => self.pointer_up(),
            MouseEventKind::ScrollDown => self.select_next(),
            MouseEventKind::ScrollUp => self.select_prev(),
            _ => {}
        }
    }

    fn pointer_down(&mut self, column: u16, row: u16) {
        match self.surface.hit_test(column, row) {
            Some(RowHit::Checkbox(position)) => self.toggle_position(position),
            Some(RowHit::Delete(position)) => self.delete_position(position),
            Some(RowHit::Body(position)) => {
                self.select_position(position);
                if self.dispatch(Gesture::DragStart(position)) == Outcome::Updated {
                    self.pointer_drag = Some(PointerDrag {
                        position,
                        last_row: row,
                    });
                    self.set_status_info(STATUS_DRAGGING);
                }
            }
            None => {}
        }
    }

    fn pointer_moved(&mut self, row: u16) {
        let Some(drag) = self.pointer_drag.as_mut() else {
            return;
        };
        if row == drag.last_row {
            return;
        }
        let y = pointer_y(row, drag.last_row);
        drag.last_row = row;
        let position = drag.position;

        self.dispatch(Gesture::DragOver { pointer_y: y });
        self.select_position(position);
    }

    fn pointer_up(&mut self) {
        let Some(drag) = self.pointer_drag.take() else {
            return;
        };
        // The drawn preview slot is the store position the row will have after the drop.
        let target = self
            .surface
            .order()
            .iter()
            .position(|&candidate| candidate == drag.position);
        self.dispatch(Gesture::DragEnd);
        match target {
            Some(target) if target != drag.position => {
                self.select_position(target);
                self.set_status_info(format!("Moved task to #{}", target + 1));
            }
            _ => self.status = None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pointer_y;

    #[test]
    fn pointer_sits_in_the_half_it_entered_from() {
        assert_eq!(pointer_y(5, 4), 5.75);
        assert_eq!(pointer_y(5, 6), 5.25);
    }
}
