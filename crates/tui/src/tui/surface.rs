//! Terminal rendering surface. Holds exactly what the controller told it and the
//! geometry of the last frame, which is what mouse hit-testing works from.

use ratatui::layout::Rect;

use crate::core::{RenderSurface, RowBounds, Task};
use crate::tui::constants::{CHECKBOX_WIDTH, HIGHLIGHT_SYMBOL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SurfaceRow {
    pub(crate) text: String,
    pub(crate) completed: bool,
    pub(crate) visible: bool,
}

/// Which part of a row a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowHit {
    Checkbox(usize),
    Delete(usize),
    Body(usize),
}

#[derive(Debug, Default)]
pub(crate) struct TerminalSurface {
    rows: Vec<SurfaceRow>,
    order: Vec<usize>,
    counter: String,
    error: Option<String>,
    panel_visible: bool,
    list_area: Rect,
    scroll_offset: usize,
}

impl TerminalSurface {
    pub(crate) fn new() -> Self {
        Self {
            panel_visible: true,
            ..Self::default()
        }
    }

    pub(crate) fn row(&self, position: usize) -> Option<&SurfaceRow> {
        self.rows.get(position)
    }

    /// Store positions in drawn order, hidden rows included.
    pub(crate) fn order(&self) -> &[usize] {
        &self.order
    }

    /// Positions of the rows that are drawn, top to bottom.
    pub(crate) fn displayed(&self) -> Vec<usize> {
        self.order
            .iter()
            .copied()
            .filter(|&position| self.rows.get(position).is_some_and(|row| row.visible))
            .collect()
    }

    pub(crate) fn counter(&self) -> &str {
        &self.counter
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }

    pub(crate) fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// Record where the list was drawn, the inner area of its block and its scroll offset.
    pub(crate) fn set_viewport(&mut self, area: Rect, offset: usize) {
        self.list_area = area;
        self.scroll_offset = offset;
    }

    /// Map a terminal cell to the row drawn there.
    pub(crate) fn hit_test(&self, column: u16, row: u16) -> Option<RowHit> {
        if !self.panel_visible || !contains(self.list_area, column, row) {
            return None;
        }
        let slot = self.scroll_offset + usize::from(row - self.list_area.y);
        let position = *self.displayed().get(slot)?;

        let symbol_width = HIGHLIGHT_SYMBOL.chars().count() as u16;
        let checkbox_start = self.list_area.x + symbol_width;
        let right_edge = self.list_area.x + self.list_area.width;
        if column >= checkbox_start && column < checkbox_start + CHECKBOX_WIDTH {
            Some(RowHit::Checkbox(position))
        } else if column + 2 >= right_edge {
            Some(RowHit::Delete(position))
        } else {
            Some(RowHit::Body(position))
        }
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height
}

impl RenderSurface for TerminalSurface {
    fn render_rows(&mut self, tasks: &[Task]) {
        self.rows = tasks
            .iter()
            .map(|task| SurfaceRow {
                text: task.text.clone(),
                completed: task.completed,
                visible: true,
            })
            .collect();
        self.order = (0..tasks.len()).collect();
    }

    fn preview_order(&mut self, order: &[usize]) {
        self.order = order.to_vec();
    }

    fn set_row_visible(&mut self, position: usize, visible: bool) {
        if let Some(row) = self.rows.get_mut(position) {
            row.visible = visible;
        }
    }

    fn set_counter(&mut self, text: &str) {
        self.counter = text.to_string();
    }

    fn show_error(&mut self, message: Option<&str>) {
        self.error = message.map(str::to_string);
    }

    fn set_panel_visible(&mut self, visible: bool) {
        self.panel_visible = visible;
    }

    fn row_bounds(&self) -> Vec<RowBounds> {
        if !self.panel_visible {
            return Vec::new();
        }
        let top = f32::from(self.list_area.y) - self.scroll_offset as f32;
        self.displayed()
            .into_iter()
            .enumerate()
            .map(|(slot, position)| RowBounds::new(position, top + slot as f32, 1.0))
            .collect()
    }
}
