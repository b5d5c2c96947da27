//! Drag-and-drop reordering: anchor lookup and the preview order of an in-flight drag.

use crate::model::TaskId;

/// Vertical extent of a rendered row, keyed by the task position it shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBounds {
    pub position: usize,
    pub top: f32,
    pub height: f32,
}

impl RowBounds {
    pub fn new(position: usize, top: f32, height: f32) -> Self {
        Self {
            position,
            top,
            height,
        }
    }

    pub fn midpoint(&self) -> f32 {
        self.top + self.height / 2.0
    }
}

/// First row (in visual order, skipping the dragged one) whose midpoint lies below
/// the pointer. A pointer exactly on a midpoint does not select that row.
pub fn find_anchor(rows: &[RowBounds], dragged: usize, pointer_y: f32) -> Option<usize> {
    rows.iter()
        .filter(|row| row.position != dragged)
        .find(|row| pointer_y < row.midpoint())
        .map(|row| row.position)
}

/// Preview state of a drag. `order` lists store positions in the order they are
/// currently drawn; only the dragged entry ever moves.
#[derive(Debug, Clone)]
pub struct DragSession {
    id: TaskId,
    origin: usize,
    order: Vec<usize>,
}

impl DragSession {
    pub fn new(id: TaskId, origin: usize, len: usize) -> Self {
        Self {
            id,
            origin,
            order: (0..len).collect(),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn origin(&self) -> usize {
        self.origin
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Where the dragged task would land if dropped now.
    pub fn target(&self) -> usize {
        self.order
            .iter()
            .position(|&position| position == self.origin)
            .unwrap_or(self.origin)
    }

    /// Re-place the dragged entry before the anchor under `pointer_y`, or at the end
    /// when there is none. Returns whether the preview order changed.
    pub fn hover(&mut self, rows: &[RowBounds], pointer_y: f32) -> bool {
        let before = self.order.clone();
        let anchor = find_anchor(rows, self.origin, pointer_y);

        self.order.retain(|&position| position != self.origin);
        let slot = anchor
            .and_then(|anchor| self.order.iter().position(|&position| position == anchor))
            .unwrap_or(self.order.len());
        self.order.insert(slot, self.origin);

        self.order != before
    }
}
