//! Turns user gestures into store operations and keeps a rendering surface in sync.

use crate::error::{IndexError, ValidationError};
use crate::model::{remaining_label, FilterMode, Task, TaskAdded};
use crate::reorder::{DragSession, RowBounds};
use crate::store::TaskStore;

/// Whatever presents the rows. The controller only ever writes to it, apart from
/// asking where the rows currently sit on screen.
pub trait RenderSurface {
    /// Replace all rows with the given sequence, in order.
    fn render_rows(&mut self, tasks: &[Task]);
    /// Redraw the existing rows in a new order of store positions.
    fn preview_order(&mut self, order: &[usize]);
    fn set_row_visible(&mut self, position: usize, visible: bool);
    fn set_counter(&mut self, text: &str);
    fn show_error(&mut self, message: Option<&str>);
    fn set_panel_visible(&mut self, visible: bool);
    /// Bounds of the rows that are currently drawn, top to bottom.
    fn row_bounds(&self) -> Vec<RowBounds>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Submit(String),
    Toggle(usize),
    Delete(usize),
    Reorder { from: usize, to: usize },
    DragStart(usize),
    DragOver { pointer_y: f32 },
    DragEnd,
    DragCancel,
    SetFilter(FilterMode),
    TogglePanel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(TaskAdded),
    Rejected(ValidationError),
    Updated,
    Ignored,
}

pub struct ViewController {
    store: TaskStore,
    filter: FilterMode,
    panel_visible: bool,
    drag: Option<DragSession>,
}

impl ViewController {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            filter: FilterMode::All,
            panel_visible: true,
            drag: None,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Draw the current state from scratch.
    pub fn mount<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        self.render(surface);
        surface.set_panel_visible(self.panel_visible);
    }

    pub fn dispatch<S: RenderSurface + ?Sized>(
        &mut self,
        gesture: Gesture,
        surface: &mut S,
    ) -> Outcome {
        match gesture {
            Gesture::Submit(text) => self.submit(&text, surface),
            Gesture::Toggle(position) => {
                self.abandon_drag();
                let result = self.store.toggle_task(position);
                self.after_mutation(result, surface)
            }
            Gesture::Delete(position) => {
                self.abandon_drag();
                let result = self.store.remove_task(position);
                self.after_mutation(result, surface)
            }
            Gesture::Reorder { from, to } => {
                self.abandon_drag();
                let result = self.store.move_task(from, to);
                self.after_mutation(result, surface)
            }
            Gesture::DragStart(position) => self.drag_start(position),
            Gesture::DragOver { pointer_y } => self.drag_over(pointer_y, surface),
            Gesture::DragEnd => self.drag_end(surface),
            Gesture::DragCancel => {
                if self.drag.take().is_none() {
                    return Outcome::Ignored;
                }
                self.render(surface);
                Outcome::Updated
            }
            Gesture::SetFilter(mode) => {
                self.filter = mode;
                self.apply_visibility(surface);
                Outcome::Updated
            }
            Gesture::TogglePanel => {
                self.panel_visible = !self.panel_visible;
                surface.set_panel_visible(self.panel_visible);
                Outcome::Updated
            }
        }
    }

    fn submit<S: RenderSurface + ?Sized>(&mut self, text: &str, surface: &mut S) -> Outcome {
        self.abandon_drag();
        match self.store.add_task(text) {
            Ok(added) => {
                surface.show_error(None);
                self.render(surface);
                Outcome::Added(added)
            }
            Err(err) => {
                surface.show_error(Some(&err.to_string()));
                Outcome::Rejected(err)
            }
        }
    }

    fn drag_start(&mut self, position: usize) -> Outcome {
        let Some(task) = self.store.get(position) else {
            return index_violation(IndexError {
                position,
                len: self.store.len(),
            });
        };
        self.drag = Some(DragSession::new(task.id, position, self.store.len()));
        tracing::debug!(position, "drag started");
        Outcome::Updated
    }

    fn drag_over<S: RenderSurface + ?Sized>(&mut self, pointer_y: f32, surface: &mut S) -> Outcome {
        let Some(drag) = self.drag.as_mut() else {
            return Outcome::Ignored;
        };
        let rows = surface.row_bounds();
        if drag.hover(&rows, pointer_y) {
            surface.preview_order(drag.order());
            Outcome::Updated
        } else {
            Outcome::Ignored
        }
    }

    /// Commit the previewed position. Always persists, even for a drop in place.
    fn drag_end<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> Outcome {
        let Some(drag) = self.drag.take() else {
            return Outcome::Ignored;
        };
        let from = self.store.position_of(drag.id()).unwrap_or(drag.origin());
        let to = drag.target();
        tracing::debug!(from, to, "drag dropped");
        let result = self.store.move_task(from, to);
        self.after_mutation(result, surface)
    }

    fn after_mutation<S: RenderSurface + ?Sized>(
        &mut self,
        result: Result<(), IndexError>,
        surface: &mut S,
    ) -> Outcome {
        match result {
            Ok(()) => {
                self.render(surface);
                Outcome::Updated
            }
            Err(err) => index_violation(err),
        }
    }

    fn abandon_drag(&mut self) {
        if self.drag.take().is_some() {
            tracing::debug!("drag abandoned by another gesture");
        }
    }

    fn render<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        surface.render_rows(self.store.all_tasks());
        self.apply_visibility(surface);
        surface.set_counter(&remaining_label(self.store.count_active()));
    }

    fn apply_visibility<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        for (position, task) in self.store.all_tasks().iter().enumerate() {
            surface.set_row_visible(position, self.filter.admits(task));
        }
    }
}

/// Positions handed to the controller come from the rendered rows, so a bad one is a bug.
fn index_violation(err: IndexError) -> Outcome {
    debug_assert!(false, "gesture referenced a stale position: {err}");
    tracing::warn!(error = %err, "ignoring gesture with stale position");
    Outcome::Ignored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{TaskPersistence, TASKS_SLOT};
    use crate::storage::{MemoryStorage, SlotStorage};
    use pretty_assertions::assert_eq;

    /// Records what the controller told it and lays rows out one unit apart.
    #[derive(Debug, Default)]
    struct FakeSurface {
        rows: Vec<(String, bool)>,
        order: Vec<usize>,
        visible: Vec<bool>,
        counter: String,
        error: Option<String>,
        panel_visible: bool,
    }

    impl FakeSurface {
        fn drawn_texts(&self) -> Vec<&str> {
            self.order
                .iter()
                .map(|&position| self.rows[position].0.as_str())
                .collect()
        }
    }

    impl RenderSurface for FakeSurface {
        fn render_rows(&mut self, tasks: &[Task]) {
            self.rows = tasks
                .iter()
                .map(|task| (task.text.clone(), task.completed))
                .collect();
            self.order = (0..tasks.len()).collect();
            self.visible = vec![true; tasks.len()];
        }

        fn preview_order(&mut self, order: &[usize]) {
            self.order = order.to_vec();
        }

        fn set_row_visible(&mut self, position: usize, visible: bool) {
            self.visible[position] = visible;
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
            self.order
                .iter()
                .filter(|&&position| self.visible[position])
                .enumerate()
                .map(|(slot, &position)| RowBounds::new(position, slot as f32, 1.0))
                .collect()
        }
    }

    fn mounted() -> (ViewController, FakeSurface, MemoryStorage) {
        let storage = MemoryStorage::new();
        let store = TaskStore::hydrate(TaskPersistence::new(storage.clone()));
        let controller = ViewController::new(store);
        let mut surface = FakeSurface::default();
        controller.mount(&mut surface);
        (controller, surface, storage)
    }

    fn submit(controller: &mut ViewController, surface: &mut FakeSurface, text: &str) {
        let outcome = controller.dispatch(Gesture::Submit(text.into()), surface);
        assert!(matches!(outcome, Outcome::Added(_)), "{outcome:?}");
    }

    #[test]
    fn buy_milk_walkthrough() {
        let (mut controller, mut surface, storage) = mounted();
        assert_eq!(surface.counter, "0 tasks remaining");
        assert!(surface.panel_visible);

        submit(&mut controller, &mut surface, "Buy milk");
        assert_eq!(controller.store().count_active(), 1);
        assert_eq!(surface.counter, "1 tasks remaining");

        controller.dispatch(Gesture::Toggle(0), &mut surface);
        assert_eq!(controller.store().count_active(), 0);
        assert_eq!(surface.rows, vec![("Buy milk".to_string(), true)]);

        controller.dispatch(Gesture::SetFilter(FilterMode::Active), &mut surface);
        assert_eq!(surface.visible, vec![false]);

        controller.dispatch(Gesture::SetFilter(FilterMode::Completed), &mut surface);
        assert_eq!(surface.visible, vec![true]);

        controller.dispatch(Gesture::Delete(0), &mut surface);
        assert!(controller.store().all_tasks().is_empty());
        assert!(surface.rows.is_empty());
        assert_eq!(storage.get(TASKS_SLOT).as_deref(), Some("[]"));
    }

    #[test]
    fn dragging_third_row_to_top_persists_new_order() {
        let (mut controller, mut surface, storage) = mounted();
        for text in ["abc", "defg", "hij"] {
            submit(&mut controller, &mut surface, text);
        }

        controller.dispatch(Gesture::DragStart(2), &mut surface);
        assert!(controller.is_dragging());
        let outcome = controller.dispatch(Gesture::DragOver { pointer_y: 0.2 }, &mut surface);
        assert_eq!(outcome, Outcome::Updated);
        assert_eq!(surface.drawn_texts(), vec!["hij", "abc", "defg"]);
        // The store is untouched until the drop.
        assert_eq!(controller.store().all_tasks()[0].text, "abc");

        controller.dispatch(Gesture::DragEnd, &mut surface);
        assert!(!controller.is_dragging());
        assert_eq!(
            storage.get(TASKS_SLOT).as_deref(),
            Some(
                r#"[{"text":"hij","completed":false},{"text":"abc","completed":false},{"text":"defg","completed":false}]"#
            )
        );
        assert_eq!(surface.drawn_texts(), vec!["hij", "abc", "defg"]);
    }

    #[test]
    fn drop_in_place_still_persists() {
        let (mut controller, mut surface, storage) = mounted();
        submit(&mut controller, &mut surface, "only task");
        storage.clone().write(TASKS_SLOT, "stale").unwrap();

        controller.dispatch(Gesture::DragStart(0), &mut surface);
        controller.dispatch(Gesture::DragOver { pointer_y: 5.0 }, &mut surface);
        assert_eq!(controller.dispatch(Gesture::DragEnd, &mut surface), Outcome::Updated);

        assert_eq!(
            storage.get(TASKS_SLOT).as_deref(),
            Some(r#"[{"text":"only task","completed":false}]"#)
        );
    }

    #[test]
    fn drag_cancel_restores_store_order_without_writing() {
        let (mut controller, mut surface, storage) = mounted();
        for text in ["first", "second"] {
            submit(&mut controller, &mut surface, text);
        }
        let slot_before = storage.get(TASKS_SLOT);

        controller.dispatch(Gesture::DragStart(0), &mut surface);
        controller.dispatch(Gesture::DragOver { pointer_y: 9.0 }, &mut surface);
        assert_eq!(surface.drawn_texts(), vec!["second", "first"]);

        controller.dispatch(Gesture::DragCancel, &mut surface);
        assert_eq!(surface.drawn_texts(), vec!["first", "second"]);
        assert_eq!(storage.get(TASKS_SLOT), slot_before);
    }

    #[test]
    fn drag_gestures_without_a_drag_are_ignored() {
        let (mut controller, mut surface, _storage) = mounted();
        submit(&mut controller, &mut surface, "lonely");
        assert_eq!(
            controller.dispatch(Gesture::DragOver { pointer_y: 0.0 }, &mut surface),
            Outcome::Ignored
        );
        assert_eq!(controller.dispatch(Gesture::DragEnd, &mut surface), Outcome::Ignored);
        assert_eq!(controller.dispatch(Gesture::DragCancel, &mut surface), Outcome::Ignored);
    }

    #[test]
    fn drag_skips_rows_hidden_by_filter() {
        let (mut controller, mut surface, _storage) = mounted();
        for text in ["aaa", "bbb", "ccc"] {
            submit(&mut controller, &mut surface, text);
        }
        controller.dispatch(Gesture::Toggle(1), &mut surface);
        controller.dispatch(Gesture::SetFilter(FilterMode::Active), &mut surface);

        // Drawn rows: aaa at 0, ccc at 1. Hovering the top of ccc lands before it.
        controller.dispatch(Gesture::DragStart(0), &mut surface);
        controller.dispatch(Gesture::DragOver { pointer_y: 1.1 }, &mut surface);
        controller.dispatch(Gesture::DragEnd, &mut surface);

        let texts: Vec<&str> = controller
            .store()
            .all_tasks()
            .iter()
            .map(|task| task.text.as_str())
            .collect();
        assert_eq!(texts, vec!["bbb", "aaa", "ccc"]);
        assert_eq!(surface.visible, vec![false, true, true]);
    }

    #[test]
    fn rejected_submit_reports_error_and_keeps_state() {
        let (mut controller, mut surface, storage) = mounted();
        let outcome = controller.dispatch(Gesture::Submit("  hi ".into()), &mut surface);

        assert_eq!(outcome, Outcome::Rejected(ValidationError::TooShort));
        assert_eq!(
            surface.error.as_deref(),
            Some("Task must be at least 3 characters!")
        );
        assert!(controller.store().is_empty());
        assert_eq!(storage.get(TASKS_SLOT), None);

        submit(&mut controller, &mut surface, "hi there");
        assert!(surface.error.is_none());
    }

    #[test]
    fn reorder_gesture_moves_immediately() {
        let (mut controller, mut surface, _storage) = mounted();
        for text in ["AAA", "BBB", "CCC"] {
            submit(&mut controller, &mut surface, text);
        }
        controller.dispatch(Gesture::Reorder { from: 0, to: 2 }, &mut surface);
        assert_eq!(surface.drawn_texts(), vec!["BBB", "CCC", "AAA"]);
    }

    #[test]
    fn filter_survives_later_mutations() {
        let (mut controller, mut surface, _storage) = mounted();
        controller.dispatch(Gesture::SetFilter(FilterMode::Completed), &mut surface);
        submit(&mut controller, &mut surface, "new task");
        assert_eq!(surface.visible, vec![false]);
        assert_eq!(controller.filter(), FilterMode::Completed);
    }

    #[test]
    fn toggle_panel_flips_visibility_only() {
        let (mut controller, mut surface, storage) = mounted();
        controller.dispatch(Gesture::TogglePanel, &mut surface);
        assert!(!surface.panel_visible);
        assert!(!controller.panel_visible());
        controller.dispatch(Gesture::TogglePanel, &mut surface);
        assert!(surface.panel_visible);
        assert_eq!(storage.get(TASKS_SLOT), None);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "stale position")]
    fn stale_position_panics_in_debug_builds() {
        let (mut controller, mut surface, _storage) = mounted();
        submit(&mut controller, &mut surface, "only row");
        controller.dispatch(Gesture::Toggle(5), &mut surface);
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn stale_position_is_ignored_in_release_builds() {
        let (mut controller, mut surface, storage) = mounted();
        submit(&mut controller, &mut surface, "only row");
        let slot_before = storage.get(TASKS_SLOT);

        assert_eq!(
            controller.dispatch(Gesture::Toggle(5), &mut surface),
            Outcome::Ignored
        );
        assert_eq!(controller.dispatch(Gesture::DragStart(3), &mut surface), Outcome::Ignored);
        assert!(!controller.is_dragging());
        assert_eq!(surface.rows, vec![("only row".to_string(), false)]);
        assert_eq!(storage.get(TASKS_SLOT), slot_before);
    }
}
