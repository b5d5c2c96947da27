use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(200);
pub(crate) const STATUS_TTL: Duration = Duration::from_secs(5);

pub(crate) const CHECKBOX_WIDTH: u16 = 3;
pub(crate) const HIGHLIGHT_SYMBOL: &str = "▶ ";
pub(crate) const DELETE_GLYPH: &str = "✕";

pub(crate) const STATUS_ENTER_ADD: &str = "Type a task (3+ characters) • Enter to add • Esc to cancel";
pub(crate) const STATUS_DRAGGING: &str = "Dragging — release to drop • Esc to cancel";
pub(crate) const STATUS_HELP: &str = "Keyboard reference — Enter/Esc to close";
pub(crate) const STATUS_PANEL_HIDDEN: &str = "List hidden — press v to show it again";

pub(crate) const KEY_HINTS: &str =
    "a add • space toggle • x delete • J/K move • f filter • v hide • h help • q quit";
