pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod model;
pub mod persistence;
pub mod reorder;
pub mod storage;
pub mod store;

pub use config::AppConfig;
pub use context::AppContext;
pub use controller::{Gesture, Outcome, RenderSurface, ViewController};
pub use error::{IndexError, ValidationError};
pub use model::*;
pub use persistence::TaskPersistence;
pub use reorder::{DragSession, RowBounds};
pub use store::TaskStore;
