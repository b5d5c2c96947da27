pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod tui;

pub use taskpad_core as core;
pub use taskpad_core::model;
pub use taskpad_core::AppConfig;
