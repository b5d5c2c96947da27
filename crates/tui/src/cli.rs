use std::path::PathBuf;

use clap::{value_parser, Args, Parser, Subcommand};

use crate::model::FilterMode;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "taskpad",
    version,
    about = "A small local task list you can reorder by dragging.",
    after_help = "Examples:\n  taskpad             Launch the TUI (same as `taskpad tui`)\n  taskpad add Buy milk\n  taskpad list --filter active\n  taskpad move 3 1"
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override the tracing filter (e.g. "info", "debug")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the terminal UI (default command)
    Tui,
    /// Append a task to the end of the list
    Add(AddArgs),
    /// Print the list with its remaining-task counter
    List(ListArgs),
    /// Flip a task between active and completed
    Toggle(PositionArgs),
    /// Delete a task
    Delete(PositionArgs),
    /// Move a task to another position
    Move(MoveArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Task text (at least 3 characters once trimmed)
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Only show tasks matching this filter
    #[arg(long, value_enum, default_value_t = FilterMode::All)]
    pub filter: FilterMode,
}

#[derive(Args, Debug, Clone)]
pub struct PositionArgs {
    /// 1-based position as printed by `taskpad list`
    #[arg(value_name = "POSITION", value_parser = value_parser!(usize))]
    pub position: usize,
}

#[derive(Args, Debug, Clone)]
pub struct MoveArgs {
    /// 1-based position of the task to move
    #[arg(value_name = "FROM", value_parser = value_parser!(usize))]
    pub from: usize,

    /// 1-based position the task should end up at
    #[arg(value_name = "TO", value_parser = value_parser!(usize))]
    pub to: usize,
}

impl AddArgs {
    pub fn joined_text(&self) -> String {
        self.text.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["taskpad", "list", "--filter", "active", "--data-dir", "/tmp/x"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Some(CliCommand::List(args)) => assert_eq!(args.filter, FilterMode::Active),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_joins_words() {
        let cli = Cli::parse_from(["taskpad", "add", "Buy", "oat", "milk"]);
        match cli.command {
            Some(CliCommand::Add(args)) => assert_eq!(args.joined_text(), "Buy oat milk"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::parse_from(["taskpad"]);
        assert!(cli.command.is_none());
    }
}
