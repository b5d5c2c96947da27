use std::fmt;
use std::io::Write;

use anyhow::{anyhow, bail, Context, Result};

use crate::cli::{AddArgs, CliCommand, ListArgs, MoveArgs, PositionArgs};
use crate::config::AppConfig;
use crate::core::{AppContext, TaskStore};
use crate::model::{remaining_label, FilterMode, Task};

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    let open_store = || -> Result<TaskStore> {
        Ok(AppContext::open(config.clone())?.into_store())
    };
    match command {
        CliCommand::Tui => bail!("launch interactive surfaces directly"),
        CliCommand::Add(args) => handle_add(&mut open_store()?, &args, &mut writer),
        CliCommand::List(args) => handle_list(&open_store()?, &args, &mut writer),
        CliCommand::Toggle(args) => handle_toggle(&mut open_store()?, &args, &mut writer),
        CliCommand::Delete(args) => handle_delete(&mut open_store()?, &args, &mut writer),
        CliCommand::Move(args) => handle_move(&mut open_store()?, &args, &mut writer),
    }
}

fn handle_add<W: Write>(store: &mut TaskStore, args: &AddArgs, mut writer: W) -> Result<()> {
    let added = store.add_task(&args.joined_text())?;
    writeln!(
        writer,
        "{}",
        Report::Added {
            number: added.position + 1,
            text: &added.text
        }
    )?;
    writeln!(writer, "{}", remaining_label(store.count_active()))?;
    Ok(())
}

fn handle_list<W: Write>(store: &TaskStore, args: &ListArgs, mut writer: W) -> Result<()> {
    let mut shown = 0usize;
    for (position, task) in store.all_tasks().iter().enumerate() {
        if !args.filter.admits(task) {
            continue;
        }
        shown += 1;
        writeln!(writer, "{}", ListLine { position, task })?;
    }
    if shown == 0 {
        writeln!(writer, "{}", EmptyLine(args.filter))?;
    }
    writeln!(writer, "{}", remaining_label(store.count_active()))?;
    Ok(())
}

fn handle_toggle<W: Write>(store: &mut TaskStore, args: &PositionArgs, mut writer: W) -> Result<()> {
    let index = to_index(args.position)?;
    store
        .toggle_task(index)
        .with_context(|| format!("No task at position {}", args.position))?;
    let task = store
        .get(index)
        .ok_or_else(|| anyhow!("No task at position {}", args.position))?;
    let report = if task.completed {
        Report::Completed {
            number: args.position,
            text: &task.text,
        }
    } else {
        Report::Reopened {
            number: args.position,
            text: &task.text,
        }
    };
    writeln!(writer, "{}", report)?;
    writeln!(writer, "{}", remaining_label(store.count_active()))?;
    Ok(())
}

fn handle_delete<W: Write>(store: &mut TaskStore, args: &PositionArgs, mut writer: W) -> Result<()> {
    let index = to_index(args.position)?;
    let text = store
        .get(index)
        .map(|task| task.text.clone())
        .ok_or_else(|| anyhow!("No task at position {}", args.position))?;
    store
        .remove_task(index)
        .with_context(|| format!("No task at position {}", args.position))?;
    writeln!(
        writer,
        "{}",
        Report::Deleted {
            number: args.position,
            text: &text
        }
    )?;
    writeln!(writer, "{}", remaining_label(store.count_active()))?;
    Ok(())
}

fn handle_move<W: Write>(store: &mut TaskStore, args: &MoveArgs, mut writer: W) -> Result<()> {
    let from = to_index(args.from)?;
    let to = to_index(args.to)?;
    store
        .move_task(from, to)
        .with_context(|| format!("Cannot move task {} to {}", args.from, args.to))?;
    writeln!(
        writer,
        "{}",
        Report::Moved {
            from: args.from,
            to: args.to
        }
    )?;
    writeln!(writer, "{}", remaining_label(store.count_active()))?;
    Ok(())
}

/// CLI positions are 1-based.
fn to_index(position: usize) -> Result<usize> {
    if position == 0 {
        bail!("Positions start at 1");
    }
    Ok(position - 1)
}

enum Report<'a> {
    Added { number: usize, text: &'a str },
    Completed { number: usize, text: &'a str },
    Reopened { number: usize, text: &'a str },
    Deleted { number: usize, text: &'a str },
    Moved { from: usize, to: usize },
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Added { number, text } => write!(f, "Added #{} {}", number, text),
            Report::Completed { number, text } => write!(f, "Completed #{} {}", number, text),
            Report::Reopened { number, text } => write!(f, "Reopened #{} {}", number, text),
            Report::Deleted { number, text } => write!(f, "Deleted #{} {}", number, text),
            Report::Moved { from, to } => write!(f, "Moved task #{} to #{}", from, to),
        }
    }
}

struct ListLine<'a> {
    position: usize,
    task: &'a Task,
}

impl fmt::Display for ListLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.task.completed { 'x' } else { ' ' };
        write!(f, "{:>3}. [{}] {}", self.position + 1, mark, self.task.text)
    }
}

struct EmptyLine(FilterMode);

impl fmt::Display for EmptyLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            FilterMode::All => write!(f, "No tasks yet"),
            mode => write!(f, "No {} tasks", mode),
        }
    }
}
