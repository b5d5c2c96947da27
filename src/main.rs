use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = taskpad::cli::Cli::parse();
    let config = taskpad::config::from_cli(&cli)?;

    match cli.command.clone() {
        Some(taskpad::cli::CliCommand::Tui) | None => {
            taskpad::logging::init_file(config.log_path(), cli.log_filter.clone())?;
            taskpad::tui::run(config)?;
        }
        Some(command) => {
            taskpad::logging::init_stderr(cli.log_filter.clone())?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            taskpad::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}
