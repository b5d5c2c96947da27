use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use once_cell::sync::Lazy;

static DEFAULT_DB_NAME: &str = "taskpad.sqlite3";
static DEFAULT_LOG_NAME: &str = "taskpad.log";
static ENV_DATA_DIR: &str = "TASKPAD_DATA_DIR";
static FALLBACK_DIR_NAME: &str = ".taskpad";

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("dev", "taskpad", "taskpad"));

/// Where the data directory was taken from, in the order sources are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataDirSource {
    Explicit,
    Environment,
    Development,
    Platform,
    Home,
    WorkingDir,
}

impl DataDirSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataDirSource::Explicit => "explicit",
            DataDirSource::Environment => ENV_DATA_DIR,
            DataDirSource::Development => "development",
            DataDirSource::Platform => "platform",
            DataDirSource::Home => "home",
            DataDirSource::WorkingDir => "working-dir",
        }
    }
}

impl fmt::Display for DataDirSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locations of the task slot database and the TUI log file.
#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
    source: DataDirSource,
    db_path: PathBuf,
    log_path: PathBuf,
}

impl AppConfig {
    /// Resolve the data directory from `--data-dir`, then `TASKPAD_DATA_DIR`, then the
    /// build/platform defaults, and make sure it exists.
    pub fn discover(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let (data_dir, source) =
            resolve_data_dir(data_dir_override, env::var(ENV_DATA_DIR).ok())?;
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).with_context(|| {
                format!("Failed to create data directory at {}", data_dir.display())
            })?;
        }
        tracing::debug!(dir = %data_dir.display(), %source, "resolved data directory");
        Ok(Self::with_source(data_dir, source))
    }

    /// Use `data_dir` as given, without touching the filesystem.
    pub fn from_data_dir(data_dir: PathBuf) -> Result<Self> {
        Ok(Self::with_source(data_dir, DataDirSource::Explicit))
    }

    fn with_source(data_dir: PathBuf, source: DataDirSource) -> Self {
        Self {
            db_path: data_dir.join(DEFAULT_DB_NAME),
            log_path: data_dir.join(DEFAULT_LOG_NAME),
            data_dir,
            source,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn source(&self) -> DataDirSource {
        self.source
    }

    /// SQLite file holding the `tasks` slot.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Log file for the terminal UI, which cannot log to the screen it draws on.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

fn resolve_data_dir(
    data_dir_override: Option<PathBuf>,
    env_dir: Option<String>,
) -> Result<(PathBuf, DataDirSource)> {
    if let Some(dir) = data_dir_override {
        return Ok((dir, DataDirSource::Explicit));
    }

    if let Some(dir) = env_dir.filter(|dir| !dir.trim().is_empty()) {
        return Ok((PathBuf::from(dir), DataDirSource::Environment));
    }

    if cfg!(debug_assertions) {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let dev_dir = manifest_dir.join("..").join("tmp").join("dev-taskpad");
        return Ok((dev_dir, DataDirSource::Development));
    }

    if let Some(project) = &*PROJECT_DIRS {
        return Ok((project.data_dir().to_path_buf(), DataDirSource::Platform));
    }

    if let Some(base) = BaseDirs::new() {
        return Ok((base.home_dir().join(FALLBACK_DIR_NAME), DataDirSource::Home));
    }

    Ok((
        env::current_dir()?.join(FALLBACK_DIR_NAME),
        DataDirSource::WorkingDir,
    ))
}
