// File: src/paths.rs
use directories::ProjectDirs;
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOG_FILE_NAME: &str = "showbill.log";

pub struct AppPaths;

impl AppPaths {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "comedyuo", "showbill")
    }

    pub fn config_file() -> Option<PathBuf> {
        Self::project_dirs().map(|d| d.config_dir().join(CONFIG_FILE_NAME))
    }

    /// The TUI owns the terminal, so logs go here instead of stderr.
    pub fn log_file() -> Option<PathBuf> {
        Self::project_dirs().map(|d| d.data_local_dir().join(LOG_FILE_NAME))
    }
}
