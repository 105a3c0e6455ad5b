// Runtime configuration, read from the environment with fallbacks.

use std::path::{Path, PathBuf};

pub const FILE_VAR: &str = "BOOKSHELF_FILE";
pub const LOG_VAR: &str = "BOOKSHELF_LOG";
const DEFAULT_FILE: &str = "books.json";
const DEFAULT_LOG: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Location of the JSON backing file.
    pub books_path: PathBuf,
    /// `tracing` filter directive for diagnostics on stderr.
    pub log_filter: String,
}

impl Config {
    /// Build the configuration from `BOOKSHELF_FILE` and `BOOKSHELF_LOG`,
    /// or fall back to `books.json` in the working directory and `warn`.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::var(FILE_VAR).ok(), std::env::var(LOG_VAR).ok())
    }

    fn from_vars(file: Option<String>, log: Option<String>) -> Self {
        let books_path = file
            .filter(|f| !f.trim().is_empty())
            .map(|f| expand_home(&f))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE));
        let log_filter = log
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG.into());
        Config {
            books_path,
            log_filter,
        }
    }
}

/// Expand a leading `~/` to the user's home directory.
fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(rest)
        }
        None => Path::new(path).to_path_buf(),
    }
}
