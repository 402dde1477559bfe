use std::path::PathBuf;

use clap::Parser;

use dashboard_core::{InMemoryTodoRepo, StoreError};

use crate::store::SqliteTodoRepo;
use crate::DynTodoRepository;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "dashboard — to-do list admin service", long_about = None)]
pub struct Config {
    /// Interface to bind
    #[arg(long, env = "DASHBOARD_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Path to the SQLite database file
    #[arg(long, env = "DASHBOARD_DB", default_value = "dashboard.sqlite")]
    pub db_path: PathBuf,

    /// Keep items in memory instead of SQLite
    #[arg(long, default_value_t = false)]
    pub memory: bool,

    /// Insert demo items when the list is empty
    #[arg(long, default_value_t = false)]
    pub seed: bool,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn open_repository(&self) -> Result<DynTodoRepository, StoreError> {
        if self.memory {
            return Ok(Box::new(InMemoryTodoRepo::default()));
        }
        Ok(Box::new(SqliteTodoRepo::open(&self.db_path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::TodoRepository;
    use std::ffi::OsStr;

    #[test]
    fn defaults_bind_localhost_3000() {
        let config = Config::try_parse_from(["dashboard-server"]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert!(!config.memory);
        assert!(!config.seed);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "dashboard-server",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--memory",
            "--seed",
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert!(config.memory);
        assert!(config.seed);
    }

    #[test]
    fn memory_flag_skips_sqlite() {
        let config =
            Config::try_parse_from(["dashboard-server", "--memory", "--db-path", "/nonexistent/x/y.db"])
                .unwrap();
        let repo = config.open_repository().unwrap();
        assert!(repo.list_ordered().unwrap().is_empty());
    }

    #[test]
    fn sqlite_repository_is_created_at_db_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.sqlite");
        let config = Config::try_parse_from([
            OsStr::new("dashboard-server"),
            OsStr::new("--db-path"),
            path.as_os_str(),
        ])
        .unwrap();
        config.open_repository().unwrap();
        assert!(path.exists());
    }
}
