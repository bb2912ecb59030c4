// src/config.rs

use std::env;
use std::path::PathBuf;
use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory backing the file store (one JSON file per key).
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub rust_log: String,
    /// Seed the bundled posts on first initialisation.
    pub seed_data: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let log_dir = env::var("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("logs"));

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let seed_data = env::var("SEED_DATA")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        Self {
            data_dir,
            log_dir,
            rust_log,
            seed_data,
        }
    }
}
