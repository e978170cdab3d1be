use anyhow::{bail, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub csv_path: PathBuf,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let csv_path = std::env::var("RECORDS_CSV_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/diabetes.csv"));
        let bind_addr = std::env::var("RECORDS_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());

        Self::new(csv_path, bind_addr)
    }

    pub fn new(csv_path: PathBuf, bind_addr: String) -> Result<Self> {
        // fail fast on a bad listen address instead of at bind time
        if bind_addr.parse::<SocketAddr>().is_err() {
            bail!("RECORDS_BIND_ADDR must be a socket address like 0.0.0.0:5000, got {bind_addr:?}");
        }
        if csv_path.as_os_str().is_empty() {
            bail!("RECORDS_CSV_PATH must not be empty");
        }

        Ok(Self { csv_path, bind_addr })
    }
}
