use std::{env, net::SocketAddr, path::PathBuf};

use crate::{error::AppError, services::storage::TRIPS_STORAGE_KEY};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let listen_addr: SocketAddr = env::var("APP_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let data_dir = env::var("TRIPR_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let storage_key =
            env::var("TRIPR_STORAGE_KEY").unwrap_or_else(|_| TRIPS_STORAGE_KEY.to_string());
        if storage_key.trim().is_empty() {
            return Err(AppError::Config("TRIPR_STORAGE_KEY must not be empty".into()));
        }

        Ok(Self {
            listen_addr,
            data_dir,
            storage_key,
        })
    }
}
