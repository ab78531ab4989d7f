use std::env;
use std::net::SocketAddr;

use crate::error::AppError;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DATABASE_URL: &str = "sqlite://students.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageConfig {
    Memory,
    Sqlite { url: String, max_connections: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR is invalid: {}", e)))?;

        let backend = lookup("STORAGE_BACKEND").unwrap_or_else(|| "sqlite".to_string());
        let storage = match backend.to_ascii_lowercase().as_str() {
            "memory" => StorageConfig::Memory,
            "sqlite" => {
                let url = lookup("DATABASE_URL")
                    .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
                let max_connections = match lookup("DB_MAX_CONNECTIONS") {
                    Some(raw) => raw
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| {
                            AppError::Config(format!(
                                "DB_MAX_CONNECTIONS must be a positive integer, got {:?}",
                                raw
                            ))
                        })?,
                    None => DEFAULT_MAX_CONNECTIONS,
                };
                StorageConfig::Sqlite {
                    url,
                    max_connections,
                }
            }
            other => {
                return Err(AppError::Config(format!(
                    "STORAGE_BACKEND must be \"sqlite\" or \"memory\", got {:?}",
                    other
                )));
            }
        };

        Ok(Self { bind_addr, storage })
    }
}
