use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{config_error, Error};

pub const DATA_DIR_VAR: &str = "WAYMARK_DATA_DIR";
pub const BIND_ADDR_VAR: &str = "WAYMARK_BIND_ADDR";

const DEFAULT_DATA_DIR: &str = "data/routes";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Reads the environment, after loading a `.env` file if one exists.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_vars(env::var(DATA_DIR_VAR).ok(), env::var(BIND_ADDR_VAR).ok())
    }

    fn from_vars(data_dir: Option<String>, bind_addr: Option<String>) -> Result<Self, Error> {
        let data_dir = data_dir.unwrap_or_else(|| DEFAULT_DATA_DIR.into());
        if data_dir.trim().is_empty() {
            return Err(config_error(format!("{} must not be empty", DATA_DIR_VAR)));
        }

        let bind_addr = bind_addr.unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_addr.parse().map_err(|_| {
            config_error(format!("{} is not a socket address: {}", BIND_ADDR_VAR, bind_addr))
        })?;

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_vars(None, None).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("data/routes"));
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
    }

    #[test]
    fn overrides_and_bad_values() {
        let config =
            Config::from_vars(Some("/var/lib/waymark".into()), Some("0.0.0.0:8080".into())).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/waymark"));
        assert_eq!(config.bind_addr.port(), 8080);

        assert!(Config::from_vars(None, Some("not an address".into())).is_err());
        assert!(Config::from_vars(Some(" ".into()), None).is_err());
    }
}
