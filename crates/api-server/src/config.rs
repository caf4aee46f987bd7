//! Server configuration from environment variables

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use tt_core::config::{StorageConfig, StorageKind};
use tt_core::history::DEFAULT_MAX_ENTRIES;
use tt_core::time::{TimeConfig, DEFAULT_TIME_API_URL};
use tt_core::Error;

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub storage: StorageConfig,
    /// Testing mode keeps data in the temp directory and exposes error details
    pub testing: bool,
    pub time: TimeConfig,
    pub history_max: usize,
}

fn flag(raw: Option<String>, default: bool) -> bool {
    match raw {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}

fn parse<T: std::str::FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T, Error> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("Invalid value for {}: {}", name, raw))),
        None => Ok(default),
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let testing = flag(lookup("TESTING"), false) || flag(lookup("CI"), false);

        let host: IpAddr = parse("TT_HOST", lookup("TT_HOST"), IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let port: u16 = parse("TT_PORT", lookup("TT_PORT"), DEFAULT_PORT)?;

        let kind = match lookup("TT_STORAGE") {
            Some(raw) => raw.parse::<StorageKind>()?,
            None => StorageKind::default(),
        };
        let data_dir = if testing {
            std::env::temp_dir()
        } else {
            lookup("TT_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."))
        };

        let timeout_secs: u64 = parse("TT_TIME_TIMEOUT_SECS", lookup("TT_TIME_TIMEOUT_SECS"), 3)?;
        let time = TimeConfig {
            base_url: lookup("TT_TIME_API_URL").unwrap_or_else(|| DEFAULT_TIME_API_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        };

        Ok(Self {
            addr: SocketAddr::new(host, port),
            storage: StorageConfig::in_dir(kind, &data_dir),
            testing,
            time,
            history_max: parse("TT_HISTORY_MAX", lookup("TT_HISTORY_MAX"), DEFAULT_MAX_ENTRIES)?,
        })
    }
}
