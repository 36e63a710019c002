use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/tracker.json";

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub data_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl Config {
    /// `PORT`, `APP_BIND_ADDR` and `APP_DATA_PATH` override the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup("PORT") {
            match value.trim().parse::<u16>() {
                Ok(port) => config.port = port,
                Err(err) => warn!("ignoring invalid PORT {value:?}: {err}"),
            }
        }
        if let Some(value) = lookup("APP_BIND_ADDR") {
            match value.trim().parse::<IpAddr>() {
                Ok(addr) => config.bind_addr = addr,
                Err(err) => warn!("ignoring invalid APP_BIND_ADDR {value:?}: {err}"),
            }
        }
        if let Some(value) = lookup("APP_DATA_PATH").filter(|value| !value.trim().is_empty()) {
            config.data_path = PathBuf::from(value);
        }

        config
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn env_overrides_apply() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9090"),
            ("APP_BIND_ADDR", "127.0.0.1"),
            ("APP_DATA_PATH", "/tmp/calories.json"),
        ]));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9090");
        assert_eq!(config.data_path, PathBuf::from("/tmp/calories.json"));
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "eighty"),
            ("APP_BIND_ADDR", "localhost:1"),
            ("APP_DATA_PATH", "  "),
        ]));
        assert_eq!(config, Config::default());
    }
}
