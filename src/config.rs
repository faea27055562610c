use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};
use tracing::warn;

pub const DEFAULT_DATA_PATH: &str = "data/introspection_logs.json";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Reads `APP_DATA_PATH`, `HOST` and `PORT`. Unparsable values fall back to
    /// the defaults with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_path = lookup("APP_DATA_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let host = match lookup("HOST") {
            Some(value) => value.parse::<IpAddr>().unwrap_or_else(|err| {
                warn!("ignoring HOST={value:?}: {err}");
                IpAddr::V4(Ipv4Addr::UNSPECIFIED)
            }),
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().unwrap_or_else(|err| {
                warn!("ignoring PORT={value:?}: {err}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            data_path,
            bind_addr: SocketAddr::new(host, port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("APP_DATA_PATH", "/tmp/journal.json"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
        ]);
        assert_eq!(config.data_path, PathBuf::from("/tmp/journal.json"));
        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
    }

    #[test]
    fn bad_values_fall_back() {
        let config = config_from(&[("APP_DATA_PATH", "  "), ("HOST", "nowhere"), ("PORT", "http")]);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
        assert!(config.bind_addr.ip().is_unspecified());
    }
}
