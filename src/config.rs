use std::{env, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/state.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Snapshot of the key-value store (`APP_DATA_PATH`).
    pub data_path: PathBuf,
    /// Replacement for the bundled dataset (`TEAM_DATA_PATH`).
    pub team_data_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_path = lookup("APP_DATA_PATH")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let team_data_path = lookup("TEAM_DATA_PATH")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Self {
            port,
            data_path,
            team_data_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.team_data_path, None);
    }

    #[test]
    fn env_values_override_defaults() {
        let vars: HashMap<&str, &str> = [
            ("PORT", "9123"),
            ("APP_DATA_PATH", "/tmp/state.json"),
            ("TEAM_DATA_PATH", "/tmp/team.json"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.port, 9123);
        assert_eq!(config.data_path, PathBuf::from("/tmp/state.json"));
        assert_eq!(config.team_data_path, Some(PathBuf::from("/tmp/team.json")));
    }

    #[test]
    fn bad_port_falls_back() {
        let config = Config::from_lookup(|key| (key == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
