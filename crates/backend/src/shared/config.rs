use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with the built frontend
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: "dist".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub realm: String,
    pub user: String,
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            realm: "GSS Reports".to_string(),
            user: String::new(),
            password: String::new(),
        }
    }
}

impl AuthConfig {
    /// `(user, password)` when both are set
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.user.is_empty() || self.password.is_empty() {
            None
        } else {
            Some((&self.user, &self.password))
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000
static_dir = "dist"

[database]
path = "target/db/reports.db"

[auth]
realm = "GSS Reports"
user = ""
password = ""
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// `AUTH_USER` / `AUTH_PASS` from the environment override `[auth]`.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return Ok(toml::from_str(&contents)?);
            }
            tracing::warn!("config.toml not found at: {}", config_path.display());
        }
    }

    tracing::info!("Using default embedded configuration");
    Ok(toml::from_str(DEFAULT_CONFIG)?)
}

fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(user) = lookup("AUTH_USER") {
        config.auth.user = user;
    }
    if let Some(password) = lookup("AUTH_PASS") {
        config.auth.password = password;
    }
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> PathBuf {
    let db_path = Path::new(&config.database.path);

    if db_path.is_absolute() {
        return db_path.to_path_buf();
    }

    match std::env::current_exe() {
        Ok(exe_path) => match exe_path.parent() {
            Some(exe_dir) => exe_dir.join(db_path),
            None => db_path.to_path_buf(),
        },
        Err(_) => db_path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/reports.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.realm, "GSS Reports");
        assert!(config.auth.credentials().is_none());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[database]\npath = \"/tmp/r.db\"\n").unwrap();
        assert_eq!(config.server.static_dir, "dist");
        assert_eq!(config.auth.realm, "GSS Reports");
        assert_eq!(get_database_path(&config), PathBuf::from("/tmp/r.db"));
    }

    #[test]
    fn test_env_overrides_credentials() {
        let mut config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        let env: HashMap<&str, &str> = [("AUTH_USER", "ops"), ("AUTH_PASS", "s3cret")].into();

        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.auth.credentials(), Some(("ops", "s3cret")));
    }
}
