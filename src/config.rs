use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory that receives uploaded files.
    pub upload_dir: String,
    /// URL prefix under which `upload_dir` is served, e.g. `/uploads`.
    pub public_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub title: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder().build()?.try_deserialize()
    }

    /// Layered sources: `config/default`, then `config/{RUN_ENV}`, then `APP__*` env vars.
    pub fn builder() -> ConfigBuilder<DefaultState> {
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = AppConfig::load();
        assert!(config.is_ok(), "Default config should load: {config:?}");

        let config = config.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.public_path, "/uploads");
        assert!(config.database.url.starts_with("sqlite:"));
    }

    #[test]
    fn test_override_wins_over_file() {
        let config: AppConfig = AppConfig::builder()
            .set_override("server.port", 8080)
            .unwrap()
            .set_override("storage.upload_dir", "/tmp/elsewhere")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.upload_dir, "/tmp/elsewhere");
        assert_eq!(config.site.title, "QuXAT Store");
    }
}
