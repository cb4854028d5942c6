use serde::Deserialize;

/// Process configuration.
///
/// Sources, lowest precedence first: built-in defaults, an optional config
/// file, then `PORTFOLIO_*` environment variables (e.g. `PORTFOLIO_PORT`).
/// The plain `URL` variable is honoured as the default connection string.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// MongoDB connection string.
    pub mongodb_uri: String,
    /// Database holding the `Works`, `Tags` and `Archive` collections.
    pub database: String,
    pub host: String,
    pub port: u16,
    /// Directory served for any path no route matches.
    pub static_dir: String,
}

impl AppConfig {
    /// Load configuration from the given file path (without extension).
    /// A missing file is not an error.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let default_uri =
            std::env::var("URL").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let settings = config::Config::builder()
            .set_default("mongodb_uri", default_uri)?
            .set_default("database", "Aachal_Portfolio")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3001)?
            .set_default("static_dir", "public")?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("PORTFOLIO").try_parsing(true))
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
