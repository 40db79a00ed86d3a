//! Application configuration. Output format, schema strictness, paths.

use serde::Deserialize;

pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Pretty-print encoded records. Read from CHAT_RECORDS_PRETTY.
    #[serde(default)]
    pub pretty: Option<bool>,

    /// Treat keys outside the wire schema as errors. Read from CHAT_RECORDS_STRICT.
    #[serde(default)]
    pub strict: Option<bool>,

    /// Directory the front-end lists documents from. Read from CHAT_RECORDS_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,
}

/// `CHAT_RECORDS_*` variables, with `true`/`false` parsed as booleans.
fn env_source() -> config::Environment {
    config::Environment::with_prefix("CHAT_RECORDS").try_parsing(true)
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(env_source());
        if let Ok(path) = std::env::var("CHAT_RECORDS_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Defaults to true.
    pub fn pretty_or_default(&self) -> bool {
        self.pretty.unwrap_or(true)
    }

    /// Defaults to false.
    pub fn strict_or_default(&self) -> bool {
        self.strict.unwrap_or(false)
    }

    pub fn data_dir_or_default(&self) -> String {
        self.data_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
    }
}
