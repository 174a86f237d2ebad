use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Config, read from the TOML file named on the command line.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// <address>:<port> to serve the /api endpoints
    pub listen_address: String,

    /// <address>:<port> to serve metrics on
    pub metrics_address: String,

    /// By default, output JSON logs. Only if this flag is set to true, output colourful human-friendly logs
    #[serde(default)]
    pub human_logs: bool,

    /// password to connect to database.
    pub db_dsn: String,

    /// maximum number of connections maintained by PostgresStore
    pub db_pool_size: u32,

    /// maximum seconds waiting for a database connection
    pub db_connection_timeout: u64,

    /// Where `browse` finds the API. Must end in a slash.
    #[serde(default = "api_base_url")]
    pub api_base_url: Url,

    /// Where `seed` downloads users and posts from. Must end in a slash.
    #[serde(default = "seed_source_url")]
    pub seed_source_url: Url,

    /// How long the posts view waits after the last filter edit before applying it.
    #[serde(default = "debounce_ms")]
    pub debounce_ms: u64,
}

impl Config {
    pub fn from_file(filepath: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(filepath)
            .with_context(|| format!("couldn't read config file {}", filepath))?;
        Self::from_toml(&contents).with_context(|| format!("couldn't parse config file {}", filepath))
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn api_base_url() -> Url {
    Url::parse("http://127.0.0.1:8080/").expect("valid default URL")
}

fn seed_source_url() -> Url {
    Url::parse("https://jsonplaceholder.typicode.com/").expect("valid default URL")
}

fn debounce_ms() -> u64 {
    400
}
