use std::sync::OnceLock;

use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_public_dir")]
    pub public_dir: String,
    /// Load the bundled fixture notes on startup
    #[serde(default = "default_true")]
    pub seed: bool,
    #[serde(default)]
    pub log_json: bool,

    // build
    pub app_version: Option<String>,
    #[serde(default = "default_local")]
    pub source: String,
    #[serde(default = "default_local")]
    pub git_commit: String,
    #[serde(default = "default_local")]
    pub pipeline_id: String,
    #[serde(default = "default_local")]
    pub version: String,
}

fn default_port() -> u16 {
    8080
}

/// Absolute path of the bundled `public/` dir.
fn default_public_dir() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/public").into()
}

fn default_true() -> bool {
    true
}

fn default_local() -> String {
    "local".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            public_dir: default_public_dir(),
            seed: true,
            log_json: false,
            app_version: None,
            source: default_local(),
            git_commit: default_local(),
            pipeline_id: default_local(),
            version: default_local(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Self>(vars).unwrap_or_else(|error| {
            eprintln!("invalid configuration, using defaults: {error}");
            Self::default()
        })
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}
