use std::path::PathBuf;

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

/// Where inputs are read from and outputs go. Source file names, thresholds
/// and the shuffle seed are constants and not configurable.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub output_csv: PathBuf,
    pub db_path: PathBuf,
}

impl Settings {
    /// Defaults overridden by `HOAX_DATA_DIR`, `HOAX_OUTPUT_CSV`, `HOAX_DB_PATH`.
    pub fn load() -> Result<Self> {
        Self::from_env(Environment::with_prefix("HOAX"))
    }

    fn from_env(env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("data_dir", ".")?
            .set_default("output_csv", "cleaned_news.csv")?
            .set_default("db_path", "data/hoax_corpus.sqlite")?
            .add_source(env)
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
