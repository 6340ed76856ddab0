use std::path::PathBuf;

use anyhow::{anyhow, Result};

pub const DATA_DIR_NAME: &str = ".symptomlog";
pub const DATA_DIR_ENV: &str = "SYMPTOMLOG_DATA_DIR";
/// Key the whole log is stored under.
pub const DEFAULT_BLOB_KEY: &str = "symptoms_by_date";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub blob_key: String,
}

impl Config {
    /// Explicit directory first, then `SYMPTOMLOG_DATA_DIR`, then `~/.symptomlog`.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        let env_dir = std::env::var_os(DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::from_sources(data_dir, env_dir)
    }

    fn from_sources(explicit: Option<PathBuf>, env_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match explicit.or(env_dir) {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        Ok(Self {
            data_dir,
            blob_key: DEFAULT_BLOB_KEY.to_string(),
        })
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(DATA_DIR_NAME))
}
