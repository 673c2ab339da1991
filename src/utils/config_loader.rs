use async_trait::async_trait;
use dotenvy::dotenv;
use regex::{Captures, Regex};
use serde::de::DeserializeOwned;
use std::sync::LazyLock;
use std::env;
use thiserror::Error;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([a-zA-Z_][0-9a-zA-Z_]*)\}").expect("valid env var pattern"));

#[allow(clippy::enum_variant_names)]
#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Error loading config: {0}")]
    ConfigError(String),
}

#[async_trait]
pub trait PingerConfigLoader {
    type SectionType;

    async fn load_section_from_file(file_name: String) -> Result<Self::SectionType, LoadConfigError>;
}

pub async fn load_from_file<T: DeserializeOwned>(file_name: String) -> Result<T, LoadConfigError> {
    dotenv().ok();
    let contents = tokio::fs::read_to_string(file_name).await?;
    load_from_str(&contents)
}

/// Parses TOML after substituting `${VAR}` references from the environment.
pub fn load_from_str<T: DeserializeOwned>(contents: &str) -> Result<T, LoadConfigError> {
    load_from_str_with(contents, |name| env::var(name).ok())
}

/// Like [`load_from_str`], resolving `${VAR}` through `lookup`.
pub fn load_from_str_with<T, F>(contents: &str, lookup: F) -> Result<T, LoadConfigError>
where
    T: DeserializeOwned,
    F: Fn(&str) -> Option<String>,
{
    let contents = expand_vars(contents, lookup);
    let config: T = toml::from_str(&contents)?;
    Ok(config)
}

// Unset variables are left as-is so the failure surfaces where the value is used.
fn expand_vars<F: Fn(&str) -> Option<String>>(raw_config: &str, lookup: F) -> String {
    ENV_VAR
        .replace_all(raw_config, |caps: &Captures| match lookup(&caps[1]) {
            Some(val) => val,
            None => caps[0].to_string(),
        })
        .to_string()
}
