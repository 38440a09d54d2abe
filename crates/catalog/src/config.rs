use crate::error::{CatalogError, Result};
use crate::fetch::{CatalogFetcher, CatalogKeys, DirFetcher, HttpFetcher};
use crate::row::CatalogId;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const ENV_CATALOG_URL: &str = "REMEDY_CATALOG_URL";
pub const ENV_CATALOG_DIR: &str = "REMEDY_CATALOG_DIR";
pub const ENV_CVR_KEY: &str = "REMEDY_CVR_KEY";
pub const ENV_COMMON_KEY: &str = "REMEDY_COMMON_KEY";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "REMEDY_FETCH_TIMEOUT_SECS";

pub const DEFAULT_CONFIG_FILE: &str = "remedy.toml";
const DEFAULT_CATALOG_DIR: &str = "./catalogs";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Where catalog bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// HTTP object store; keys are appended to the base URL.
    Http { base_url: String },
    /// Local directory laid out with the same keys.
    Dir { dir: PathBuf },
}

/// Resolved catalog configuration. Per field the environment wins over the
/// TOML file, which wins over built-in defaults; CLI flags are exported as
/// environment variables before this is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub source: CatalogSource,
    pub keys: CatalogKeys,
    pub fetch_timeout: Duration,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    catalog: CatalogSection,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogSection {
    url: Option<String>,
    dir: Option<PathBuf>,
    cvr_key: Option<String>,
    common_key: Option<String>,
    fetch_timeout_secs: Option<u64>,
}

impl CatalogConfig {
    /// Loads configuration from the given TOML file (or `remedy.toml` when
    /// present) plus `REMEDY_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => read_config_file(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    read_config_file(default)?
                } else {
                    CatalogSection::default()
                }
            }
        };
        Self::resolve(env_section()?, file)
    }

    fn resolve(env: CatalogSection, file: CatalogSection) -> Result<Self> {
        layer_conflict(&env, "the environment")?;
        layer_conflict(&file, "the config file")?;

        let url = env.url.or(file.url);
        let dir = env.dir.or(file.dir);
        // Across layers a URL wins: a remote override on top of a local
        // default selects the HTTP source.
        let source = match (url, dir) {
            (Some(base_url), _) => CatalogSource::Http { base_url },
            (None, Some(dir)) => CatalogSource::Dir { dir },
            (None, None) => CatalogSource::Dir {
                dir: PathBuf::from(DEFAULT_CATALOG_DIR),
            },
        };

        let keys = CatalogKeys {
            cvr: env
                .cvr_key
                .or(file.cvr_key)
                .unwrap_or_else(|| CatalogId::Cvr.default_key().to_string()),
            common: env
                .common_key
                .or(file.common_key)
                .unwrap_or_else(|| CatalogId::Common.default_key().to_string()),
        };

        let timeout_secs = env
            .fetch_timeout_secs
            .or(file.fetch_timeout_secs)
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(CatalogError::Config(
                "fetch timeout must be at least one second".to_string(),
            ));
        }

        Ok(Self {
            source,
            keys,
            fetch_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Builds the fetcher this configuration describes.
    pub fn fetcher(&self) -> Result<Arc<dyn CatalogFetcher>> {
        match &self.source {
            CatalogSource::Http { base_url } => Ok(Arc::new(HttpFetcher::new(
                base_url,
                self.keys.clone(),
                self.fetch_timeout,
            )?)),
            CatalogSource::Dir { dir } => {
                Ok(Arc::new(DirFetcher::new(dir.clone(), self.keys.clone())))
            }
        }
    }
}

fn layer_conflict(section: &CatalogSection, layer: &str) -> Result<()> {
    if section.url.is_some() && section.dir.is_some() {
        return Err(CatalogError::Config(format!(
            "catalog url and dir are both set in {layer}; configure exactly one"
        )));
    }
    Ok(())
}

fn env_section() -> Result<CatalogSection> {
    let fetch_timeout_secs = match env_string(ENV_FETCH_TIMEOUT_SECS) {
        Some(raw) => Some(raw.parse().map_err(|_| {
            CatalogError::Config(format!(
                "{ENV_FETCH_TIMEOUT_SECS} must be a whole number of seconds, got {raw:?}"
            ))
        })?),
        None => None,
    };
    Ok(CatalogSection {
        url: env_string(ENV_CATALOG_URL),
        dir: env_string(ENV_CATALOG_DIR).map(PathBuf::from),
        cvr_key: env_string(ENV_CVR_KEY),
        common_key: env_string(ENV_COMMON_KEY),
        fetch_timeout_secs,
    })
}

fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn read_config_file(path: &Path) -> Result<CatalogSection> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        CatalogError::Config(format!("cannot read {}: {err}", path.display()))
    })?;
    let file: ConfigFile = toml::from_str(&raw).map_err(|err| {
        CatalogError::Config(format!("invalid config {}: {err}", path.display()))
    })?;
    Ok(file.catalog)
}
