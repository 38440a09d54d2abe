use crate::error::{CatalogError, Result};
use crate::row::CatalogId;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

/// Source of raw catalog bytes. The store calls this at most once per
/// catalog per process, absent failures.
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    async fn fetch(&self, id: CatalogId) -> Result<Vec<u8>>;
}

/// Per-catalog object keys, relative to the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogKeys {
    pub cvr: String,
    pub common: String,
}

impl CatalogKeys {
    pub fn key(&self, id: CatalogId) -> &str {
        match id {
            CatalogId::Cvr => &self.cvr,
            CatalogId::Common => &self.common,
        }
    }
}

impl Default for CatalogKeys {
    fn default() -> Self {
        Self {
            cvr: CatalogId::Cvr.default_key().to_string(),
            common: CatalogId::Common.default_key().to_string(),
        }
    }
}

/// Fetches catalogs from an HTTP object store with `GET {base}/{key}`.
/// No retries and no auth; a non-2xx status is an error.
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
    keys: CatalogKeys,
}

impl HttpFetcher {
    pub fn new(base_url: &str, keys: CatalogKeys, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            keys,
        })
    }

    fn url(&self, id: CatalogId) -> String {
        format!("{}/{}", self.base_url, self.keys.key(id))
    }
}

#[async_trait]
impl CatalogFetcher for HttpFetcher {
    async fn fetch(&self, id: CatalogId) -> Result<Vec<u8>> {
        let url = self.url(id);
        log::info!("fetching {id} catalog from {url}");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                catalog: id,
                url,
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Fetches catalogs from a local directory laid out with the same keys.
/// Used for development and tests.
pub struct DirFetcher {
    dir: PathBuf,
    keys: CatalogKeys,
}

impl DirFetcher {
    pub fn new(dir: PathBuf, keys: CatalogKeys) -> Self {
        Self { dir, keys }
    }
}

#[async_trait]
impl CatalogFetcher for DirFetcher {
    async fn fetch(&self, id: CatalogId) -> Result<Vec<u8>> {
        let path = self.dir.join(self.keys.key(id));
        log::info!("reading {id} catalog from {}", path.display());
        tokio::fs::read(&path)
            .await
            .map_err(|source| CatalogError::Read {
                catalog: id,
                path,
                source,
            })
    }
}
