mod config;
mod decode;
mod error;
mod fetch;
mod row;
mod store;

pub use config::{CatalogConfig, CatalogSource, DEFAULT_CONFIG_FILE};
pub use config::{
    ENV_CATALOG_DIR, ENV_CATALOG_URL, ENV_COMMON_KEY, ENV_CVR_KEY, ENV_FETCH_TIMEOUT_SECS,
};
pub use decode::{decode_catalog_text, parse_catalog};
pub use error::{CatalogError, Result};
pub use fetch::{CatalogFetcher, CatalogKeys, DirFetcher, HttpFetcher};
pub use row::{CatalogId, CatalogRow};
pub use store::CatalogStore;
