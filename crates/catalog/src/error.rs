use crate::row::CatalogId;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("invalid catalog configuration: {0}")]
    Config(String),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {catalog} catalog from {url}")]
    HttpStatus {
        catalog: CatalogId,
        url: String,
        status: u16,
    },

    #[error("cannot read {catalog} catalog from {}: {source}", .path.display())]
    Read {
        catalog: CatalogId,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed {catalog} catalog: {source}")]
    Csv {
        catalog: CatalogId,
        source: csv::Error,
    },
}
