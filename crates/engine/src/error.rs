use remedy_catalog::CatalogError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    // Display passes through: the text ends up inside a user-facing notice.
    #[error("{0}")]
    Catalog(#[from] CatalogError),
}
