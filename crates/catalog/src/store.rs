use crate::decode::{decode_catalog_text, parse_catalog};
use crate::error::Result;
use crate::fetch::CatalogFetcher;
use crate::row::{CatalogId, CatalogRow};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Lazily loaded, process-lifetime cache of both catalogs.
///
/// Each catalog is fetched and parsed at most once; concurrent first calls
/// share a single in-flight load. A failed load leaves the cell empty, so
/// the next call retries instead of caching the failure. Loaded rows are
/// never invalidated or refreshed.
pub struct CatalogStore {
    fetcher: Arc<dyn CatalogFetcher>,
    cvr: OnceCell<Arc<[CatalogRow]>>,
    common: OnceCell<Arc<[CatalogRow]>>,
}

impl CatalogStore {
    pub fn new(fetcher: Arc<dyn CatalogFetcher>) -> Self {
        Self {
            fetcher,
            cvr: OnceCell::new(),
            common: OnceCell::new(),
        }
    }

    /// Rows of one catalog, loading it on first use.
    pub async fn rows(&self, id: CatalogId) -> Result<Arc<[CatalogRow]>> {
        let rows = self.cell(id).get_or_try_init(|| self.load(id)).await?;
        Ok(Arc::clone(rows))
    }

    /// Whether a catalog is already resident, without triggering a load.
    pub fn loaded(&self, id: CatalogId) -> bool {
        self.cell(id).initialized()
    }

    fn cell(&self, id: CatalogId) -> &OnceCell<Arc<[CatalogRow]>> {
        match id {
            CatalogId::Cvr => &self.cvr,
            CatalogId::Common => &self.common,
        }
    }

    async fn load(&self, id: CatalogId) -> Result<Arc<[CatalogRow]>> {
        let bytes = self.fetcher.fetch(id).await?;
        let text = decode_catalog_text(&bytes);
        let rows = parse_catalog(id, &text)?;
        log::info!("loaded {} rows from {id} catalog", rows.len());
        Ok(rows.into())
    }
}
