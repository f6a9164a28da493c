//! Observation ingestion port trait.

use crate::domain::catalog::CatalogEntry;
use crate::domain::error::PricelabError;

/// Supplies the per-product observation catalog. Entries arrive unvalidated
/// and in first-seen product order; the domain's catalog validation decides
/// which products survive.
pub trait DataPort {
    fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, PricelabError>;

    fn list_products(&self) -> Result<Vec<String>, PricelabError> {
        Ok(self
            .fetch_catalog()?
            .into_iter()
            .map(|e| e.product_id)
            .collect())
    }
}
