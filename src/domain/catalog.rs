//! Catalog validation: unchecked ingestion rows into validated series.
//!
//! A bad product is skipped with a recorded reason rather than aborting the
//! batch; downstream stages only ever see validated [`ProductSeries`].

use crate::domain::observation::{Observation, ProductSeries};

/// One product's raw observations as delivered by a data port, before any
/// invariant checking.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub product_id: String,
    pub category: String,
    pub observations: Vec<Observation>,
}

#[derive(Debug, Clone)]
pub struct SkippedProduct {
    pub product_id: String,
    pub reason: String,
}

pub struct CatalogValidation {
    pub products: Vec<ProductSeries>,
    pub skipped: Vec<SkippedProduct>,
}

/// Validate every entry, keeping first-seen order for the survivors.
pub fn validate_catalog(entries: Vec<CatalogEntry>) -> CatalogValidation {
    let mut products = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();

    for entry in entries {
        let product_id = entry.product_id.clone();
        match ProductSeries::new(entry.product_id, entry.category, entry.observations) {
            Ok(series) => products.push(series),
            Err(err) => skipped.push(SkippedProduct {
                product_id,
                reason: err.to_string(),
            }),
        }
    }

    CatalogValidation { products, skipped }
}
