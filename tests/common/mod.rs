#![allow(dead_code)]

use pricelab::domain::catalog::CatalogEntry;
use pricelab::domain::error::PricelabError;
use pricelab::domain::observation::{Observation, ProductSeries};
use pricelab::ports::data_port::DataPort;

pub struct MockDataPort {
    pub entries: Vec<CatalogEntry>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            error: None,
        }
    }

    pub fn with_entry(mut self, product_id: &str, category: &str, pairs: &[(f64, f64)]) -> Self {
        self.entries.push(make_entry(product_id, category, pairs));
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, PricelabError> {
        if let Some(reason) = &self.error {
            return Err(PricelabError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.entries.clone())
    }
}

pub fn make_entry(product_id: &str, category: &str, pairs: &[(f64, f64)]) -> CatalogEntry {
    CatalogEntry {
        product_id: product_id.to_string(),
        category: category.to_string(),
        observations: pairs
            .iter()
            .map(|&(price, units_sold)| Observation { price, units_sold })
            .collect(),
    }
}

pub fn make_series(product_id: &str, category: &str, pairs: &[(f64, f64)]) -> ProductSeries {
    let entry = make_entry(product_id, category, pairs);
    ProductSeries::new(entry.product_id, entry.category, entry.observations).unwrap()
}
