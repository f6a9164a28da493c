//! CSV observation data adapter.
//!
//! Reads a weekly observations file with columns
//! `Product_ID,Category,Week,Price,Units_Sold`, where `Week` is an ISO week
//! label like `2025-W03`. Rows are grouped by product in first-seen order
//! and each product's observations are sorted by week.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::{NaiveDate, Weekday};

use crate::domain::catalog::CatalogEntry;
use crate::domain::error::PricelabError;
use crate::domain::observation::Observation;
use crate::ports::data_port::DataPort;

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

/// "2025-W03" → Monday of ISO week 3 of 2025.
fn parse_week_label(label: &str) -> Result<NaiveDate, PricelabError> {
    let invalid = || PricelabError::Data {
        reason: format!("invalid week label '{label}' (expected YYYY-Www)"),
    };

    let (year_str, week_str) = label.split_once("-W").ok_or_else(invalid)?;
    let year: i32 = year_str.parse().map_err(|_| invalid())?;
    let week: u32 = week_str.parse().map_err(|_| invalid())?;
    NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).ok_or_else(invalid)
}

impl DataPort for CsvAdapter {
    fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, PricelabError> {
        let content = fs::read_to_string(&self.path).map_err(|e| PricelabError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut entries: Vec<(CatalogEntry, Vec<NaiveDate>)> = Vec::new();
        let mut index_by_product: HashMap<String, usize> = HashMap::new();

        for result in rdr.records() {
            let record = result.map_err(|e| PricelabError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let product_id = record
                .get(0)
                .ok_or_else(|| PricelabError::Data {
                    reason: "missing Product_ID column".into(),
                })?
                .to_string();

            let category = record
                .get(1)
                .ok_or_else(|| PricelabError::Data {
                    reason: "missing Category column".into(),
                })?
                .to_string();

            let week = parse_week_label(record.get(2).ok_or_else(|| PricelabError::Data {
                reason: "missing Week column".into(),
            })?)?;

            let price: f64 = record
                .get(3)
                .ok_or_else(|| PricelabError::Data {
                    reason: "missing Price column".into(),
                })?
                .parse()
                .map_err(|e| PricelabError::Data {
                    reason: format!("invalid Price value for {product_id}: {e}"),
                })?;

            let units_sold: f64 = record
                .get(4)
                .ok_or_else(|| PricelabError::Data {
                    reason: "missing Units_Sold column".into(),
                })?
                .parse()
                .map_err(|e| PricelabError::Data {
                    reason: format!("invalid Units_Sold value for {product_id}: {e}"),
                })?;

            let index = match index_by_product.get(&product_id) {
                Some(&i) => {
                    if entries[i].0.category != category {
                        return Err(PricelabError::Data {
                            reason: format!(
                                "conflicting categories for {product_id}: '{}' vs '{category}'",
                                entries[i].0.category
                            ),
                        });
                    }
                    i
                }
                None => {
                    index_by_product.insert(product_id.clone(), entries.len());
                    entries.push((
                        CatalogEntry {
                            product_id,
                            category,
                            observations: Vec::new(),
                        },
                        Vec::new(),
                    ));
                    entries.len() - 1
                }
            };

            entries[index].0.observations.push(Observation { price, units_sold });
            entries[index].1.push(week);
        }

        // Order each product's observations chronologically; ties keep file
        // order.
        let catalog = entries
            .into_iter()
            .map(|(entry, weeks)| {
                let mut dated: Vec<(NaiveDate, Observation)> = weeks
                    .into_iter()
                    .zip(entry.observations)
                    .collect();
                dated.sort_by_key(|&(week, _)| week);
                CatalogEntry {
                    product_id: entry.product_id,
                    category: entry.category,
                    observations: dated.into_iter().map(|(_, obs)| obs).collect(),
                }
            })
            .collect();

        Ok(catalog)
    }
}
