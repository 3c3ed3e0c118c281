use chrono::Utc;
use tracing::info;

use crate::catalog::{CATEGORIES, PERSONAS};
use crate::store::{Store, StoreError};

/// What `seed_reference_data` inserted on this boot.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories_inserted: usize,
    pub personas_inserted: usize,
}

/// Inserts the baked-in categories and personas when their tables are empty.
/// Non-empty tables are left untouched.
pub async fn seed_reference_data(store: &dyn Store) -> Result<SeedReport, StoreError> {
    let mut report = SeedReport::default();
    let now = Utc::now();

    let category_count = store.count_categories().await?;
    if category_count == 0 {
        let rows: Vec<_> = CATEGORIES.iter().map(|c| c.to_row(now)).collect();
        store.insert_categories(&rows).await?;
        report.categories_inserted = rows.len();
        info!("Seeded {} categories", rows.len());
    } else {
        info!("Categories already present ({category_count}), skipping seed");
    }

    let persona_count = store.count_personas().await?;
    if persona_count == 0 {
        let rows: Vec<_> = PERSONAS.iter().map(|p| p.to_row(now)).collect();
        store.insert_personas(&rows).await?;
        report.personas_inserted = rows.len();
        info!("Seeded {} personas", rows.len());
    } else {
        info!("Personas already present ({persona_count}), skipping seed");
    }

    Ok(report)
}
