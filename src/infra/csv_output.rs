//! CSV writer for the consolidated dataset: one row per group id.
//! Multi-valued reconciled fields render as `value; value`; absent
//! fields render as empty cells.

use csv::Writer;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::common::Result;
use crate::domain::Entity;
use crate::pipeline::orchestrator::DatasetSink;

/// Separator for multi-valued cells in the flat output.
const MULTI_VALUE_SEPARATOR: &str = "; ";

const OUTPUT_COLUMNS: [&str; 11] = [
    "Group ID",
    "Primary Name",
    "Name Variations",
    "Country",
    "Regime",
    "Standardised Date of Birth",
    "Associated Countries",
    "Full Address",
    "Listed On",
    "Group Type",
    "Last Updated",
];

/// File-based implementation of [`DatasetSink`].
pub struct CsvDatasetWriter {
    path: PathBuf,
}

impl CsvDatasetWriter {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl DatasetSink for CsvDatasetWriter {
    fn write_entities(&mut self, entities: &[Entity]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = Writer::from_path(&self.path)?;
        writer.write_record(OUTPUT_COLUMNS)?;

        for entity in entities {
            let associated = entity
                .associated_countries
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(MULTI_VALUE_SEPARATOR);
            let row: [String; 11] = [
                entity.group_id.clone(),
                entity.primary_name.render(MULTI_VALUE_SEPARATOR),
                entity.name_variations.render(MULTI_VALUE_SEPARATOR),
                entity.country.render(MULTI_VALUE_SEPARATOR),
                entity.regime.render(MULTI_VALUE_SEPARATOR),
                entity.dob.render(MULTI_VALUE_SEPARATOR),
                associated,
                entity.full_address.render(MULTI_VALUE_SEPARATOR),
                entity.listed_on.clone().unwrap_or_default(),
                entity.group_type.render(MULTI_VALUE_SEPARATOR),
                entity.last_updated.clone().unwrap_or_default(),
            ];
            writer.write_record(&row)?;
        }

        writer.flush()?;
        info!(
            "💾 Wrote {} consolidated entities to {}",
            entities.len(),
            self.path.display()
        );
        Ok(())
    }
}
