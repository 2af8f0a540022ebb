//! CSV reader for the source export. The first physical line is metadata
//! (publication date banner) and is skipped; the second line carries the
//! column headers; data starts on line three. Empty cells decode to
//! `None` so absence stays distinct from an empty string downstream.

use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::common::{RefineryError, Result};
use crate::domain::RawRecord;

/// Columns the pipeline reads unconditionally; missing any of these from
/// the header is a structural error.
const REQUIRED_COLUMNS: [&str; 8] = [
    "Group ID",
    "Alias Type",
    "Country",
    "DOB",
    "Listed On",
    "Regime",
    "Group Type",
    "Last Updated",
];

/// Header lookup for one export file. Optional columns (name and address
/// fragments, country of birth, postal code) resolve to `None` when the
/// export omits them.
struct ColumnIndex {
    by_name: HashMap<String, usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let by_name: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();

        for column in REQUIRED_COLUMNS {
            if !by_name.contains_key(column) {
                return Err(RefineryError::MissingColumn(column.to_string()));
            }
        }

        Ok(Self { by_name })
    }

    /// Cell value for a column, with empty-cell-to-absent decoding.
    fn get(&self, record: &csv::StringRecord, column: &str) -> Option<String> {
        let index = *self.by_name.get(column)?;
        match record.get(index) {
            Some(value) if !value.is_empty() => Some(value.to_string()),
            _ => None,
        }
    }

    fn get_numbered(
        &self,
        record: &csv::StringRecord,
        prefix: &str,
    ) -> [Option<String>; 6] {
        std::array::from_fn(|i| self.get(record, &format!("{} {}", prefix, i + 1)))
    }
}

/// Reads all rows of a sanctions export into memory.
///
/// Structural problems (unreadable file, missing metadata/header lines,
/// missing required columns) are fatal; ragged data rows are tolerated
/// and short cells read as absent.
pub fn read_raw_records(path: &Path) -> Result<Vec<RawRecord>> {
    info!("📄 Reading sanctions export from {}", path.display());

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut records = reader.records();

    // line 1: metadata banner, line 2: the real header
    let missing_header = || RefineryError::EmptyInput {
        path: path.display().to_string(),
    };
    records.next().ok_or_else(missing_header)??;
    let headers = records.next().ok_or_else(missing_header)??;
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        rows.push(RawRecord {
            name_parts: columns.get_numbered(&record, "Name"),
            alias_type: columns.get(&record, "Alias Type"),
            country: columns.get(&record, "Country"),
            country_of_birth: columns.get(&record, "Country of Birth"),
            address_parts: columns.get_numbered(&record, "Address"),
            postal_code: columns.get(&record, "Post/Zip Code"),
            dob: columns.get(&record, "DOB"),
            listed_on: columns.get(&record, "Listed On"),
            regime: columns.get(&record, "Regime"),
            group_type: columns.get(&record, "Group Type"),
            group_id: columns.get(&record, "Group ID"),
            last_updated: columns.get(&record, "Last Updated"),
        });
    }

    debug!("Read {} raw rows", rows.len());
    Ok(rows)
}
