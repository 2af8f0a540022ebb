//! Quality assessment over the raw rows and the grouped entities.
//!
//! Read-only: nothing here mutates either dataset. The summary is
//! regenerated on every run and never persisted as authoritative state.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::domain::{DataQuality, DuplicateFindings, Entity, QualitySummary, RawRecord};

/// Canonical standardized date shape
static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Duplicate detection policy:
/// - exact duplicates: rows equal across all columns to an earlier row
///   (a duplicated pair counts once);
/// - group-id duplicates: ids shared by several rows, reported separately
///   because one entity legitimately spans multiple alias rows.
pub fn identify_duplicates(rows: &[RawRecord]) -> DuplicateFindings {
    let mut seen: HashSet<&RawRecord> = HashSet::with_capacity(rows.len());
    let mut exact_duplicates = 0;
    for row in rows {
        if !seen.insert(row) {
            exact_duplicates += 1;
        }
    }

    let mut rows_per_group: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        if let Some(group_id) = row.group_id.as_deref() {
            *rows_per_group.entry(group_id).or_insert(0) += 1;
        }
    }
    let mut group_id_duplicate_ids = 0;
    let mut group_id_duplicate_rows = 0;
    for count in rows_per_group.values() {
        if *count > 1 {
            group_id_duplicate_ids += 1;
            group_id_duplicate_rows += count;
        }
    }

    DuplicateFindings {
        exact_duplicates,
        group_id_duplicate_ids,
        group_id_duplicate_rows,
    }
}

/// Field-quality metrics over the raw input and the grouped output.
///
/// The DOB metric runs against the raw values: anything not already
/// canonical ISO is flagged, which covers both untranslatable dates and
/// values that only standardize through the lossy year fallback.
pub fn assess_data_quality(rows: &[RawRecord], entities: &[Entity]) -> DataQuality {
    let mut missing_values: BTreeMap<String, usize> = RawRecord::FIELD_NAMES
        .iter()
        .map(|name| ((*name).to_string(), 0))
        .collect();
    for row in rows {
        for (field, value) in row.field_values() {
            if value.is_none() {
                if let Some(count) = missing_values.get_mut(field) {
                    *count += 1;
                }
            }
        }
    }

    let date_format_issues = rows
        .iter()
        .filter_map(|row| row.dob.as_deref())
        .filter(|dob| !ISO_DATE_RE.is_match(dob))
        .count();

    let n_name_variations: usize = entities
        .iter()
        .map(|entity| entity.name_variations.variation_count())
        .sum();
    let mean_name_variations = if entities.is_empty() {
        0.0
    } else {
        n_name_variations as f64 / entities.len() as f64
    };

    DataQuality {
        missing_values,
        date_format_issues,
        n_name_variations,
        mean_name_variations,
    }
}

/// Assembles the full quality snapshot for one run.
pub fn summarize(
    rows: &[RawRecord],
    entities: &[Entity],
    processed_entries: usize,
) -> QualitySummary {
    QualitySummary {
        data_quality: assess_data_quality(rows, entities),
        duplicates: identify_duplicates(rows),
        record_count: rows.len(),
        processed_entries,
    }
}
