//! Row enrichment: applies the field normalizers across a raw record to
//! produce the derived fields the grouper and quality stages consume.

use tracing::debug;

use crate::domain::{EnrichedRecord, RawRecord};
use crate::pipeline::processing::normalize::{
    build_associated_countries, build_full_address, build_full_name, clean_name, standardize_date,
};

/// Alias-type tag marking a group's primary-name row.
pub const PRIMARY_ALIAS_TYPE: &str = "Primary name";

/// Derives the enriched view of one raw row. Stateless and total: no raw
/// value can make enrichment fail.
pub fn enrich_record(raw: RawRecord) -> EnrichedRecord {
    let full_name = clean_name(&build_full_name(&raw.name_parts));

    let is_primary = raw
        .alias_type
        .as_deref()
        .map(|alias| alias.trim() == PRIMARY_ALIAS_TYPE)
        .unwrap_or(false);

    let (primary_name, name_variation) = if full_name.is_empty() {
        (None, None)
    } else if is_primary {
        (Some(full_name.clone()), None)
    } else {
        (None, Some(full_name.clone()))
    };

    let associated_countries = build_associated_countries(&raw);
    let full_address = build_full_address(&raw);
    let dob = standardize_date(raw.dob.as_deref());
    let listed_on = standardize_date(raw.listed_on.as_deref());

    EnrichedRecord {
        raw,
        full_name,
        primary_name,
        name_variation,
        associated_countries,
        full_address,
        dob,
        listed_on,
    }
}

/// Enriches every row, preserving input order. Order matters downstream:
/// first-wins reconciliation is defined against original row order.
pub fn enrich_all(rows: Vec<RawRecord>) -> Vec<EnrichedRecord> {
    debug!("Enriching {} raw rows", rows.len());
    rows.into_iter().map(enrich_record).collect()
}
