//! Entity grouping: reduces the enriched rows sharing a group id into one
//! consolidated entity per sanctioned party.
//!
//! Reconciliation is per field: listing date, last-updated and associated
//! countries are first-wins (first contributing row in input order); every
//! other field is collect-unique (distinct non-empty values, collapsed to
//! a scalar when singular, absent when none).

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::domain::{EnrichedRecord, Entity, Grouped};

/// Output of the grouping reduction.
#[derive(Debug)]
pub struct GroupingOutcome {
    /// One entity per distinct group id, in order of first appearance
    pub entities: Vec<Entity>,
    /// Rows skipped because they carried no group id
    pub rows_without_group_id: usize,
}

/// Groups enriched rows by group identifier.
///
/// Every distinct group id present in the input yields exactly one entity.
/// Rows without a group id cannot be attributed to an entity; they are
/// skipped and counted rather than invented into singleton groups.
pub fn group_entities(records: &[EnrichedRecord]) -> GroupingOutcome {
    let mut order: Vec<&str> = Vec::new();
    let mut members: HashMap<&str, Vec<&EnrichedRecord>> = HashMap::new();
    let mut rows_without_group_id = 0;

    for record in records {
        match record.raw.group_id.as_deref().map(str::trim) {
            Some(group_id) if !group_id.is_empty() => {
                let contributions = members.entry(group_id).or_default();
                if contributions.is_empty() {
                    order.push(group_id);
                }
                contributions.push(record);
            }
            _ => {
                warn!("Skipping row without group id");
                rows_without_group_id += 1;
            }
        }
    }

    let entities = order
        .iter()
        .map(|&group_id| reconcile(group_id, &members[group_id]))
        .collect();

    debug!(
        "Grouped {} rows into {} entities ({} rows without group id)",
        records.len() - rows_without_group_id,
        order.len(),
        rows_without_group_id
    );

    GroupingOutcome {
        entities,
        rows_without_group_id,
    }
}

/// Reduces one group's contributing rows into a single entity.
fn reconcile(group_id: &str, rows: &[&EnrichedRecord]) -> Entity {
    // rows is never empty: a group id only enters the map with a member
    let first = rows.first().copied();

    Entity {
        group_id: group_id.to_string(),
        primary_name: Grouped::collect(rows.iter().map(|r| r.primary_name.clone())),
        name_variations: Grouped::collect(rows.iter().map(|r| r.name_variation.clone())),
        country: Grouped::collect(rows.iter().map(|r| r.raw.country.clone())),
        regime: Grouped::collect(rows.iter().map(|r| r.raw.regime.clone())),
        dob: Grouped::collect(rows.iter().map(|r| r.dob.clone())),
        associated_countries: first
            .map(|r| r.associated_countries.clone())
            .unwrap_or_default(),
        full_address: Grouped::collect(rows.iter().map(|r| r.full_address.clone())),
        listed_on: first.and_then(|r| r.listed_on.clone()),
        group_type: Grouped::collect(rows.iter().map(|r| r.raw.group_type.clone())),
        last_updated: first.and_then(|r| r.raw.last_updated.clone()),
    }
}
