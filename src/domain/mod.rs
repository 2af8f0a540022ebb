use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One row of the source export, exactly as read from the file.
///
/// Every text field is optional: an empty cell in the export decodes to
/// `None` at the reader boundary, so absence is never conflated with an
/// empty string further down the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawRecord {
    /// `Name 1` .. `Name 6` positional name fragments
    pub name_parts: [Option<String>; 6],
    /// Distinguishes the "Primary name" row from alias rows within a group
    pub alias_type: Option<String>,
    pub country: Option<String>,
    /// Free text, possibly a parenthesized multi-country list
    pub country_of_birth: Option<String>,
    /// `Address 1` .. `Address 6` address line fragments
    pub address_parts: [Option<String>; 6],
    pub postal_code: Option<String>,
    /// Free-text date of birth, heterogeneous formats
    pub dob: Option<String>,
    pub listed_on: Option<String>,
    pub regime: Option<String>,
    pub group_type: Option<String>,
    /// Join key collapsing multiple alias rows into one entity
    pub group_id: Option<String>,
    pub last_updated: Option<String>,
}

impl RawRecord {
    /// Source column names, in export order. Used for the per-field
    /// missing-value counts in the quality summary.
    pub const FIELD_NAMES: [&'static str; 22] = [
        "Name 1",
        "Name 2",
        "Name 3",
        "Name 4",
        "Name 5",
        "Name 6",
        "Alias Type",
        "Country",
        "Country of Birth",
        "Address 1",
        "Address 2",
        "Address 3",
        "Address 4",
        "Address 5",
        "Address 6",
        "Post/Zip Code",
        "DOB",
        "Listed On",
        "Regime",
        "Group Type",
        "Group ID",
        "Last Updated",
    ];

    /// Field values paired with their source column names.
    pub fn field_values(&self) -> Vec<(&'static str, Option<&str>)> {
        let mut fields: Vec<(&'static str, Option<&str>)> = Vec::with_capacity(22);
        for (i, part) in self.name_parts.iter().enumerate() {
            fields.push((Self::FIELD_NAMES[i], part.as_deref()));
        }
        fields.push(("Alias Type", self.alias_type.as_deref()));
        fields.push(("Country", self.country.as_deref()));
        fields.push(("Country of Birth", self.country_of_birth.as_deref()));
        for (i, part) in self.address_parts.iter().enumerate() {
            fields.push((Self::FIELD_NAMES[9 + i], part.as_deref()));
        }
        fields.push(("Post/Zip Code", self.postal_code.as_deref()));
        fields.push(("DOB", self.dob.as_deref()));
        fields.push(("Listed On", self.listed_on.as_deref()));
        fields.push(("Regime", self.regime.as_deref()));
        fields.push(("Group Type", self.group_type.as_deref()));
        fields.push(("Group ID", self.group_id.as_deref()));
        fields.push(("Last Updated", self.last_updated.as_deref()));
        fields
    }
}

/// A raw row plus the fields derived from it by the enrichment stage.
/// Built once per row and immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub raw: RawRecord,
    /// Cleaned concatenation of the name fragments; may be empty
    pub full_name: String,
    /// The full name when this row is the "Primary name" row
    pub primary_name: Option<String>,
    /// The full name when this row is an alias row
    pub name_variation: Option<String>,
    /// Direct country plus countries extracted from the country-of-birth text
    pub associated_countries: BTreeSet<String>,
    /// Comma-joined address fragments + postal code + country
    pub full_address: Option<String>,
    /// Standardized (ISO where possible) date of birth
    pub dob: Option<String>,
    /// Standardized listing date
    pub listed_on: Option<String>,
}

/// Result of collect-unique reconciliation across a group's rows.
///
/// All-empty contributions reconcile to `Absent`, never to an empty
/// collection or an empty string; a single distinct value collapses to
/// a scalar. `Many` is a set: order across contributing rows carries no
/// meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Grouped {
    Absent,
    One(String),
    Many(BTreeSet<String>),
}

impl Grouped {
    /// Reconcile an iterator of per-row contributions. Empty strings and
    /// `None`s are dropped before deduplication.
    pub fn collect<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let unique: BTreeSet<String> = values
            .into_iter()
            .flatten()
            .filter(|v| !v.is_empty())
            .collect();
        match unique.len() {
            0 => Grouped::Absent,
            1 => Grouped::One(unique.into_iter().next().unwrap_or_default()),
            _ => Grouped::Many(unique),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Grouped::Absent)
    }

    /// Number of name variations this value contributes to the quality
    /// metrics: only a genuine multi-valued result counts.
    pub fn variation_count(&self) -> usize {
        match self {
            Grouped::Many(values) => values.len(),
            _ => 0,
        }
    }

    /// Flat rendering for tabular output. `Absent` renders as the empty
    /// cell, `Many` joins its members with the given separator.
    pub fn render(&self, separator: &str) -> String {
        match self {
            Grouped::Absent => String::new(),
            Grouped::One(value) => value.clone(),
            Grouped::Many(values) => {
                values.iter().cloned().collect::<Vec<_>>().join(separator)
            }
        }
    }
}

/// One consolidated output record per distinct group identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub group_id: String,
    pub primary_name: Grouped,
    pub name_variations: Grouped,
    pub country: Grouped,
    pub regime: Grouped,
    /// Standardised date of birth, reconciled across rows
    pub dob: Grouped,
    /// First contributing row's associated-countries set
    pub associated_countries: BTreeSet<String>,
    pub full_address: Grouped,
    /// First contributing row's standardized listing date
    pub listed_on: Option<String>,
    pub group_type: Grouped,
    /// First contributing row's last-updated timestamp, verbatim
    pub last_updated: Option<String>,
}

/// Per-field and per-dataset quality metrics over the raw input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    /// Missing-value count per source column
    pub missing_values: BTreeMap<String, usize>,
    /// Raw DOB values present but not already canonical `YYYY-MM-DD`
    pub date_format_issues: usize,
    /// Total name variations across grouped entities
    pub n_name_variations: usize,
    /// Mean name variations per grouped entity
    pub mean_name_variations: f64,
}

/// Duplicate findings over the raw input. Rows sharing a group id are an
/// expected form of duplication (one entity, several alias rows) and are
/// reported separately from exact row duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateFindings {
    /// Rows equal, across all columns, to an earlier row
    pub exact_duplicates: usize,
    /// Distinct group ids appearing on more than one row
    pub group_id_duplicate_ids: usize,
    /// Total rows belonging to those group ids
    pub group_id_duplicate_rows: usize,
}

/// Immutable quality snapshot, regenerated on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitySummary {
    pub data_quality: DataQuality,
    pub duplicates: DuplicateFindings,
    /// All raw rows read from the input
    pub record_count: usize,
    /// Rows that carried a group id and entered grouping
    pub processed_entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_unique_collapses_single_value_to_scalar() {
        let grouped = Grouped::collect(vec![
            Some("Iran".to_string()),
            Some("Iran".to_string()),
        ]);
        assert_eq!(grouped, Grouped::One("Iran".to_string()));
    }

    #[test]
    fn collect_unique_keeps_distinct_values_as_set() {
        let grouped = Grouped::collect(vec![
            Some("A".to_string()),
            Some("B".to_string()),
            Some("A".to_string()),
        ]);
        let expected: BTreeSet<String> =
            ["A".to_string(), "B".to_string()].into_iter().collect();
        assert_eq!(grouped, Grouped::Many(expected));
    }

    #[test]
    fn collect_unique_treats_empty_strings_as_absent() {
        let grouped = Grouped::collect(vec![Some(String::new()), None, Some(String::new())]);
        assert!(grouped.is_absent());
    }

    #[test]
    fn variation_count_only_counts_multi_valued_results() {
        assert_eq!(Grouped::Absent.variation_count(), 0);
        assert_eq!(Grouped::One("x".to_string()).variation_count(), 0);
        let many: BTreeSet<String> =
            ["a".to_string(), "b".to_string()].into_iter().collect();
        assert_eq!(Grouped::Many(many).variation_count(), 2);
    }

    #[test]
    fn grouped_serializes_as_null_scalar_or_list() {
        assert_eq!(serde_json::to_string(&Grouped::Absent).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&Grouped::One("Syria".to_string())).unwrap(),
            "\"Syria\""
        );
        let many: BTreeSet<String> =
            ["A".to_string(), "B".to_string()].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&Grouped::Many(many)).unwrap(),
            "[\"A\",\"B\"]"
        );
    }
}
