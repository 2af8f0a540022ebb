//! Field-level normalizers: pure transforms from one raw field to a
//! canonical value. Nothing here may fail; malformed input always
//! degrades to a defined fallback for the quality stage to flag.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use crate::domain::RawRecord;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static PUNCTUATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));
/// Range markers like `(1) to (6)` carry no country of their own
static COUNTRY_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\d+\) to \(\d+\)").expect("valid regex"));
/// Country name following a parenthesized index marker, e.g. `(1) Pakistan`
static COUNTRY_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\d+\)\s*([A-Za-z\s-]+)").expect("valid regex"));
/// Bare 4-digit year for the lossy date fallback
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("valid regex"));

/// Noise phrase that appears inside country-of-birth free text
const PREVIOUS_ADDRESS_NOISE: &str = "previous address";

/// Date formats tried by the standardizer, in order. The export's native
/// `DD/MM/YYYY` comes first so ambiguous day/month values resolve to it.
const DATE_FORMATS: [&str; 5] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y", "%Y/%m/%d"];

/// Canonical output format for standardized dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Cleans a free-text name: trim, collapse runs of whitespace, strip
/// punctuation, title-case. Empty input maps to empty output.
pub fn clean_name(name: &str) -> String {
    let titled = title_case(name);
    let trimmed = titled.trim();
    let collapsed = WHITESPACE_RE.replace_all(trimmed, " ");
    PUNCTUATION_RE.replace_all(&collapsed, "").into_owned()
}

/// Title-cases a string: a letter is uppercased when the preceding
/// character is not alphabetic, lowercased otherwise.
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_alphabetic = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if prev_alphabetic {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(ch);
            prev_alphabetic = false;
        }
    }
    out
}

/// Joins the present, non-empty name fragments in fragment order with
/// single spaces. Absent fragments are skipped, not rendered as blanks.
pub fn build_full_name(name_parts: &[Option<String>; 6]) -> String {
    name_parts
        .iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Standardizes a free-text date to ISO `YYYY-MM-DD` where possible.
///
/// Strategies are tried in order: the known exact formats, then a bare
/// `19xx`/`20xx` year rendered as `<year>-01-01` (deliberately lossy),
/// then passthrough of the original string. Missing or empty input is
/// absent, not an error, and no strategy failure escapes this function.
pub fn standardize_date(value: Option<&str>) -> Option<String> {
    let raw = value?.trim();
    if raw.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, format) {
            return Some(date.format(ISO_DATE_FORMAT).to_string());
        }
    }

    if let Some(year) = YEAR_RE.find(raw) {
        return Some(format!("{}-01-01", year.as_str()));
    }

    Some(raw.to_string())
}

/// Extracts country names from free text like `(1) Pakistan (2) Afghanistan`.
///
/// Range markers (`(1) to (6) Algeria`) and the "previous address" noise
/// phrase are stripped first. When no index markers are present the whole
/// stripped string is the single result. Empty input yields an empty set.
pub fn extract_countries(value: &str) -> BTreeSet<String> {
    let stripped = COUNTRY_RANGE_RE.replace_all(value, "");
    let stripped = stripped.replace(PREVIOUS_ADDRESS_NOISE, "");

    let countries: BTreeSet<String> = COUNTRY_ITEM_RE
        .captures_iter(&stripped)
        .map(|caps| caps[1].trim().to_string())
        .filter(|country| !country.is_empty())
        .collect();

    if !countries.is_empty() {
        return countries;
    }

    let whole = stripped.trim();
    if whole.is_empty() {
        BTreeSet::new()
    } else {
        BTreeSet::from([whole.to_string()])
    }
}

/// Unions the record's direct country with the countries extracted from
/// its country-of-birth text. Deduplicated, unordered.
pub fn build_associated_countries(record: &RawRecord) -> BTreeSet<String> {
    let mut countries = BTreeSet::new();

    if let Some(country) = record.country.as_deref() {
        let trimmed = country.trim();
        if !trimmed.is_empty() {
            countries.insert(trimmed.to_string());
        }
    }

    if let Some(birth) = record.country_of_birth.as_deref() {
        countries.extend(extract_countries(birth));
    }

    countries
}

/// Concatenates address fragments, postal code and country with `, `.
/// Absent when no component is present.
pub fn build_full_address(record: &RawRecord) -> Option<String> {
    let mut components: Vec<&str> = record
        .address_parts
        .iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.is_empty())
        .collect();

    if let Some(postal_code) = record.postal_code.as_deref() {
        if !postal_code.is_empty() {
            components.push(postal_code);
        }
    }
    if let Some(country) = record.country.as_deref() {
        if !country.is_empty() {
            components.push(country);
        }
    }

    if components.is_empty() {
        None
    } else {
        Some(components.join(", "))
    }
}
