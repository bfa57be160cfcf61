//! Lookups over a loaded record set.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::record::BusinessRecord;

/// Criteria collected by the search UI. Not applied yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessFilters {
    pub query: Option<String>,
    pub category: Option<String>,
    pub verified_only: bool,
}

impl BusinessFilters {
    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.category.is_none() && !self.verified_only
    }
}

/// Returns `records` unchanged. Filtering criteria have not been defined.
pub fn filter_businesses(
    records: Vec<BusinessRecord>,
    filters: &BusinessFilters,
) -> Vec<BusinessRecord> {
    if !filters.is_empty() {
        debug!("Filters {:?} are not applied; returning all records", filters);
    }
    records
}

/// First record whose load-local id matches `id`.
///
/// `id` is read the way `parseInt` reads it: leading whitespace, an
/// optional sign, then as many decimal digits as follow. `"2"`, `" 2"` and
/// `"2abc"` all select id 2; `"abc"` selects nothing.
pub fn get_business_by_id<'a>(records: &'a [BusinessRecord], id: &str) -> Option<&'a BusinessRecord> {
    let wanted = parse_leading_int(id)?;
    records.iter().find(|record| i64::from(record.id) == wanted)
}

/// The first `count` records, as shown on the home page.
pub fn featured_businesses(records: &[BusinessRecord], count: usize) -> &[BusinessRecord] {
    &records[..count.min(records.len())]
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value: i64 = rest[..digits_end].parse().ok()?;

    Some(if negative { -value } else { value })
}
