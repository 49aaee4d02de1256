use crate::error::PipelineError;
use crate::types::{DemandRecord, FilterCriteria};

/// Reduce the raw table to the rows matching `criteria`.
///
/// Each dimension only constrains the result when its selection is
/// non-empty; dimensions combine with AND. Row order is not part of the
/// contract. An empty result is an error: aggregation must never run over
/// zero rows, and the caller surfaces it as "no data matches the filters".
pub fn apply(
    records: &[DemandRecord],
    criteria: &FilterCriteria,
) -> Result<Vec<DemandRecord>, PipelineError> {
    let filtered: Vec<DemandRecord> = records
        .iter()
        .filter(|r| matches(r, criteria))
        .cloned()
        .collect();
    if filtered.is_empty() {
        return Err(PipelineError::EmptyResult);
    }
    Ok(filtered)
}

fn matches(record: &DemandRecord, criteria: &FilterCriteria) -> bool {
    if !criteria.years.is_empty() && !criteria.years.contains(&record.year) {
        return false;
    }
    if !criteria.months.is_empty() && !criteria.months.contains(&record.month) {
        return false;
    }
    if !criteria.weekdays.is_empty() && !criteria.weekdays.contains(&record.weekday) {
        return false;
    }
    if !criteria.provinces.is_empty() && !criteria.provinces.contains(&record.province) {
        return false;
    }
    true
}
