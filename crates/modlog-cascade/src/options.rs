//! Conversion of provider records into dropdown options.

use modlog_common::constants::DEFAULT_TRIM_LABEL;
use modlog_common::types::SelectOption;
use modlog_lookup::models::{MakeRecord, ModelRecord, SpecRecord, YearRange};

/// Every year in `range`, newest first.
#[must_use]
pub fn year_options(range: YearRange) -> Vec<SelectOption> {
    (range.min_year..=range.max_year)
        .rev()
        .map(|year| {
            let year = year.to_string();
            SelectOption::new(year.clone(), year)
        })
        .collect()
}

/// Stable partition of `records`: common makes first, each group in
/// provider order.
#[must_use]
pub fn partition_common(records: Vec<MakeRecord>) -> Vec<MakeRecord> {
    let (mut common, other): (Vec<_>, Vec<_>) =
        records.into_iter().partition(|make| make.make_is_common);
    common.extend(other);
    common
}

/// Make options, common makes first.
#[must_use]
pub fn make_options(records: Vec<MakeRecord>) -> Vec<SelectOption> {
    partition_common(records)
        .into_iter()
        .map(|make| SelectOption::new(make.make_id, make.make_display))
        .collect()
}

/// Model options; the model name is both value and label.
#[must_use]
pub fn model_options(records: &[ModelRecord]) -> Vec<SelectOption> {
    records
        .iter()
        .map(|model| SelectOption::new(model.model_name.clone(), model.model_name.clone()))
        .collect()
}

/// Trim options keyed by provider model id.
#[must_use]
pub fn trim_options(records: &[SpecRecord]) -> Vec<SelectOption> {
    records
        .iter()
        .map(|trim| {
            let label = trim
                .model_trim
                .as_deref()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(DEFAULT_TRIM_LABEL);
            SelectOption::new(trim.model_id.clone(), label)
        })
        .collect()
}
