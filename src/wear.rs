//! Wear aggregation over a list of construction elements.
//!
//! Totals are rounded to one decimal place with round-half-away-from-zero
//! ([`f64::round`]) applied to the floating-point sum, so `12.35` rounds to
//! `12.4` and `12.34` to `12.3`.

use crate::model::{ConditionCategory, ConstructionElement, TechnicalCondition};
use tracing::debug;

/// Inclusive range accepted for a wear value.
pub const WEAR_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

#[must_use]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sum of weighted wear across `elements`, rounded to one decimal.
///
/// An empty list yields `0.0`.
#[must_use]
pub fn calculate_total_wear(elements: &[ConstructionElement]) -> f64 {
    let sum: f64 = elements
        .iter()
        .map(ConstructionElement::weighted_wear)
        .sum();
    round_one_decimal(sum)
}

/// Condition rating for a total wear figure.
///
/// Callers are expected to keep wear values within [`WEAR_RANGE`]; negative
/// totals fall into the first bracket.
#[must_use]
pub fn get_technical_condition(total_wear: f64) -> TechnicalCondition {
    ConditionCategory::from_total_wear(total_wear).into()
}

/// Sets the wear of the element named `name`.
///
/// Returns `false` without mutating anything when the value is outside
/// [`WEAR_RANGE`] (NaN included) or no element has that exact name.
pub fn update_element_wear(elements: &mut [ConstructionElement], name: &str, new_value: f64) -> bool {
    if !WEAR_RANGE.contains(&new_value) {
        debug!(name, new_value, "rejected wear value outside 0..=100");
        return false;
    }

    match elements.iter_mut().find(|e| e.name == name) {
        Some(element) => {
            element.wear_percent = new_value;
            true
        }
        None => {
            debug!(name, "no element with this name");
            false
        }
    }
}

pub fn reset_all_wear(elements: &mut [ConstructionElement]) {
    for element in elements {
        element.wear_percent = 0.0;
    }
}

/// Copies wear values from `previous` into `next` for elements whose names
/// match exactly. Returns how many values were carried over.
///
/// Elements in `next` without a namesake keep their current wear; values of
/// names absent from `next` are dropped.
pub fn carry_forward_wear(previous: &[ConstructionElement], next: &mut [ConstructionElement]) -> usize {
    let mut carried = 0;
    for element in next.iter_mut() {
        if let Some(old) = previous.iter().find(|p| p.name == element.name) {
            element.wear_percent = old.wear_percent;
            carried += 1;
        }
    }
    carried
}
