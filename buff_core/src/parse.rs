//! Parsers for user-entered check-in values.
//!
//! Weight sets come in as strings like `"135x5, 185x5, 225x3"` or
//! `"90kgx5"`; kilograms are converted so weights are always stored in lbs.

use crate::{Error, Result, WeightSet};

const KG_TO_LBS: f64 = 2.20462;

/// Parse a comma-separated list of weight sets.
///
/// Each set is `WEIGHTxREPS`, optionally suffixed with `kg` on the weight.
/// An empty or whitespace-only string parses to no sets.
pub fn parse_weight_sets(input: &str) -> Result<Vec<WeightSet>> {
    let mut sets = Vec::new();

    for raw in input.split(',') {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        let lowered = raw.to_lowercase();
        let in_kg = lowered.contains("kg");
        let spec = if in_kg {
            lowered.replace("kg", "")
        } else {
            lowered
        };

        let (weight_str, reps_str) = spec.split_once('x').ok_or_else(|| bad_set(raw))?;
        let weight: f64 = weight_str.trim().parse().map_err(|_| bad_set(raw))?;
        let reps: u32 = reps_str.trim().parse().map_err(|_| bad_set(raw))?;

        if weight < 0.0 {
            return Err(bad_set(raw));
        }

        let weight_lbs = if in_kg { weight * KG_TO_LBS } else { weight };
        sets.push(WeightSet {
            weight_lbs: (weight_lbs * 100.0).round() / 100.0,
            reps,
        });
    }

    Ok(sets)
}

fn bad_set(raw: &str) -> Error {
    Error::Parse(format!(
        "invalid weight set '{}'; use 'WEIGHTxREPS' or 'WEIGHTkgxREPS' (e.g. '170x5' or '90kgx5')",
        raw
    ))
}
