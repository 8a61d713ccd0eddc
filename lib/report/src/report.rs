//! Plain-text selection report
//!
//! One block per selection:
//!
//! ```text
//! HIERARCHICAL
//! LARD: 0.0412
//! Surrogates Selected:
//! DTXSID0001
//! DTXSID0042
//! ```
//!
//! Blocks are separated by a line of twenty `=`.

use surrosel_core::{EmbeddingPopulation, SelectionSet};

pub const BLOCK_SEPARATOR: &str = "\n====================\n";

/// Render every selection with its score and the identifiers it picked
pub fn render_report(population: &EmbeddingPopulation, selections: &SelectionSet) -> String {
    selections
        .iter()
        .map(|(label, selection)| {
            let ids: Vec<&str> = selection
                .subset
                .iter()
                .filter_map(|index| population.id(index))
                .collect();
            format!(
                "{}\nLARD: {}\nSurrogates Selected:\n{}",
                label.as_str().to_uppercase(),
                format_general(selection.score, 3),
                ids.join("\n")
            )
        })
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

/// `%g`-style formatting with `precision` significant digits
///
/// Scientific notation when the exponent is below -4 or at least
/// `precision`; trailing zeros are dropped.
pub fn format_general(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
