//! Display formatting for confidence breakdowns.
//!
//! Probabilities are rounded here for display only. Percentages follow the
//! shortest-decimal convention: values are rounded to `decimals` places and
//! trailing zeros are dropped down to a single fractional digit, so `0.8`
//! renders as `80.0` and `1/3` as `33.33` at two decimals.

use crate::LabelSchema;

/// Separator between classes in a single-message breakdown.
pub const INLINE_SEPARATOR: &str = "  |  ";

/// Separator between classes in the batch `confidence` column.
pub const BATCH_SEPARATOR: &str = " / ";

/// Format a probability in `[0, 1]` as a percentage without the `%` sign.
pub fn percent(probability: f64, decimals: usize) -> String {
    let mut s = format!("{:.*}", decimals, probability * 100.0);
    if s.contains('.') {
        while s.ends_with('0') && !s.ends_with(".0") {
            s.pop();
        }
    }
    if s == "-0.0" {
        s.remove(0);
    }
    s
}

/// `Adult: 80.0%  |  Minor: 20.0%`
pub fn inline_breakdown(schema: &LabelSchema, probabilities: &[f64]) -> String {
    schema
        .iter()
        .zip(probabilities)
        .map(|(label, &p)| format!("{label}: {}%", percent(p, 1)))
        .collect::<Vec<_>>()
        .join(INLINE_SEPARATOR)
}

/// One `- Adult: 80.0%` line per class, two decimals.
pub fn list_breakdown(schema: &LabelSchema, probabilities: &[f64]) -> String {
    schema
        .iter()
        .zip(probabilities)
        .map(|(label, &p)| format!("- {label}: {}%", percent(p, 2)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `Adult 80.0% / Minor 20.0%`, the batch `confidence` column value.
pub fn batch_confidence(schema: &LabelSchema, probabilities: &[f64]) -> String {
    schema
        .iter()
        .zip(probabilities)
        .map(|(label, &p)| format!("{label} {}%", percent(p, 1)))
        .collect::<Vec<_>>()
        .join(BATCH_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> LabelSchema {
        LabelSchema::new(["Adult", "Minor"]).unwrap()
    }

    #[test]
    fn percent_one_decimal() {
        assert_eq!(percent(0.8, 1), "80.0");
        assert_eq!(percent(0.12345, 1), "12.3");
        assert_eq!(percent(1.0, 1), "100.0");
        assert_eq!(percent(0.0, 1), "0.0");
    }

    #[test]
    fn percent_two_decimals_drops_trailing_zeros() {
        assert_eq!(percent(0.8, 2), "80.0");
        assert_eq!(percent(0.333, 2), "33.3");
        assert_eq!(percent(1.0 / 3.0, 2), "33.33");
    }

    #[test]
    fn inline_format() {
        assert_eq!(
            inline_breakdown(&schema(), &[0.8, 0.2]),
            "Adult: 80.0%  |  Minor: 20.0%"
        );
    }

    #[test]
    fn list_format() {
        assert_eq!(
            list_breakdown(&schema(), &[2.0 / 3.0, 1.0 / 3.0]),
            "- Adult: 66.67%\n- Minor: 33.33%"
        );
    }

    #[test]
    fn batch_format() {
        assert_eq!(
            batch_confidence(&schema(), &[0.25, 0.75]),
            "Adult 25.0% / Minor 75.0%"
        );
    }
}
