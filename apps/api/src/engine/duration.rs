//! Free-text experience durations ("1 year 6 months", "18 mos", "2 yrs").
//!
//! A lexical scan, not a date parser: every `<number> <unit>` pair is summed
//! and everything else is ignored.

use std::sync::LazyLock;

use regex::Regex;

// The unit is the whole run of letters after the number, so "1yr6mo" splits
// cleanly and "6 monsters" is rejected.
static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*([A-Za-z]+)").expect("valid regex"));

fn unit_months(unit: &str) -> Option<f64> {
    match unit.to_ascii_lowercase().as_str() {
        "year" | "years" | "yr" | "yrs" => Some(12.0),
        "month" | "months" | "mo" | "mos" => Some(1.0),
        _ => None,
    }
}

/// Months described by `text`. Total: unparsable text yields 0.
pub fn parse_months(text: &str) -> u32 {
    let total: f64 = DURATION_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let amount: f64 = caps[1].parse().ok()?;
            Some(amount * unit_months(&caps[2])?)
        })
        .sum();

    if total.is_finite() {
        total.round().min(u32::MAX as f64) as u32
    } else {
        u32::MAX
    }
}

/// Canonical text for a month count, e.g. `2 years 3 months`.
pub fn format_months(months: u32) -> String {
    let years = months / 12;
    let rest = months % 12;
    let plural = |n: u32, unit: &str| {
        if n == 1 {
            format!("1 {unit}")
        } else {
            format!("{n} {unit}s")
        }
    };
    match (years, rest) {
        (0, m) => plural(m, "month"),
        (y, 0) => plural(y, "year"),
        (y, m) => format!("{} {}", plural(y, "year"), plural(m, "month")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_only() {
        assert_eq!(parse_months("6 months"), 6);
        assert_eq!(parse_months("1 month"), 1);
        assert_eq!(parse_months("9 mos"), 9);
    }

    #[test]
    fn test_years_only() {
        assert_eq!(parse_months("3 years"), 36);
        assert_eq!(parse_months("1 yr"), 12);
        assert_eq!(parse_months("2yrs"), 24);
    }

    #[test]
    fn test_years_and_months_either_order() {
        assert_eq!(parse_months("1 year 6 months"), 18);
        assert_eq!(parse_months("6 months and 1 year"), 18);
        assert_eq!(parse_months("2 Years, 3 Months"), 27);
        assert_eq!(parse_months("1yr6mo"), 18);
        assert_eq!(parse_months("2yrs3mos"), 27);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(parse_months("4 MONTHS"), 4);
        assert_eq!(parse_months("1 YEAR"), 12);
    }

    #[test]
    fn test_fractional_years() {
        assert_eq!(parse_months("1.5 years"), 18);
    }

    #[test]
    fn test_text_without_digits_is_zero() {
        for text in ["", "forever", "a couple of years", "months and months", "🦀🦀"] {
            assert_eq!(parse_months(text), 0, "text = {text:?}");
        }
    }

    #[test]
    fn test_unrelated_units_ignored() {
        assert_eq!(parse_months("6 monsters"), 0);
        assert_eq!(parse_months("40 hours per week"), 0);
    }

    #[test]
    fn test_huge_numbers_saturate() {
        assert_eq!(parse_months("99999999999999999999999 years"), u32::MAX);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "1 year 6 months";
        assert_eq!(parse_months(text), parse_months(text));
    }

    #[test]
    fn test_format_round_trips_through_parser() {
        for months in [0, 1, 6, 12, 13, 27, 36] {
            assert_eq!(parse_months(&format_months(months)), months);
        }
        assert_eq!(format_months(27), "2 years 3 months");
        assert_eq!(format_months(12), "1 year");
    }
}
