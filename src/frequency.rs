//! Payment frequencies and the conversion from a span of months to a number
//! of payment periods.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MortgageError, MortgageResult};

/// How often a regular mortgage payment is made.
///
/// The serialized form is the short code used by the input form
/// (`"AccW"`, `"W"`, `"AccBiW"`, `"BiW"`, `"SemiM"`, `"M"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentFrequency {
    #[serde(rename = "AccW")]
    AcceleratedWeekly,
    #[serde(rename = "W")]
    Weekly,
    #[serde(rename = "AccBiW")]
    AcceleratedBiWeekly,
    #[serde(rename = "BiW")]
    BiWeekly,
    /// 24 payments per year.
    #[serde(rename = "SemiM")]
    SemiMonthly,
    /// 12 payments per year.
    #[serde(rename = "M")]
    Monthly,
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 6] = [
        PaymentFrequency::AcceleratedWeekly,
        PaymentFrequency::Weekly,
        PaymentFrequency::AcceleratedBiWeekly,
        PaymentFrequency::BiWeekly,
        PaymentFrequency::SemiMonthly,
        PaymentFrequency::Monthly,
    ];

    pub fn code(self) -> &'static str {
        match self {
            PaymentFrequency::AcceleratedWeekly => "AccW",
            PaymentFrequency::Weekly => "W",
            PaymentFrequency::AcceleratedBiWeekly => "AccBiW",
            PaymentFrequency::BiWeekly => "BiW",
            PaymentFrequency::SemiMonthly => "SemiM",
            PaymentFrequency::Monthly => "M",
        }
    }

    /// Number of payment periods in `months` months.
    ///
    /// Weekly based frequencies are not integral for most spans
    /// (e.g. 52 * 5 / 12); the fractional value is returned as is.
    pub fn payment_count(self, months: u32) -> f64 {
        let months = f64::from(months);
        match self {
            PaymentFrequency::AcceleratedWeekly | PaymentFrequency::Weekly => 52.0 * months / 12.0,
            PaymentFrequency::AcceleratedBiWeekly | PaymentFrequency::BiWeekly => {
                52.0 * months / 12.0 / 2.0
            }
            PaymentFrequency::SemiMonthly => 2.0 * months,
            PaymentFrequency::Monthly => months,
        }
    }

    pub fn periods_per_year(self) -> f64 {
        self.payment_count(12)
    }
}

impl FromStr for PaymentFrequency {
    type Err = MortgageError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        PaymentFrequency::ALL
            .into_iter()
            .find(|frequency| frequency.code() == code)
            .ok_or_else(|| MortgageError::InvalidFrequency {
                code: code.to_string(),
            })
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Resolves a frequency code and a span of months into a number of payments.
///
/// # Errors
///
/// Returns [`MortgageError::InvalidFrequency`] if `frequency_code` is not a
/// supported code.
pub fn resolve_payment_count(frequency_code: &str, months: u32) -> MortgageResult<f64> {
    let frequency: PaymentFrequency = frequency_code.parse()?;
    Ok(frequency.payment_count(months))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("M", 12.0)]
    #[case("SemiM", 24.0)]
    #[case("W", 52.0)]
    #[case("AccW", 52.0)]
    #[case("BiW", 26.0)]
    #[case("AccBiW", 26.0)]
    fn test_payments_per_year(#[case] code: &str, #[case] expected: f64) {
        assert_eq!(resolve_payment_count(code, 12).unwrap(), expected);
    }

    #[rstest]
    fn test_whole_years_scale_linearly(
        #[values("M", "SemiM", "W", "AccW", "BiW", "AccBiW")] code: &str,
        #[values(1, 2, 5, 10, 25, 30)] years: u32,
    ) {
        let per_year = resolve_payment_count(code, 12).unwrap();
        let total = resolve_payment_count(code, years * 12).unwrap();
        assert_eq!(total, f64::from(years) * per_year);
    }

    #[test]
    fn test_weekly_ten_years() {
        assert_eq!(resolve_payment_count("W", 120).unwrap(), 520.0);
    }

    #[test]
    fn test_weekly_partial_year_is_fractional() {
        let count = resolve_payment_count("W", 5).unwrap();
        assert!(count.fract() > 0.0);
        assert!((count - 21.666_666).abs() < 1e-5);
    }

    #[test]
    fn test_invalid_frequency() {
        let err = resolve_payment_count("invalid", 12).unwrap_err();
        assert_eq!(
            err,
            MortgageError::InvalidFrequency {
                code: "invalid".to_string()
            }
        );
        assert_eq!(err.to_string(), "Frequency: invalid is not valid");
    }

    #[test]
    fn test_codes_round_trip_through_from_str() {
        for frequency in PaymentFrequency::ALL {
            assert_eq!(frequency.code().parse::<PaymentFrequency>().unwrap(), frequency);
        }
    }

    #[test]
    fn test_display_shows_code() {
        assert_eq!(PaymentFrequency::AcceleratedBiWeekly.to_string(), "AccBiW");
        assert_eq!(format!("{}", PaymentFrequency::Monthly), "M");
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&PaymentFrequency::SemiMonthly).unwrap();
        assert_eq!(json, "\"SemiM\"");
        let parsed: PaymentFrequency = serde_json::from_str("\"AccBiW\"").unwrap();
        assert_eq!(parsed, PaymentFrequency::AcceleratedBiWeekly);
    }
}
