//! Interest calculation oracle.
//!
//! Reference computation of the expected interest and total amounts,
//! independent of anything the page renders. Scenarios compare the UI
//! output against these values.
//!
//! All arithmetic runs in decimal currency units with a single rounding
//! step at the end of each computation (round-half-up on the cent
//! boundary). No intermediate rounding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::result::{SuiteError, SuiteResult};

/// Lower bound of the principal slider
pub const PRINCIPAL_MIN: f64 = 0.0;

/// Upper bound of the principal slider
pub const PRINCIPAL_MAX: f64 = 15_000.0;

/// Smallest rate offered by the dropdown
pub const RATE_MIN: u32 = 1;

/// Largest rate offered by the dropdown
pub const RATE_MAX: u32 = 15;

/// Accrual duration offered by the calculator.
///
/// `Daily` is the application's default selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Duration {
    /// Interest accrues per day (rate / 365)
    Daily,
    /// Interest accrues per month (rate / 12)
    Monthly,
    /// Interest accrues per year
    Yearly,
}

impl Duration {
    /// All durations, in the order the UI lists them
    pub const ALL: [Self; 3] = [Self::Daily, Self::Monthly, Self::Yearly];

    /// The `data-value` string the duration list uses
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::Daily
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Duration {
    type Err = SuiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Daily" => Ok(Self::Daily),
            "Monthly" => Ok(Self::Monthly),
            "Yearly" => Ok(Self::Yearly),
            other => Err(SuiteError::InvalidDuration {
                value: other.to_string(),
            }),
        }
    }
}

/// A whole-percent interest rate from the dropdown (1..=15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatePercent(u32);

impl RatePercent {
    /// Create a rate, rejecting values outside the offered range.
    pub fn new(percent: u32) -> SuiteResult<Self> {
        if (RATE_MIN..=RATE_MAX).contains(&percent) {
            Ok(Self(percent))
        } else {
            Err(SuiteError::InvalidRate {
                value: percent.to_string(),
            })
        }
    }

    /// The numeric percentage
    #[must_use]
    pub const fn percent(&self) -> u32 {
        self.0
    }

    /// The dropdown option label, e.g. `"5%"`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}%", self.0)
    }
}

impl fmt::Display for RatePercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl FromStr for RatePercent {
    type Err = SuiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_suffix('%').unwrap_or(s);
        let percent = digits.parse::<u32>().map_err(|_| SuiteError::InvalidRate {
            value: s.to_string(),
        })?;
        Self::new(percent).map_err(|_| SuiteError::InvalidRate {
            value: s.to_string(),
        })
    }
}

/// Round to two decimal places, half-up on the cent boundary.
#[must_use]
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Expected interest for a principal, rate and duration.
///
/// Yearly: `p * r / 100`; Monthly: `p * r / (100 * 12)`;
/// Daily: `p * r / (100 * 365)`. Rounded once, at the end.
#[must_use]
pub fn compute_interest(principal: f64, rate: RatePercent, duration: Duration) -> f64 {
    let rate = f64::from(rate.percent());
    let interest = match duration {
        Duration::Yearly => principal * rate / 100.0,
        Duration::Monthly => principal * rate / (100.0 * 12.0),
        Duration::Daily => principal * rate / (100.0 * 365.0),
    };
    round2(interest)
}

/// Expected total (principal plus interest), rounded to two decimals.
#[must_use]
pub fn compute_total(principal: f64, rate: RatePercent, duration: Duration) -> f64 {
    round2(principal + compute_interest(principal, rate, duration))
}

/// Check a principal amount against the slider bounds.
pub fn validate_principal(amount: f64) -> SuiteResult<()> {
    if !amount.is_finite() || !(PRINCIPAL_MIN..=PRINCIPAL_MAX).contains(&amount) {
        return Err(SuiteError::PrincipalOutOfRange { value: amount });
    }
    Ok(())
}

/// Render a currency amount the way the result fields do (two decimals).
#[must_use]
pub fn format_currency(amount: f64) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(p: u32) -> RatePercent {
        RatePercent::new(p).unwrap()
    }

    mod interest_computation {
        use super::*;

        #[test]
        fn yearly_reference_values() {
            assert_eq!(compute_interest(1500.0, rate(1), Duration::Yearly), 15.00);
            assert_eq!(compute_total(1500.0, rate(1), Duration::Yearly), 1515.00);
            assert_eq!(compute_interest(10_000.0, rate(1), Duration::Yearly), 100.00);
            assert_eq!(compute_total(10_000.0, rate(1), Duration::Yearly), 10_100.00);
        }

        #[test]
        fn monthly_divides_by_twelve() {
            // 5000 * 10 / 100 / 12 = 41.666... -> 41.67
            assert_eq!(compute_interest(5000.0, rate(10), Duration::Monthly), 41.67);
        }

        #[test]
        fn daily_divides_by_year_days() {
            // 10000 * 5 / 100 / 365 = 1.3698... -> 1.37
            assert_eq!(compute_interest(10_000.0, rate(5), Duration::Daily), 1.37);
        }

        #[test]
        fn zero_principal_yields_zero() {
            for duration in Duration::ALL {
                for percent in RATE_MIN..=RATE_MAX {
                    assert_eq!(compute_interest(0.0, rate(percent), duration), 0.00);
                    assert_eq!(compute_total(0.0, rate(percent), duration), 0.00);
                }
            }
        }

        #[test]
        fn total_adds_the_rounded_interest() {
            // 1000 * 3 / 100 / 365 = 0.08219... -> 0.08
            let interest = compute_interest(1000.0, rate(3), Duration::Daily);
            assert_eq!(interest, 0.08);
            assert_eq!(compute_total(1000.0, rate(3), Duration::Daily), 1000.08);
        }

        #[test]
        fn results_have_at_most_two_decimals() {
            for duration in Duration::ALL {
                let interest = compute_interest(12_345.0, rate(7), duration);
                assert_eq!(round2(interest), interest);
            }
        }
    }

    mod rounding {
        use super::*;

        #[test]
        fn half_cent_rounds_up() {
            assert_eq!(round2(0.125), 0.13);
            assert_eq!(round2(1.005000001), 1.01);
        }

        #[test]
        fn below_half_cent_rounds_down() {
            assert_eq!(round2(0.1249), 0.12);
        }
    }

    mod principal_bounds {
        use super::*;

        #[test]
        fn accepts_range_inclusive() {
            assert!(validate_principal(0.0).is_ok());
            assert!(validate_principal(15_000.0).is_ok());
            assert!(validate_principal(7500.5).is_ok());
        }

        #[test]
        fn rejects_out_of_range() {
            assert!(matches!(
                validate_principal(-0.01),
                Err(SuiteError::PrincipalOutOfRange { .. })
            ));
            assert!(matches!(
                validate_principal(15_000.01),
                Err(SuiteError::PrincipalOutOfRange { .. })
            ));
            assert!(validate_principal(f64::NAN).is_err());
        }
    }

    mod rate_parsing {
        use super::*;

        #[test]
        fn parses_with_and_without_suffix() {
            assert_eq!("5%".parse::<RatePercent>().unwrap().percent(), 5);
            assert_eq!("15".parse::<RatePercent>().unwrap().percent(), 15);
        }

        #[test]
        fn label_matches_dropdown_text() {
            assert_eq!(rate(5).label(), "5%");
            assert_eq!(rate(15).to_string(), "15%");
        }

        #[test]
        fn rejects_out_of_range_and_garbage() {
            assert!(matches!(
                "0%".parse::<RatePercent>(),
                Err(SuiteError::InvalidRate { .. })
            ));
            assert!("16".parse::<RatePercent>().is_err());
            assert!("five".parse::<RatePercent>().is_err());
            assert!(RatePercent::new(0).is_err());
            assert!(RatePercent::new(16).is_err());
        }
    }

    mod duration_parsing {
        use super::*;

        #[test]
        fn round_trips_list_values() {
            for duration in Duration::ALL {
                assert_eq!(duration.as_str().parse::<Duration>().unwrap(), duration);
            }
        }

        #[test]
        fn default_is_daily() {
            assert_eq!(Duration::default(), Duration::Daily);
        }

        #[test]
        fn rejects_unknown_values() {
            assert!(matches!(
                "Weekly".parse::<Duration>(),
                Err(SuiteError::InvalidDuration { .. })
            ));
            assert!("daily".parse::<Duration>().is_err());
        }
    }
}
