//! Lookback windows for article discovery
//!
//! A timeframe is written as a quantity and a unit letter: `"10d"` is ten
//! days, `"3m"` three months, `"2y"` two years. The unit letter is case
//! insensitive; whitespace anywhere in the string is malformed.

use std::fmt;
use std::str::FromStr;

use advisor_core::{Error, Result};
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Unit of a lookback window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeframeUnit {
    Days,
    Months,
    Years,
}

impl TimeframeUnit {
    fn letter(self) -> char {
        match self {
            Self::Days => 'd',
            Self::Months => 'm',
            Self::Years => 'y',
        }
    }
}

/// A lookback window counting back from a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeframe {
    quantity: u32,
    unit: TimeframeUnit,
}

impl Timeframe {
    pub fn new(quantity: u32, unit: TimeframeUnit) -> Self {
        Self { quantity, unit }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit(&self) -> TimeframeUnit {
        self.unit
    }

    /// The date the window starts on, counting back from `today`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTimeframe`] when the window reaches
    /// outside the representable calendar range.
    pub fn start_from(&self, today: NaiveDate) -> Result<NaiveDate> {
        let start = match self.unit {
            TimeframeUnit::Days => today.checked_sub_days(Days::new(u64::from(self.quantity))),
            TimeframeUnit::Months => today.checked_sub_months(Months::new(self.quantity)),
            TimeframeUnit::Years => self
                .quantity
                .checked_mul(12)
                .and_then(|months| today.checked_sub_months(Months::new(months))),
        };
        start.ok_or_else(|| {
            Error::InvalidTimeframe(format!("window {self} reaches outside the calendar range"))
        })
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.quantity, self.unit.letter())
    }
}

impl FromStr for Timeframe {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut chars = s.chars();
        let unit_letter = chars
            .next_back()
            .ok_or_else(|| Error::InvalidTimeframe(s.to_string()))?;
        let digits = chars.as_str();

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidTimeframe(s.to_string()));
        }
        let quantity: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidTimeframe(s.to_string()))?;

        let unit = match unit_letter.to_ascii_lowercase() {
            'd' => TimeframeUnit::Days,
            'm' => TimeframeUnit::Months,
            'y' => TimeframeUnit::Years,
            _ => return Err(Error::InvalidTimeframe(s.to_string())),
        };

        Ok(Self { quantity, unit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_accepts_quantity_and_unit() {
        let cases = [
            ("10d", 10, TimeframeUnit::Days),
            ("3m", 3, TimeframeUnit::Months),
            ("2y", 2, TimeframeUnit::Years),
            ("10D", 10, TimeframeUnit::Days),
            ("365d", 365, TimeframeUnit::Days),
        ];
        for (input, quantity, unit) in cases {
            let timeframe: Timeframe = input.parse().unwrap();
            assert_eq!(timeframe.quantity(), quantity, "{input}");
            assert_eq!(timeframe.unit(), unit, "{input}");
        }
    }

    #[test]
    fn test_parse_rejects_malformed_windows() {
        for input in ["", "d", "10", "10w", "10 d", " 10d", "ten days", "1.5d", "-3m"] {
            let err = input.parse::<Timeframe>().unwrap_err();
            assert!(matches!(err, Error::InvalidTimeframe(_)), "{input}");
        }
    }

    #[test]
    fn test_start_from_counts_back() {
        let today = date(2024, 3, 15);
        assert_eq!(
            "10d".parse::<Timeframe>().unwrap().start_from(today).unwrap(),
            date(2024, 3, 5)
        );
        assert_eq!(
            "3m".parse::<Timeframe>().unwrap().start_from(today).unwrap(),
            date(2023, 12, 15)
        );
        assert_eq!(
            "2y".parse::<Timeframe>().unwrap().start_from(today).unwrap(),
            date(2022, 3, 15)
        );
    }

    #[test]
    fn test_start_from_clamps_month_ends() {
        // Two months before March 31 lands on January 31; one month
        // before March 31 clamps to February's last day
        let today = date(2024, 3, 31);
        assert_eq!(
            "1m".parse::<Timeframe>().unwrap().start_from(today).unwrap(),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn test_display_round_trips() {
        for input in ["10d", "3m", "2y"] {
            let timeframe: Timeframe = input.parse().unwrap();
            assert_eq!(timeframe.to_string(), input);
        }
    }
}
