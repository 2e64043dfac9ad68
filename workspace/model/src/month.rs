use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A calendar month used as the alignment key across series.
///
/// Displayed and serialized as a zero-padded `YYYY-MM` string, so the
/// derived ordering is chronological and matches the lexicographic order of
/// the serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(NaiveDate);

/// Error returned when a month string matches none of the accepted formats.
#[derive(Debug, Error)]
#[error("unrecognized month format: {0}")]
pub struct ParseMonthError(String);

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(MonthKey)
    }

    /// Normalizes any date to its month.
    pub fn from_date(date: NaiveDate) -> Self {
        MonthKey(date.with_day(1).unwrap_or(date))
    }

    /// The current calendar month.
    pub fn current() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    /// Lenient parse used for form-style input: anything unrecognized falls
    /// back to the current month instead of failing.
    pub fn parse_or_current(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| Self::current())
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// The immediately preceding calendar month.
    pub fn previous(&self) -> Self {
        MonthKey(self.0.checked_sub_months(Months::new(1)).unwrap_or(self.0))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl FromStr for MonthKey {
    type Err = ParseMonthError;

    /// Accepts the formats the upstream sheets used: `YYYY-MM`,
    /// `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, `DD/MM/YYYY` and `MM/YYYY`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
            return Ok(Self::from_date(dt.date()));
        }
        for fmt in ["%Y-%m-%d", "%d/%m/%Y"] {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
                return Ok(Self::from_date(date));
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{trimmed}-1"), "%Y-%m-%d") {
            return Ok(Self::from_date(date));
        }
        if let Ok(date) = NaiveDate::parse_from_str(&format!("1/{trimmed}"), "%d/%m/%Y") {
            return Ok(Self::from_date(date));
        }
        Err(ParseMonthError(trimmed.to_string()))
    }
}

impl TryFrom<String> for MonthKey {
    type Error = ParseMonthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_accepted_formats() {
        for input in [
            "2024-03",
            "2024-03-15",
            "2024-03-15 10:30:00",
            "15/03/2024",
            "03/2024",
            "  2024-03  ",
        ] {
            let key: MonthKey = input.parse().unwrap_or_else(|_| panic!("failed on {input}"));
            assert_eq!(key.to_string(), "2024-03", "input {input}");
        }
    }

    #[test]
    fn rejects_garbage() {
        assert!("not-a-month".parse::<MonthKey>().is_err());
        assert!("".parse::<MonthKey>().is_err());
    }

    #[test]
    fn ordering_is_chronological() {
        let jan: MonthKey = "2024-01".parse().unwrap();
        let feb: MonthKey = "2024-02".parse().unwrap();
        let dec_prev: MonthKey = "2023-12".parse().unwrap();
        assert!(jan < feb);
        assert!(dec_prev < jan);
    }

    #[test]
    fn previous_crosses_year_boundary() {
        let jan: MonthKey = "2024-01".parse().unwrap();
        assert_eq!(jan.previous().to_string(), "2023-12");
    }

    #[test]
    fn serde_round_trips_as_string() {
        let key: MonthKey = "2025-04".parse().unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2025-04\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn deserializing_normalizes_full_dates() {
        let key: MonthKey = serde_json::from_str("\"2025-04-20\"").unwrap();
        assert_eq!(key.to_string(), "2025-04");
    }

    #[test]
    fn parse_or_current_falls_back() {
        assert_eq!(MonthKey::parse_or_current("??"), MonthKey::current());
        assert_eq!(
            MonthKey::parse_or_current("2024-07").to_string(),
            "2024-07"
        );
    }
}
