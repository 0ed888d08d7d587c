use super::error::TrackerError;
use super::models::{Direction, VixSnapshot};
use super::normalizer::parse_decimal;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Parse a scalar price handed over by the fetch layer
pub fn parse_price(field: &'static str, text: &str) -> Result<Decimal, TrackerError> {
    parse_decimal(text).ok_or_else(|| TrackerError::InvalidPrice {
        field,
        value: text.to_string(),
    })
}

/// `delta` as a percent of `base`, 2 dp
fn percent_change(delta: Decimal, base: Decimal) -> Option<Decimal> {
    if base.is_zero() {
        return None;
    }
    Some((delta / base * Decimal::ONE_HUNDRED).round_dp(2))
}

/// Where the index stands against the day's open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub open: Decimal,
    pub current: Decimal,
    pub change_percent: Option<Decimal>,
    pub direction: Direction,
}

impl SessionSummary {
    pub fn new(open: Decimal, current: Decimal) -> Self {
        Self {
            open,
            current,
            change_percent: percent_change(current - open, open),
            direction: Direction::between(open, current),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VixReading {
    pub current: Decimal,
    pub prev_close: Decimal,
    pub change_percent: Option<Decimal>,
    pub direction: Direction,
}

impl VixReading {
    /// Change is expressed against the current value, not the previous close
    pub fn from_snapshot(vix: &VixSnapshot) -> Result<Self, TrackerError> {
        let current = parse_price("vix current", &vix.current)?;
        let prev_close = parse_price("vix previous close", &vix.prev_close)?;

        Ok(Self {
            current,
            prev_close,
            change_percent: percent_change(current - prev_close, current),
            direction: Direction::between(prev_close, current),
        })
    }
}

/// Week of the month a date falls in (days 1-7 are week 1)
pub fn week_of_month(date: NaiveDate) -> u32 {
    (date.day() - 1) / 7 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_session_summary_up() {
        let summary = SessionSummary::new(dec("17500"), dec("17587.50"));
        assert_eq!(summary.change_percent, Some(dec("0.5")));
        assert_eq!(summary.direction, Direction::Up);
    }

    #[test]
    fn test_session_summary_flat_counts_as_up() {
        let summary = SessionSummary::new(dec("17500"), dec("17500"));
        assert_eq!(summary.change_percent, Some(Decimal::ZERO));
        assert_eq!(summary.direction, Direction::Up);
    }

    #[test]
    fn test_vix_reading() {
        let vix = VixSnapshot {
            current: "12.50".to_string(),
            prev_close: "13.00".to_string(),
        };
        let reading = VixReading::from_snapshot(&vix).unwrap();
        assert_eq!(reading.change_percent, Some(dec("-4")));
        assert_eq!(reading.direction, Direction::Down);
    }

    #[test]
    fn test_parse_price_rejects_garbage() {
        assert_eq!(parse_price("open", "17,500.25").unwrap(), dec("17500.25"));
        assert!(matches!(
            parse_price("open", "n/a"),
            Err(TrackerError::InvalidPrice { field: "open", .. })
        ));
    }

    #[test]
    fn test_week_of_month() {
        let date = |d| NaiveDate::from_ymd_opt(2026, 10, d).unwrap();
        assert_eq!(week_of_month(date(1)), 1);
        assert_eq!(week_of_month(date(7)), 1);
        assert_eq!(week_of_month(date(8)), 2);
        assert_eq!(week_of_month(date(31)), 5);
    }
}
