use super::config::{GRID_OFFSETS, GRID_SIZE, RANGE_OFFSETS, STRIKE_STEP};
use super::models::StrikeRecord;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Open value truncated to a whole number and rounded down to the strike step.
/// 17,548.90 → 17500
pub fn band_base(open: Decimal) -> Option<i64> {
    let whole = open.trunc().to_i64()?;
    Some(whole - whole.rem_euclid(STRIKE_STEP))
}

/// Strikes around the band base that are worth highlighting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceGrid {
    pub base: i64,
    pub points: [i64; GRID_SIZE],
}

impl PriceGrid {
    pub fn new(base: i64) -> Self {
        Self {
            base,
            points: GRID_OFFSETS.map(|offset| base + offset),
        }
    }

    pub fn contains(&self, strike: i64) -> bool {
        self.points.contains(&strike)
    }

    /// Base, +1 and +2 steps: the slice of the band the day is trading in
    pub fn in_range(&self, strike: i64) -> bool {
        RANGE_OFFSETS.iter().any(|offset| self.base + offset == strike)
    }
}

/// Who is driving the call side at a strike
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WriterActivity {
    CallWriters,
    CewExiting,
}

impl WriterActivity {
    pub fn classify(indicator: i64) -> Self {
        if indicator < 0 {
            WriterActivity::CewExiting
        } else {
            WriterActivity::CallWriters
        }
    }
}

impl fmt::Display for WriterActivity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WriterActivity::CallWriters => write!(f, "Call Writers"),
            WriterActivity::CewExiting => write!(f, "CEW Exiting"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandEntry {
    #[serde(flatten)]
    pub record: StrikeRecord,
    pub activity: WriterActivity,
    pub in_range: bool,
}

/// Keep the records whose strike lands on a grid point, in scan order.
/// Duplicate strikes are all kept.
pub fn select_band(grid: &PriceGrid, records: &[StrikeRecord]) -> Vec<BandEntry> {
    records
        .iter()
        .filter(|record| grid.contains(record.strike))
        .map(|record| BandEntry {
            record: record.clone(),
            activity: WriterActivity::classify(record.call_open_interest),
            in_range: grid.in_range(record.strike),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(strike: i64, call_oi: i64) -> StrikeRecord {
        StrikeRecord {
            strike,
            call_premium: Decimal::ONE,
            call_open_interest: call_oi,
            put_premium: Decimal::ONE,
            put_open_interest: 10,
        }
    }

    #[test]
    fn test_band_base() {
        assert_eq!(band_base(Decimal::new(1754890, 2)), Some(17500));
        assert_eq!(band_base(Decimal::from(17500)), Some(17500));
        assert_eq!(band_base(Decimal::new(4210075, 2)), Some(42100));
    }

    #[test]
    fn test_grid_points() {
        let grid = PriceGrid::new(17500);
        let mut points = grid.points.to_vec();
        points.sort();
        assert_eq!(points, vec![17300, 17400, 17500, 17600, 17700, 17800]);
        assert!(!grid.contains(17200));
        assert!(!grid.contains(17900));
    }

    #[test]
    fn test_select_band_filters_and_classifies() {
        let records = vec![
            record(17200, 5),
            record(17600, -40),
            record(17450, 5),
            record(17300, 12),
            record(17600, 8),
        ];

        let band = select_band(&PriceGrid::new(17500), &records);
        let strikes: Vec<i64> = band.iter().map(|e| e.record.strike).collect();
        assert_eq!(strikes, vec![17600, 17300, 17600]);

        assert_eq!(band[0].activity, WriterActivity::CewExiting);
        assert_eq!(band[1].activity, WriterActivity::CallWriters);
        assert!(band[0].in_range);
        assert!(!band[1].in_range);
    }
}
