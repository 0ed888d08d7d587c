use super::models::Market;
use rust_decimal::Decimal;
use std::time::Duration;

// -----------------------------------------------
// SUPPORTED INDICES
// -----------------------------------------------
pub const SUPPORTED_INDICES: &[Market] = &[Market::Nifty, Market::BankNifty];

// -----------------------------------------------
// STRIKE GRID
// -----------------------------------------------
pub const STRIKE_STEP: i64 = 100;

pub const GRID_SIZE: usize = 6;

/// Offsets from the band base that select the highlighted band.
/// Asymmetric: three steps above, two below.
pub const GRID_OFFSETS: [i64; GRID_SIZE] = [0, 100, 200, 300, -100, -200];

/// Offsets that mark the day's range inside the band
pub const RANGE_OFFSETS: [i64; 3] = [0, 100, 200];

// ATM rounds up once the remainder passes half a step
pub const ATM_ROUND_UP_REMAINDER: i64 = 50;

// -----------------------------------------------
// GANN SQUARE OF NINE
// -----------------------------------------------
pub const GANN_STEPS_PER_ANCHOR: u32 = 8;
pub const GANN_STEP: f64 = 0.125;
pub const GANN_MIN_MATCH_INDEX: usize = 4;
pub const GANN_MAX_MATCH_INDEX: usize = 28;

// -----------------------------------------------
// STRATEGY SCREENER
// -----------------------------------------------
pub const DEFAULT_PERCENTAGE_THRESHOLD: i64 = 5;

// -----------------------------------------------
// RAW TABLE SCHEMA (column positions)
// -----------------------------------------------
pub const COL_CALL_OPEN_INTEREST: usize = 1;
pub const COL_CALL_PREMIUM: usize = 4;
pub const COL_STRIKE: usize = 10;
pub const COL_PUT_PREMIUM: usize = 12;
pub const COL_PUT_OPEN_INTEREST: usize = 19;

// -----------------------------------------------
// REFRESH LOOP
// -----------------------------------------------
pub const DEFAULT_REFRESH_SECS: u64 = 5;
pub const MIN_REFRESH_SECS: u64 = 1;
pub const MAX_REFRESH_SECS: u64 = 300;
pub const DAY_LOG_CAPACITY: usize = 500;

// Cycles slower than this get reported
pub const SLOW_CYCLE_THRESHOLD_MS: u128 = 250;

pub const DEFAULT_SNAPSHOT_PATH: &str = "fixtures/nifty_snapshot.json";

// -----------------------------------------------
// RUNTIME CONFIGURATION
// -----------------------------------------------

/// Get the execution mode from environment or default to a single pass
pub fn get_execution_mode() -> String {
    std::env::var("TRACKER_MODE").unwrap_or_else(|_| "once".to_string())
}

/// Get the snapshot file the fetch layer writes to
pub fn get_snapshot_path() -> String {
    std::env::var("TRACKER_SNAPSHOT").unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string())
}

/// Get the screener threshold; unparseable values fall back to the default
pub fn get_percentage_threshold() -> Decimal {
    std::env::var("TRACKER_THRESHOLD")
        .ok()
        .and_then(|val| val.trim().parse::<Decimal>().ok())
        .filter(|val| !val.is_sign_negative())
        .unwrap_or_else(|| Decimal::from(DEFAULT_PERCENTAGE_THRESHOLD))
}

/// Get the refresh interval for watch mode
pub fn get_refresh_interval() -> Duration {
    let secs = std::env::var("TRACKER_REFRESH_SECS")
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(DEFAULT_REFRESH_SECS);

    Duration::from_secs(secs.clamp(MIN_REFRESH_SECS, MAX_REFRESH_SECS))
}

/// Get the number of watch cycles to run before stopping (None = until Ctrl-C)
pub fn get_max_cycles() -> Option<usize> {
    std::env::var("TRACKER_MAX_CYCLES")
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .filter(|&n| n > 0)
}

/// Maps raw table columns to the fields a strike record needs.
///
/// The options-chain table has a fixed layout; when the source page changes
/// its columns, this is the only place that needs to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub call_open_interest: usize,
    pub call_premium: usize,
    pub strike: usize,
    pub put_premium: usize,
    pub put_open_interest: usize,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            call_open_interest: COL_CALL_OPEN_INTEREST,
            call_premium: COL_CALL_PREMIUM,
            strike: COL_STRIKE,
            put_premium: COL_PUT_PREMIUM,
            put_open_interest: COL_PUT_OPEN_INTEREST,
        }
    }
}

/// Settings the analytical pipeline needs for one cycle
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub columns: ColumnMap,
    pub percentage_threshold: Decimal,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            columns: ColumnMap::default(),
            percentage_threshold: Decimal::from(DEFAULT_PERCENTAGE_THRESHOLD),
        }
    }
}

impl TrackerConfig {
    pub fn from_env() -> Self {
        Self {
            columns: ColumnMap::default(),
            percentage_threshold: get_percentage_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_column_map_covers_schema() {
        let columns = ColumnMap::default();
        assert_eq!(columns.call_premium, 4);
        assert_eq!(columns.strike, 10);
        assert_eq!(columns.put_open_interest, 19);
    }

    #[test]
    fn test_supported_indices_deserialize_from_snapshot_names() {
        for (name, market) in [("NIFTY", Market::Nifty), ("BANKNIFTY", Market::BankNifty)] {
            let parsed: Market = serde_json::from_str(&format!("\"{}\"", name)).unwrap();
            assert_eq!(parsed, market);
            assert!(SUPPORTED_INDICES.contains(&parsed));
        }
    }

    #[test]
    fn test_default_threshold() {
        let config = TrackerConfig::default();
        assert_eq!(config.percentage_threshold, Decimal::from(5));
    }
}
