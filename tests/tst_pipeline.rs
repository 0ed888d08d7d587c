use chrono::{Local, TimeZone};
use nse_market_tracker::tracker::{
    DayLog, Direction, Market, MarketSnapshot, StrategyShape, TrackerConfig, WriterActivity,
    load_snapshot, run_cycle,
};
use rust_decimal::Decimal;
use std::str::FromStr;

const FIXTURE: &str = "fixtures/nifty_snapshot.json";

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_cycle() {
        let snapshot = load_snapshot(FIXTURE).unwrap();
        let now = Local.with_ymd_and_hms(2026, 10, 18, 11, 42, 7).unwrap();
        let report = run_cycle(&snapshot, &TrackerConfig::default(), now).unwrap();

        assert_eq!(report.market, Market::Nifty);
        assert_eq!(report.week, 3);
        assert_eq!(report.rows_total, 9);
        assert_eq!(report.rows_dropped, 1);

        // Session and VIX
        assert_eq!(report.session.change_percent, Some(dec("-0.16")));
        assert_eq!(report.session.direction, Direction::Down);
        let vix = report.vix.as_ref().unwrap();
        assert_eq!(vix.change_percent, Some(dec("-4")));

        // Ladder around 17548.90
        let ladder = report.ladder.as_ref().unwrap();
        assert_eq!(ladder.resistance(1), Some(17556.25));
        assert_eq!(ladder.support(1), Some(17523.140625));

        // Band: 17200 and 17900 fall outside the grid, 17650 was malformed
        assert_eq!(report.band_base, 17500);
        let strikes: Vec<i64> = report.band.iter().map(|e| e.record.strike).collect();
        assert_eq!(strikes, vec![17300, 17400, 17500, 17600, 17700, 17800]);

        let in_range: Vec<i64> = report
            .band
            .iter()
            .filter(|e| e.in_range)
            .map(|e| e.record.strike)
            .collect();
        assert_eq!(in_range, vec![17500, 17600, 17700]);
        assert_eq!(report.band[1].activity, WriterActivity::CewExiting);
        assert_eq!(report.band[2].activity, WriterActivity::CallWriters);

        // Bias over the band
        assert_eq!(report.bias.totals.call_total, 814_325);
        assert_eq!(report.bias.totals.put_total, 915_000);
        assert_eq!(report.bias.percent, Some(12));

        // Straddle 120 / 95 is too wide; 17600 CE 80.40 vs 17400 PE 78.15 is not
        assert_eq!(report.atm_strike, 17500);
        let signal = report.signal.as_ref().unwrap();
        assert_eq!(signal.shape, StrategyShape::NearStrangle);
        assert_eq!(signal.call_premium, dec("80.40"));
        assert_eq!(signal.put_premium, dec("78.15"));
        assert_eq!(signal.premium_gap_percent, dec("2.88"));
        assert_eq!(signal.timestamp, now);
    }

    #[test]
    fn test_same_snapshot_same_report() {
        let snapshot = load_snapshot(FIXTURE).unwrap();
        let now = Local::now();
        let config = TrackerConfig::default();

        let first = run_cycle(&snapshot, &config, now).unwrap();
        let second = run_cycle(&snapshot, &config, now).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_rows() {
        let snapshot = MarketSnapshot {
            market: Market::BankNifty,
            timestamp: "18-Oct-2026 09:15:00".to_string(),
            open: "42,100.75".to_string(),
            current: "42,180.00".to_string(),
            vix: None,
            rows: Vec::new(),
        };

        let report = run_cycle(&snapshot, &TrackerConfig::default(), Local::now()).unwrap();
        assert!(report.band.is_empty());
        assert_eq!(report.bias.percent, None);
        assert_eq!(report.signal, None);
        assert_eq!(report.atm_strike, 42200);
    }

    #[test]
    fn test_stricter_threshold_suppresses_signal() {
        let snapshot = load_snapshot(FIXTURE).unwrap();
        let config = TrackerConfig {
            percentage_threshold: dec("2.5"),
            ..TrackerConfig::default()
        };

        let report = run_cycle(&snapshot, &config, Local::now()).unwrap();
        // Far strangle: 17700 CE 47.20 vs 17300 PE 33.85 is ~39% apart
        assert_eq!(report.signal, None);
    }

    #[test]
    fn test_day_log_latches_first_signal() {
        let snapshot = load_snapshot(FIXTURE).unwrap();
        let config = TrackerConfig::default();
        let mut day_log = DayLog::with_capacity(2);

        let first = run_cycle(&snapshot, &config, Local::now()).unwrap();
        assert!(day_log.record(&first, Local::now()));

        let second = run_cycle(&snapshot, &config, Local::now()).unwrap();
        assert!(!day_log.record(&second, Local::now()));
        assert!(!day_log.record(&second, Local::now()));

        assert_eq!(day_log.len(), 2);
        assert_eq!(day_log.latched_signal(), first.signal.as_ref());

        let row = day_log.latest().unwrap();
        assert_eq!(row.current, dec("17520.35"));
        assert_eq!(row.bias_percent, Some(12));
    }

    #[test]
    fn test_snapshot_accepts_source_aliases() {
        let json = r#"{
            "market": "Bank NIFTY",
            "timestamp": "18-Oct-2026 10:00:00",
            "open": "42,100.75",
            "ltp": "42,050.10",
            "rows": []
        }"#;

        let snapshot: MarketSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.market, Market::BankNifty);
        assert_eq!(snapshot.current, "42,050.10");
        assert!(snapshot.vix.is_none());
    }
}
