use super::config::DAY_LOG_CAPACITY;
use super::cycle::CycleReport;
use super::screener::TradeSignal;
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One line of the running day table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLogRow {
    pub time: DateTime<Local>,
    pub current: Decimal,
    pub call_total: i64,
    pub bias_percent: Option<i64>,
    pub put_total: i64,
}

/// Rolling per-session history kept across refresh cycles.
///
/// Holds the last `capacity` cycles and the first trade signal of the
/// session; later signals do not replace it.
#[derive(Debug, Clone)]
pub struct DayLog {
    rows: VecDeque<DayLogRow>,
    capacity: usize,
    latched_signal: Option<TradeSignal>,
}

impl Default for DayLog {
    fn default() -> Self {
        Self::with_capacity(DAY_LOG_CAPACITY)
    }
}

impl DayLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            rows: VecDeque::with_capacity(capacity),
            capacity,
            latched_signal: None,
        }
    }

    /// Append a cycle. Returns true when its signal is the first of the session.
    pub fn record(&mut self, report: &CycleReport, time: DateTime<Local>) -> bool {
        if self.rows.len() == self.capacity {
            self.rows.pop_front();
        }
        self.rows.push_back(DayLogRow {
            time,
            current: report.session.current,
            call_total: report.bias.totals.call_total,
            bias_percent: report.bias.percent,
            put_total: report.bias.totals.put_total,
        });

        match (&self.latched_signal, &report.signal) {
            (None, Some(signal)) => {
                self.latched_signal = Some(signal.clone());
                true
            }
            _ => false,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &DayLogRow> {
        self.rows.iter()
    }

    pub fn latest(&self) -> Option<&DayLogRow> {
        self.rows.back()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn latched_signal(&self) -> Option<&TradeSignal> {
        self.latched_signal.as_ref()
    }
}
