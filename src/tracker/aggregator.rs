use super::band::BandEntry;
use super::error::TrackerError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenInterestTotals {
    pub call_total: i64,
    pub put_total: i64,
}

impl OpenInterestTotals {
    /// Put-over-call bias, in whole percent truncated toward zero.
    /// Scaled before dividing so 1000 call / 1200 put reads 20, not 0.
    pub fn bias_percent(&self) -> Result<i64, TrackerError> {
        if self.call_total == 0 {
            return Err(TrackerError::DivisionByZero);
        }
        self.put_total
            .checked_sub(self.call_total)
            .and_then(|delta| delta.checked_mul(100))
            .and_then(|scaled| scaled.checked_div(self.call_total))
            .ok_or(TrackerError::Overflow("bias"))
    }
}

/// Sum open interest across the highlighted band
pub fn aggregate_open_interest(band: &[BandEntry]) -> Result<OpenInterestTotals, TrackerError> {
    band.iter().try_fold(OpenInterestTotals::default(), |acc, entry| {
        Ok(OpenInterestTotals {
            call_total: acc
                .call_total
                .checked_add(entry.record.call_open_interest)
                .ok_or(TrackerError::Overflow("call total"))?,
            put_total: acc
                .put_total
                .checked_add(entry.record.put_open_interest)
                .ok_or(TrackerError::Overflow("put total"))?,
        })
    })
}

/// Directional bias over the band; `None` marks it undefined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiasReading {
    #[serde(flatten)]
    pub totals: OpenInterestTotals,
    pub percent: Option<i64>,
}

impl BiasReading {
    pub fn from_band(band: &[BandEntry]) -> Self {
        match aggregate_open_interest(band) {
            Ok(totals) => Self {
                totals,
                percent: totals.bias_percent().ok(),
            },
            // Totals stay displayable, pinned at the i64 limits
            Err(_) => Self {
                totals: band.iter().fold(OpenInterestTotals::default(), |acc, entry| {
                    OpenInterestTotals {
                        call_total: acc.call_total.saturating_add(entry.record.call_open_interest),
                        put_total: acc.put_total.saturating_add(entry.record.put_open_interest),
                    }
                }),
                percent: None,
            },
        }
    }
}
