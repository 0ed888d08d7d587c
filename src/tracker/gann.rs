use super::config::{GANN_MAX_MATCH_INDEX, GANN_MIN_MATCH_INDEX, GANN_STEP, GANN_STEPS_PER_ANCHOR};
use super::error::TrackerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Position of a level within the ladder
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GannLabel {
    Resistance4,
    Resistance3,
    Resistance2,
    Resistance1,
    Open,
    Support1,
    Support2,
    Support3,
    Support4,
}

impl fmt::Display for GannLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            GannLabel::Resistance4 => "Resistance 4",
            GannLabel::Resistance3 => "Resistance 3",
            GannLabel::Resistance2 => "Resistance 2",
            GannLabel::Resistance1 => "Resistance 1",
            GannLabel::Open => "Open",
            GannLabel::Support1 => "Support 1",
            GannLabel::Support2 => "Support 2",
            GannLabel::Support3 => "Support 3",
            GannLabel::Support4 => "Support 4",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GannLevel {
    pub label: GannLabel,
    pub price: f64,
}

/// Nine support/resistance levels, highest first with the open in the middle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GannLadder {
    pub levels: [GannLevel; 9],
}

impl GannLadder {
    pub fn open(&self) -> f64 {
        self.levels[4].price
    }

    /// Resistance `n` (1 nearest the open, 4 furthest)
    pub fn resistance(&self, n: usize) -> Option<f64> {
        (1..=4).contains(&n).then(|| self.levels[4 - n].price)
    }

    /// Support `n` (1 nearest the open, 4 furthest)
    pub fn support(&self, n: usize) -> Option<f64> {
        (1..=4).contains(&n).then(|| self.levels[4 + n].price)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GannLevel> {
        self.levels.iter()
    }
}

/// Square-of-nine candidate levels around `open`.
///
/// Seed is `(r - 1)²` where `r = round(sqrt(open))`, followed by eight
/// eighth-steps above each of the anchors `r - 1 ..= r + 2`: 33 levels.
pub fn square_of_nine_levels(open: f64) -> Vec<f64> {
    let root = open.sqrt().round();
    let first_anchor = root - 1.0;

    let mut levels = Vec::with_capacity(1 + 4 * GANN_STEPS_PER_ANCHOR as usize);
    levels.push(first_anchor * first_anchor);

    for anchor in [first_anchor, root, root + 1.0, root + 2.0] {
        for k in 1..=GANN_STEPS_PER_ANCHOR {
            let step = anchor + f64::from(k) * GANN_STEP;
            levels.push(step * step);
        }
    }

    levels
}

/// Compute the ladder bracketing the session open
pub fn compute_ladder(open: f64) -> Result<GannLadder, TrackerError> {
    if !open.is_finite() || open <= 0.0 {
        return Err(TrackerError::InvalidPrice {
            field: "open",
            value: open.to_string(),
        });
    }

    let levels = square_of_nine_levels(open);
    let len = levels.len();

    // First level strictly above the open
    let idx = levels
        .iter()
        .position(|&level| open < level)
        .ok_or(TrackerError::LadderBounds { index: len, len })?;

    if !(GANN_MIN_MATCH_INDEX..=GANN_MAX_MATCH_INDEX).contains(&idx) {
        return Err(TrackerError::LadderBounds { index: idx, len });
    }

    debug!(open, index = idx, "Gann scan matched");

    let level = |label, price| GannLevel { label, price };

    Ok(GannLadder {
        levels: [
            level(GannLabel::Resistance4, levels[idx + 3]),
            level(GannLabel::Resistance3, levels[idx + 2]),
            level(GannLabel::Resistance2, levels[idx + 1]),
            level(GannLabel::Resistance1, levels[idx]),
            level(GannLabel::Open, open),
            level(GannLabel::Support1, levels[idx - 1]),
            level(GannLabel::Support2, levels[idx - 2]),
            level(GannLabel::Support3, levels[idx - 3]),
            level(GannLabel::Support4, levels[idx - 4]),
        ],
    })
}
