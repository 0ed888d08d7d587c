use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    /// A required cell exists but does not parse as a number
    #[error("Malformed row {row}: {column} = {value:?}")]
    MalformedRow {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// The row is too short to hold a mapped column
    #[error("Malformed row {row}: missing {column} at column {index}")]
    MissingColumn {
        row: usize,
        column: &'static str,
        index: usize,
    },

    #[error("Gann ladder out of bounds: match index {index} of {len} levels")]
    LadderBounds { index: usize, len: usize },

    #[error("Division by zero: call open interest total is 0")]
    DivisionByZero,

    #[error("Open interest overflow while computing {0}")]
    Overflow(&'static str),

    #[error("Invalid {field}: {value:?}")]
    InvalidPrice { field: &'static str, value: String },
}
