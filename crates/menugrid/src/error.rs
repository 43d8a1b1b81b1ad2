use menugrid_core::GridError;
use menugrid_parse::DecodeError;
use thiserror::Error;

/// Errors returned by [`MenuParser`](crate::MenuParser) queries.
#[derive(Debug, Clone, Error)]
pub enum MenuError {
    /// The document could not be read or decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The page layout does not match the profile's grid.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// The meal token is neither `lunch` nor `dinner`.
    #[error("invalid meal period {0:?}: expected \"lunch\" or \"dinner\"")]
    InvalidMealPeriod(String),

    /// The day index has no column in the grid.
    #[error("day {day} is out of range: the grid has {days} day columns")]
    DayOutOfRange { day: usize, days: usize },
}
