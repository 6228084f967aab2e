use qchrono::timepoint::{DateTime, LocalizeError};

// -----------------------------------------------------------------------------
// CalendarError
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("The base calendar chain has {depth} calendars, which exceeds the limit {max}")]
    BaseChainTooDeep { depth: usize, max: usize },
    #[error("No included time is found from {from} within {limit} steps. All days seem to be excluded")]
    SearchExhausted { from: DateTime, limit: usize },
    #[error("Invalid month-day: month={month}, day={day}")]
    InvalidMonthDay { month: u32, day: u32 },
    #[error(transparent)]
    Localize(#[from] LocalizeError),
}

impl CalendarError {
    /// Whether the error comes from how calendars are configured,
    /// as opposed to a malformed argument.
    #[inline]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CalendarError::BaseChainTooDeep { .. } | CalendarError::SearchExhausted { .. }
        )
    }
}
