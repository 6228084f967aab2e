use std::sync::Arc;

use qchrono::timepoint::DateTime;

use crate::CalendarError;

// -----------------------------------------------------------------------------
// Calendar
// -----------------------------------------------------------------------------
/// Contract between a scheduler and an exclusion calendar.
///
/// Implementations answer for the whole chain they head: an instant excluded by
/// any base calendar is excluded by the implementation as well.
pub trait Calendar {
    /// Check if `instant` is included by this calendar and all of its base calendars.
    fn is_time_included(&self, instant: &DateTime) -> bool;

    /// Get the earliest instant at or after `instant` which is included by this calendar
    /// and all of its base calendars.
    ///
    /// # Errors
    /// * [`CalendarError::SearchExhausted`]: When the search gives up, typically because
    ///   every day is excluded by some calendar of the chain.
    /// * [`CalendarError::Localize`]: When a day boundary is out of the supported range.
    fn next_included_time(&self, instant: &DateTime) -> Result<DateTime, CalendarError>;
}

impl<C: Calendar + ?Sized> Calendar for &C {
    #[inline]
    fn is_time_included(&self, instant: &DateTime) -> bool {
        (**self).is_time_included(instant)
    }

    #[inline]
    fn next_included_time(&self, instant: &DateTime) -> Result<DateTime, CalendarError> {
        (**self).next_included_time(instant)
    }
}

impl<C: Calendar + ?Sized> Calendar for Box<C> {
    #[inline]
    fn is_time_included(&self, instant: &DateTime) -> bool {
        (**self).is_time_included(instant)
    }

    #[inline]
    fn next_included_time(&self, instant: &DateTime) -> Result<DateTime, CalendarError> {
        (**self).next_included_time(instant)
    }
}

impl<C: Calendar + ?Sized> Calendar for Arc<C> {
    #[inline]
    fn is_time_included(&self, instant: &DateTime) -> bool {
        (**self).is_time_included(instant)
    }

    #[inline]
    fn next_included_time(&self, instant: &DateTime) -> Result<DateTime, CalendarError> {
        (**self).next_included_time(instant)
    }
}
