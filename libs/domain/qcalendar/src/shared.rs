use std::sync::{Arc, PoisonError, RwLock};

use qchrono::timepoint::DateTime;

use crate::{Calendar, CalendarError};

// -----------------------------------------------------------------------------
// SharedCalendar
// -----------------------------------------------------------------------------
/// Calendar shared between threads, e.g. a scheduler and an admin endpoint.
///
/// Queries take the read lock and [`SharedCalendar::update`] takes the write lock,
/// so readers never observe a half-applied update.
/// Cloning shares the same calendar.
///
/// Calendar methods leave the calendar consistent between calls,
/// hence a lock poisoned by a panicking thread is recovered instead of propagated.
#[derive(Debug, Default)]
pub struct SharedCalendar<C>(Arc<RwLock<C>>);

impl<C> Clone for SharedCalendar<C> {
    #[inline]
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

//
// construction
//
impl<C> SharedCalendar<C> {
    #[inline]
    pub fn new(calendar: C) -> Self {
        Self(Arc::new(RwLock::new(calendar)))
    }
}

impl<C> From<C> for SharedCalendar<C> {
    #[inline]
    fn from(calendar: C) -> Self {
        Self::new(calendar)
    }
}

//
// methods
//
impl<C> SharedCalendar<C> {
    /// Run `f` with the read lock held.
    #[inline]
    pub fn read<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        let guard = self.0.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` with the write lock held.
    #[inline]
    pub fn update<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Copy of the current calendar, detached from later updates.
    #[inline]
    pub fn snapshot(&self) -> C
    where
        C: Clone,
    {
        self.read(C::clone)
    }
}

impl<C: Calendar> Calendar for SharedCalendar<C> {
    #[inline]
    fn is_time_included(&self, instant: &DateTime) -> bool {
        self.read(|cal| cal.is_time_included(instant))
    }

    #[inline]
    fn next_included_time(&self, instant: &DateTime) -> Result<DateTime, CalendarError> {
        self.read(|cal| cal.next_included_time(instant))
    }
}
