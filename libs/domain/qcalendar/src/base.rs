use qchrono::timepoint::{DateTime, Tz};

use crate::{Calendar, CalendarError, CalendarVariant};

/// Max number of calendars a base chain may hold below a calendar.
pub const MAX_BASE_DEPTH: usize = 16;

/// Max rounds in which a calendar and its base chain try to agree on a next included time.
///
/// Each round moves the candidate forward to a later day boundary of some calendar
/// in the chain. Eight years of days cover the longest gap between two February 29ths.
pub const MAX_SEARCH_ROUNDS: usize = 8 * 366;

// -----------------------------------------------------------------------------
// BaseCalendar
// -----------------------------------------------------------------------------
/// State and delegation logic shared by concrete calendars.
///
/// This holds the optional base calendar, the time zone in which the calendar
/// evaluates its own exclusions, and a free-form description.
///
/// The base calendar is owned. Cloning a calendar deep-copies its chain,
/// hence detaching or modifying the base of a clone never affects the original.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseCalendar {
    base: Option<Box<CalendarVariant>>,
    time_zone: Tz,
    description: Option<String>,
}

//
// construction
//
impl BaseCalendar {
    #[inline]
    pub fn new(time_zone: Tz) -> Self {
        Self {
            base: None,
            time_zone,
            description: None,
        }
    }
}

//
// methods
//
impl BaseCalendar {
    #[inline]
    pub fn base(&self) -> Option<&CalendarVariant> {
        self.base.as_deref()
    }

    /// Edit the base calendar in place. Returns `Ok(None)` when there is no base.
    ///
    /// The whole chain below this calendar is checked after `f` returns, so the limit
    /// also holds for bases assigned to calendars deeper in the chain.
    ///
    /// # Errors
    /// * [`CalendarError::BaseChainTooDeep`]: When the edited chain holds more than
    ///   [`MAX_BASE_DEPTH`] calendars.
    /// * Errors returned by `f`.
    ///
    /// The base is restored to its state before the call on any error.
    pub fn update_base<F, R>(&mut self, f: F) -> Result<Option<R>, CalendarError>
    where
        F: FnOnce(&mut CalendarVariant) -> Result<R, CalendarError>,
    {
        let Some(base) = self.base.as_deref_mut() else {
            return Ok(None);
        };
        let backup = base.clone();
        let res = f(&mut *base).and_then(|res| {
            let depth = 1 + base.chain_len();
            match depth <= MAX_BASE_DEPTH {
                true => Ok(res),
                false => Err(CalendarError::BaseChainTooDeep {
                    depth,
                    max: MAX_BASE_DEPTH,
                }),
            }
        });
        if res.is_err() {
            *base = backup;
        }
        res.map(Some)
    }

    /// Detach the base calendar and return it.
    #[inline]
    pub fn take_base(&mut self) -> Option<CalendarVariant> {
        self.base.take().map(|b| *b)
    }

    /// Replace the base calendar. `None` detaches the current one.
    ///
    /// # Errors
    /// * [`CalendarError::BaseChainTooDeep`]: When the chain below this calendar would hold
    ///   more than [`MAX_BASE_DEPTH`] calendars. The current base is kept in this case.
    pub fn set_base(&mut self, base: Option<CalendarVariant>) -> Result<(), CalendarError> {
        if let Some(base) = &base {
            let depth = 1 + base.chain_len();
            if MAX_BASE_DEPTH < depth {
                return Err(CalendarError::BaseChainTooDeep {
                    depth,
                    max: MAX_BASE_DEPTH,
                });
            }
        }
        self.base = base.map(Box::new);
        Ok(())
    }

    /// Number of calendars in the base chain below this calendar.
    #[inline]
    pub fn chain_len(&self) -> usize {
        std::iter::successors(self.base(), |cal| cal.base()).count()
    }

    #[inline]
    pub fn timezone(&self) -> &Tz {
        &self.time_zone
    }

    #[inline]
    pub fn set_timezone(&mut self, time_zone: Tz) {
        self.time_zone = time_zone;
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[inline]
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    #[inline]
    pub fn clear_description(&mut self) {
        self.description = None;
    }

    /// Check `instant` against the base chain. Without a base, every instant is included.
    #[inline]
    pub fn is_time_included_by_base(&self, instant: &DateTime) -> bool {
        self.base()
            .map_or(true, |base| base.is_time_included(instant))
    }

    /// Intersect the own search of a calendar with its base chain.
    ///
    /// `own` must return the earliest instant at or after its argument which the calendar
    /// itself includes. The candidate found by `own` is handed to the base chain, and the
    /// answer of the chain is handed back to `own`, until both agree.
    ///
    /// # Errors
    /// * [`CalendarError::SearchExhausted`]: When no agreement is reached within
    ///   [`MAX_SEARCH_ROUNDS`] rounds.
    /// * Errors from `own` or the base chain are propagated as they are.
    pub fn next_included_time_with<F>(
        &self,
        instant: &DateTime,
        own: F,
    ) -> Result<DateTime, CalendarError>
    where
        F: Fn(&DateTime) -> Result<DateTime, CalendarError>,
    {
        let mut candidate = own(instant)?;
        let Some(base) = self.base() else {
            return Ok(candidate);
        };
        for round in 0..MAX_SEARCH_ROUNDS {
            let by_base = base.next_included_time(&candidate)?;
            if by_base == candidate {
                return Ok(candidate);
            }
            log::trace!("round {round}: base calendar moved {candidate} to {by_base}");
            candidate = own(&by_base)?;
            if candidate == by_base {
                return Ok(candidate);
            }
        }
        log::warn!(
            "gave up searching next included time from {instant} after {MAX_SEARCH_ROUNDS} rounds"
        );
        Err(CalendarError::SearchExhausted {
            from: instant.clone(),
            limit: MAX_SEARCH_ROUNDS,
        })
    }
}
