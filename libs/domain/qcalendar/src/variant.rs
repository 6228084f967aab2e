use qchrono::timepoint::{DateTime, Tz};

use crate::{AnnualCalendar, Calendar, CalendarError};

// -----------------------------------------------------------------------------
// CalendarVariant
// -----------------------------------------------------------------------------
/// Closed set of calendars which can be used as a base calendar or loaded from a file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalendarVariant {
    Annual(AnnualCalendar),
}

//
// construction
//
impl From<AnnualCalendar> for CalendarVariant {
    #[inline]
    fn from(cal: AnnualCalendar) -> Self {
        CalendarVariant::Annual(cal)
    }
}

//
// methods
//
impl CalendarVariant {
    #[inline]
    pub fn base(&self) -> Option<&CalendarVariant> {
        match self {
            CalendarVariant::Annual(cal) => cal.base(),
        }
    }

    /// Number of calendars in the base chain below this calendar.
    #[inline]
    pub fn chain_len(&self) -> usize {
        match self {
            CalendarVariant::Annual(cal) => cal.chain_len(),
        }
    }

    #[inline]
    pub fn timezone(&self) -> &Tz {
        match self {
            CalendarVariant::Annual(cal) => cal.timezone(),
        }
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        match self {
            CalendarVariant::Annual(cal) => cal.description(),
        }
    }
}

impl Calendar for CalendarVariant {
    #[inline]
    fn is_time_included(&self, instant: &DateTime) -> bool {
        match self {
            CalendarVariant::Annual(cal) => cal.is_time_included(instant),
        }
    }

    #[inline]
    fn next_included_time(&self, instant: &DateTime) -> Result<DateTime, CalendarError> {
        match self {
            CalendarVariant::Annual(cal) => cal.next_included_time(instant),
        }
    }
}
