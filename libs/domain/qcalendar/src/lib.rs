//! Exclusion calendars consulted by a job scheduler.
//!
//! A calendar answers two questions about an instant: is it included, and if not,
//! when is the next included instant. Calendars chain through an optional base calendar,
//! and an instant is included only when every calendar in the chain includes it.
#[cfg(test)]
#[allow(clippy::single_component_path_imports)]
use rstest_reuse;

mod annual;
mod base;
mod error;
mod excluded;
mod month_day;
mod shared;
mod traits;
mod variant;

pub use annual::{AnnualCalendar, AnnualCalendarBuilder};
pub use base::{BaseCalendar, MAX_BASE_DEPTH, MAX_SEARCH_ROUNDS};
pub use error::CalendarError;
pub use excluded::ExcludedDays;
pub use month_day::MonthDay;
pub use shared::SharedCalendar;
pub use traits::Calendar;
pub use variant::CalendarVariant;
