mod datetime;
mod localize;
mod timezone;

pub use datetime::DateTime;
pub use localize::{local_date, local_midnight, next_local_midnight, LocalizeError};
pub use timezone::{Tz, TzOffset};
