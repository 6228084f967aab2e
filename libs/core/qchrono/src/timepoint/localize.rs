use chrono::{Days, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone};

use super::{DateTime, Tz};

// -----------------------------------------------------------------------------
// LocalizeError
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum LocalizeError {
    #[error("The day boundary of {date} is out of the supported range")]
    OutOfRange { date: NaiveDate },
}

// -----------------------------------------------------------------------------
// local_date
// local_midnight
// next_local_midnight
// -----------------------------------------------------------------------------
/// The date `instant` falls on, as read on the wall clock of `tz`.
///
/// The offset is looked up for this very instant, so two instants a few hours apart
/// can map through different offsets around a daylight saving transition.
///
/// ```
/// use chrono::NaiveDate;
/// use qchrono::timepoint::{local_date, DateTime, Tz};
///
/// let instant: DateTime = "2012-11-05T00:00:00-04:00".parse().unwrap();
/// let tz: Tz = "America/New_York".parse().unwrap();
///
/// assert_eq!(local_date(&instant, &tz), NaiveDate::from_ymd_opt(2012, 11, 4).unwrap());
/// ```
#[inline]
pub fn local_date(instant: &DateTime, tz: &Tz) -> NaiveDate {
    instant.inner.with_timezone(tz).date_naive()
}

/// The first instant of `date` on the wall clock of `tz`.
///
/// Usually this is 00:00 local time. When the clock is set back across midnight,
/// the earlier of the two midnights is returned. When the clock jumps over midnight,
/// the transition instant is returned, which is the first instant whose local date is `date`.
pub fn local_midnight(date: NaiveDate, tz: &Tz) -> Result<DateTime, LocalizeError> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        chrono::LocalResult::Single(dt) => Ok(dt.into()),
        chrono::LocalResult::Ambiguous(earliest, _) => Ok(earliest.into()),
        chrono::LocalResult::None => {
            // offset in effect before the gap
            let before = date
                .checked_sub_days(Days::new(1))
                .ok_or(LocalizeError::OutOfRange { date })?
                .and_time(NaiveTime::MIN);
            let offset = tz.offset_from_utc_datetime(&before).fix();
            let utc = midnight
                .checked_sub_signed(TimeDelta::seconds(offset.local_minus_utc() as i64))
                .ok_or(LocalizeError::OutOfRange { date })?;
            Ok(tz.from_utc_datetime(&utc).into())
        }
    }
}

/// The first instant of the local day following the one `instant` falls on in `tz`.
#[inline]
pub fn next_local_midnight(instant: &DateTime, tz: &Tz) -> Result<DateTime, LocalizeError> {
    let date = local_date(instant, tz);
    let next = date
        .succ_opt()
        .ok_or(LocalizeError::OutOfRange { date })?;
    local_midnight(next, tz)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dt(s: &str) -> DateTime {
        DateTime::from_str(s).unwrap()
    }

    fn tz(s: &str) -> Tz {
        Tz::from_str(s).unwrap()
    }

    #[rstest]
    #[case::edt_late_evening("2012-11-05T00:00:00-04:00", "Eastern Standard Time", ymd(2012, 11, 4))]
    #[case::est_next_day("2012-11-06T00:00:00-04:00", "Eastern Standard Time", ymd(2012, 11, 5))]
    #[case::utc("2012-11-05T00:00:00-04:00", "Z", ymd(2012, 11, 5))]
    #[case::tokyo("2012-11-04T15:00:00Z", "Asia/Tokyo", ymd(2012, 11, 5))]
    #[case::tokyo_before_midnight("2012-11-04T14:59:59Z", "Asia/Tokyo", ymd(2012, 11, 4))]
    #[case::kathmandu("2024-01-01T18:15:00Z", "Asia/Kathmandu", ymd(2024, 1, 2))]
    #[case::kathmandu_before("2024-01-01T18:14:59Z", "Asia/Kathmandu", ymd(2024, 1, 1))]
    #[case::fixed_half_hour("2024-01-01T20:00:00Z", "-04:30", ymd(2024, 1, 1))]
    fn test_local_date(#[case] instant: &str, #[case] zone: &str, #[case] expected: NaiveDate) {
        let tested = local_date(&dt(instant), &tz(zone));

        assert_eq!(tested, expected);
    }

    #[rstest]
    #[case::edt(ymd(2012, 11, 4), "America/New_York", "2012-11-04T04:00:00Z")]
    #[case::est(ymd(2012, 11, 5), "America/New_York", "2012-11-05T05:00:00Z")]
    #[case::spring_forward_day(ymd(2012, 3, 11), "America/New_York", "2012-03-11T05:00:00Z")]
    #[case::after_spring_forward(ymd(2012, 3, 12), "America/New_York", "2012-03-12T04:00:00Z")]
    #[case::kathmandu(ymd(2024, 1, 2), "Asia/Kathmandu", "2024-01-01T18:15:00Z")]
    #[case::utc(ymd(2024, 1, 2), "Z", "2024-01-02T00:00:00Z")]
    #[case::fixed(ymd(2024, 1, 2), "+09:00", "2024-01-01T15:00:00Z")]
    #[case::midnight_skipped(ymd(2018, 11, 4), "America/Sao_Paulo", "2018-11-04T03:00:00Z")]
    fn test_local_midnight(#[case] date: NaiveDate, #[case] zone: &str, #[case] expected: &str) {
        let tested = local_midnight(date, &tz(zone)).unwrap();

        assert_eq!(tested, dt(expected));
        assert_eq!(tested.timezone(), tz(zone));
        assert_eq!(local_date(&tested, &tz(zone)), date);
    }

    #[test]
    fn test_next_local_midnight_out_of_range() {
        let last_day = local_midnight(NaiveDate::MAX, &Tz::Utc).unwrap();

        let tested = next_local_midnight(&last_day, &Tz::Utc);

        assert_eq!(
            tested,
            Err(LocalizeError::OutOfRange {
                date: NaiveDate::MAX
            })
        );
    }

    #[rstest]
    #[case::across_fall_back(
        "2012-11-05T00:00:00-04:00",
        "Eastern Standard Time",
        "2012-11-05T00:00:00-05:00"
    )]
    #[case::same_offset("2012-11-05T12:00:00-05:00", "America/New_York", "2012-11-06T00:00:00-05:00")]
    #[case::at_midnight("2012-11-05T05:00:00Z", "America/New_York", "2012-11-06T05:00:00Z")]
    #[case::utc("2012-11-05T23:59:59Z", "Z", "2012-11-06T00:00:00Z")]
    fn test_next_local_midnight(#[case] instant: &str, #[case] zone: &str, #[case] expected: &str) {
        let tested = next_local_midnight(&dt(instant), &tz(zone)).unwrap();

        assert_eq!(tested, dt(expected));
    }
}
