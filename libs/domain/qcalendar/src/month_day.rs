use std::{fmt::Display, str::FromStr};

use anyhow::Context;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use qchrono::timepoint::{local_date, DateTime, Tz};
use schemars::schema::SchemaObject;

use crate::CalendarError;

/// Leap year used to validate month-day pairs, so that `--02-29` is accepted.
const REFERENCE_YEAR: i32 = 2000;

// -----------------------------------------------------------------------------
// MonthDay
// -----------------------------------------------------------------------------
/// A day of the year without the year, e.g. January 1st.
///
/// Dates of any year reduce to the same [`MonthDay`], which is what makes annual
/// exclusions independent of the year they were registered with.
/// February 29th is a valid [`MonthDay`] and only matches dates in leap years.
///
/// ```
/// use chrono::NaiveDate;
/// use qcalendar::MonthDay;
///
/// let md = MonthDay::of(NaiveDate::from_ymd_opt(2005, 1, 20).unwrap());
///
/// assert_eq!(md, MonthDay::new(1, 20).unwrap());
/// assert_eq!(md, MonthDay::of(NaiveDate::from_ymd_opt(2105, 1, 20).unwrap()));
/// assert_eq!(md.to_string(), "--01-20");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

//
// construction
//
impl MonthDay {
    /// Create a new [`MonthDay`].
    ///
    /// # Errors
    /// [`CalendarError::InvalidMonthDay`] if the pair is not a day of a leap year.
    pub fn new(month: u32, day: u32) -> Result<Self, CalendarError> {
        NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day)
            .map(Self::of)
            .ok_or(CalendarError::InvalidMonthDay { month, day })
    }

    /// Drop the year (and the time of day, if any) of `date`.
    #[inline]
    pub fn of<D: Datelike>(date: D) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    /// The day `instant` falls on, as read on the wall clock of `tz`.
    #[inline]
    pub fn local_to(instant: &DateTime, tz: &Tz) -> Self {
        Self::of(local_date(instant, tz))
    }
}

impl From<NaiveDate> for MonthDay {
    #[inline]
    fn from(date: NaiveDate) -> Self {
        Self::of(date)
    }
}

impl From<NaiveDateTime> for MonthDay {
    #[inline]
    fn from(dt: NaiveDateTime) -> Self {
        Self::of(dt)
    }
}

//
// methods
//
impl MonthDay {
    #[inline]
    pub fn month(&self) -> u32 {
        self.month
    }

    #[inline]
    pub fn day(&self) -> u32 {
        self.day
    }
}

//
// ser/de
//
impl Display for MonthDay {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "--{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((month, day)) = s.strip_prefix("--").and_then(|s| s.split_once('-')) else {
            anyhow::bail!("Invalid month-day({}). '--MM-DD' is expected", s);
        };
        let is_two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
        if !is_two_digits(month) || !is_two_digits(day) {
            anyhow::bail!("Invalid month-day({}). '--MM-DD' is expected", s);
        }
        let month = month
            .parse()
            .with_context(|| format!("parse month of '{}'", s))?;
        let day = day.parse().with_context(|| format!("parse day of '{}'", s))?;
        Ok(Self::new(month, day)?)
    }
}

impl serde::Serialize for MonthDay {
    #[inline]
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for MonthDay {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        MonthDay::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl schemars::JsonSchema for MonthDay {
    fn schema_name() -> String {
        "MonthDay".to_string()
    }
    fn schema_id() -> std::borrow::Cow<'static, str> {
        "qcalendar::MonthDay".into()
    }

    fn json_schema(_: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        let mut sch = SchemaObject {
            instance_type: Some(schemars::schema::InstanceType::String.into()),
            ..Default::default()
        };
        sch.metadata().description =
            Some("Day of the year in ISO 8601 month-day format(e.g. '--01-20')".to_string());
        sch.string().pattern = Some(r"^--\d{2}-\d{2}$".to_string());
        sch.into()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case::jan_first(1, 1, true)]
    #[case::dec_last(12, 31, true)]
    #[case::leap_day(2, 29, true)]
    #[case::feb_30(2, 30, false)]
    #[case::apr_31(4, 31, false)]
    #[case::month_zero(0, 1, false)]
    #[case::month_13(13, 1, false)]
    #[case::day_zero(1, 0, false)]
    fn test_new(#[case] month: u32, #[case] day: u32, #[case] ok: bool) {
        let tested = MonthDay::new(month, day);

        match ok {
            true => {
                let md = tested.unwrap();
                assert_eq!((md.month(), md.day()), (month, day));
            }
            false => assert_eq!(tested, Err(CalendarError::InvalidMonthDay { month, day })),
        }
    }

    #[rstest]
    fn test_of_ignores_year(#[values(-2, 0, 2, 100)] years: i32) {
        let base = ymd(2005, 1, 1);
        let shifted = ymd(2005 + years, 1, 1);

        assert_eq!(MonthDay::of(base), MonthDay::of(shifted));
    }

    #[test]
    fn test_of_ignores_time() {
        let dt = ymd(2005, 1, 20).and_hms_opt(10, 5, 15).unwrap();

        assert_eq!(MonthDay::from(dt), MonthDay::new(1, 20).unwrap());
    }

    #[rstest]
    #[case::edt_evening("2012-11-05T00:00:00-04:00", "America/New_York", (11, 4))]
    #[case::utc("2012-11-05T00:00:00-04:00", "Z", (11, 5))]
    #[case::tokyo("2012-12-31T15:00:00Z", "Asia/Tokyo", (1, 1))]
    fn test_local_to(#[case] instant: &str, #[case] tz: &str, #[case] expected: (u32, u32)) {
        let instant: DateTime = instant.parse().unwrap();
        let tz: Tz = tz.parse().unwrap();

        let tested = MonthDay::local_to(&instant, &tz);

        assert_eq!(tested, MonthDay::new(expected.0, expected.1).unwrap());
    }

    #[test]
    fn test_ord() {
        let mut days = vec![
            MonthDay::new(12, 1).unwrap(),
            MonthDay::new(1, 31).unwrap(),
            MonthDay::new(2, 1).unwrap(),
        ];
        days.sort();

        assert_eq!(
            days,
            vec![
                MonthDay::new(1, 31).unwrap(),
                MonthDay::new(2, 1).unwrap(),
                MonthDay::new(12, 1).unwrap(),
            ]
        );
    }

    #[rstest]
    #[case::ok("--01-20", Some((1, 20)))]
    #[case::ok("--02-29", Some((2, 29)))]
    #[case::ok("--12-31", Some((12, 31)))]
    #[case::invalid_day("--02-30", None)]
    #[case::invalid_month("--13-01", None)]
    #[case::no_prefix("01-20", None)]
    #[case::single_digit("--1-20", None)]
    #[case::with_year("2005-01-20", None)]
    #[case::non_number("--ab-cd", None)]
    #[case::signed("--+1-20", None)]
    #[case::empty("", None)]
    fn test_from_str(#[case] s: &str, #[case] expected: Option<(u32, u32)>) {
        let tested = MonthDay::from_str(s).ok();

        assert_eq!(tested, expected.map(|(m, d)| MonthDay::new(m, d).unwrap()));
    }

    #[rstest]
    #[case(1, 20, "--01-20")]
    #[case(2, 29, "--02-29")]
    #[case(11, 4, "--11-04")]
    fn test_to_string(#[case] month: u32, #[case] day: u32, #[case] expected: &str) {
        let md = MonthDay::new(month, day).unwrap();

        assert_eq!(md.to_string(), expected);
    }

    #[test]
    fn test_serde() {
        let md = MonthDay::new(11, 4).unwrap();

        let json = serde_json::to_value(md).unwrap();
        let de: MonthDay = serde_json::from_value(json.clone()).unwrap();

        assert_eq!(json, serde_json::json!("--11-04"));
        assert_eq!(de, md);
        assert!(serde_json::from_value::<MonthDay>(serde_json::json!("--02-30")).is_err());
    }
}
