use std::{fmt::Display, str::FromStr, sync::OnceLock};

use anyhow::Context;
use chrono::{NaiveDate, TimeDelta};
use derivative::Derivative;
use schemars::schema::SchemaObject;
use serde::{Deserialize, Serialize};

use crate::timepoint::Tz;

// -----------------------------------------------------------------------------
// DateTime
// -----------------------------------------------------------------------------
/// An absolute instant together with the [`Tz`] it is presented in.
///
/// Comparison and hashing only look at the instant, so the same point in time
/// presented in two different zones compares equal.
///
/// ```
/// use qchrono::timepoint::DateTime;
///
/// let edt: DateTime = "2012-11-05T00:00:00-04:00".parse().unwrap();
/// let utc: DateTime = "2012-11-05T04:00:00Z".parse().unwrap();
///
/// assert_eq!(edt, utc);
/// ```
#[derive(Derivative, Clone)]
#[derivative(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTime {
    pub(crate) inner: chrono::DateTime<Tz>,
    #[cfg(debug_assertions)]
    #[derivative(
        Debug = "ignore",
        PartialEq = "ignore",
        PartialOrd = "ignore",
        Ord = "ignore"
    )]
    #[allow(dead_code)] // shown in debuggers only
    pub(crate) debug_str: String,
}

impl std::hash::Hash for DateTime {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

//
// conversion
//
impl From<DateTime> for chrono::DateTime<Tz> {
    #[inline]
    fn from(dt: DateTime) -> chrono::DateTime<Tz> {
        dt.inner
    }
}
impl From<chrono::DateTime<Tz>> for DateTime {
    #[inline]
    fn from(inner: chrono::DateTime<Tz>) -> Self {
        #[cfg(debug_assertions)]
        let debug_str = inner.to_rfc3339();

        #[cfg(debug_assertions)]
        return DateTime { inner, debug_str };

        #[cfg(not(debug_assertions))]
        return DateTime { inner };
    }
}
impl From<chrono::DateTime<chrono::Utc>> for DateTime {
    #[inline]
    fn from(inner: chrono::DateTime<chrono::Utc>) -> Self {
        inner.with_timezone(&Tz::Utc).into()
    }
}
impl From<chrono::DateTime<chrono::FixedOffset>> for DateTime {
    #[inline]
    fn from(inner: chrono::DateTime<chrono::FixedOffset>) -> Self {
        inner
            .with_timezone(&Tz::FixedOffset(*inner.offset()))
            .into()
    }
}
impl From<chrono::DateTime<chrono_tz::Tz>> for DateTime {
    #[inline]
    fn from(inner: chrono::DateTime<chrono_tz::Tz>) -> Self {
        inner.with_timezone(&Tz::Iana(inner.timezone())).into()
    }
}

//
// ser/de
//
impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fmt = chrono::SecondsFormat::AutoSi;
        match self.inner.timezone() {
            Tz::Utc => write!(f, "{}", self.inner.to_rfc3339_opts(fmt, true)),
            Tz::FixedOffset(_) => {
                write!(f, "{}", self.inner.to_rfc3339_opts(fmt, false))
            }
            Tz::Iana(tz) => write!(
                f,
                "{}[{}]",
                self.inner.to_rfc3339_opts(fmt, false),
                tz.name()
            ),
        }
    }
}

impl FromStr for DateTime {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static WITH_TZ: OnceLock<regex::Regex> = OnceLock::new();
        let with_tz = WITH_TZ.get_or_init(|| {
            regex::Regex::new(r"^(?P<timepoint>[^\[\]]+)\[(?P<timezone>[^\[\]]+)\]$").unwrap()
        });

        let Some(caps) = with_tz.captures(s) else {
            let tp = chrono::DateTime::parse_from_rfc3339(s)
                .with_context(|| format!("parse '{}' to datetime", s))?;
            if s.ends_with('Z') {
                return Ok(tp.with_timezone(&Tz::Utc).into());
            }
            return Ok(tp.into());
        };

        let tp = &caps["timepoint"];
        let tz = Tz::from_str(&caps["timezone"])
            .with_context(|| format!("parse '{}' to timezone", &caps["timezone"]))?;
        if let Ok(tp) = chrono::DateTime::parse_from_rfc3339(tp) {
            return Ok(tp.with_timezone(&tz).into());
        }
        let naive = chrono::NaiveDateTime::parse_from_str(tp, "%Y-%m-%dT%H:%M:%S")
            .with_context(|| {
                format!("parse '{}' to datetime. Only RFC3339 string or naive datetime(%Y-%m-%dT%H:%M:%S) are supported", tp)
            })?;
        match naive.and_local_timezone(tz) {
            chrono::LocalResult::Single(tp) => Ok(tp.into()),
            chrono::LocalResult::Ambiguous(_, _) => {
                anyhow::bail!("parse '{}' to datetime. Ambiguous datetime", tp)
            }
            chrono::LocalResult::None => {
                anyhow::bail!("parse '{}' to datetime. Invalid datetime", tp)
            }
        }
    }
}

impl Serialize for DateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D>(deserializer: D) -> Result<DateTime, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl schemars::JsonSchema for DateTime {
    fn schema_name() -> String {
        "DateTime".to_string()
    }
    fn schema_id() -> std::borrow::Cow<'static, str> {
        "qchrono::timepoint::DateTime".into()
    }

    fn json_schema(_: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        let mut sch = SchemaObject {
            instance_type: Some(schemars::schema::InstanceType::String.into()),
            ..Default::default()
        };
        sch.metadata().description = Some(
            "DateTime with timezone. RFC3339 string or naive datetime with timezone(e.g. '2024-06-01T12:34:56[Asia/Tokyo]') are supported"
                .to_string()
        );
        sch.into()
    }
}

//
// operators
//
impl std::ops::Sub<&DateTime> for &DateTime {
    type Output = TimeDelta;

    #[inline]
    fn sub(self, rhs: &DateTime) -> TimeDelta {
        self.inner - rhs.inner
    }
}

impl std::ops::Add<TimeDelta> for DateTime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: TimeDelta) -> Self {
        (self.inner + rhs).into()
    }
}

impl std::ops::Sub<TimeDelta> for DateTime {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: TimeDelta) -> Self {
        (self.inner - rhs).into()
    }
}

//
// methods
//
impl DateTime {
    /// Date on the wall clock of the zone this instant is presented in.
    ///
    /// Use [`crate::timepoint::local_date`] to get the date in another zone.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.inner.date_naive()
    }

    #[inline]
    pub fn timezone(&self) -> Tz {
        self.inner.timezone()
    }

    /// The same instant presented in `tz`.
    #[inline]
    pub fn with_timezone(&self, tz: &Tz) -> Self {
        self.inner.with_timezone(tz).into()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1970-01-01T00:00:00Z")]
    #[case("2024-06-01T12:34:56Z")]
    #[case("2999-12-31T23:59:59Z")]
    fn test_parse_utc(#[case] s: &str) {
        let expected = chrono::DateTime::parse_from_rfc3339(s)
            .unwrap()
            .with_timezone(&Tz::Utc)
            .into();
        let tested = DateTime::from_str(s).unwrap();

        assert_eq!(tested, expected);
        assert_eq!(tested.timezone(), Tz::Utc);
    }

    #[rstest]
    #[case("2012-11-05T00:00:00-04:00")]
    #[case("2024-06-01T12:34:56+09:00")]
    #[case("2024-06-01T12:34:56-05:23")]
    fn test_parse_fixed_offset(#[case] s: &str) {
        let expected = chrono::DateTime::parse_from_rfc3339(s).unwrap().into();
        let tested = DateTime::from_str(s).unwrap();

        assert_eq!(tested, expected);
        assert!(matches!(tested.timezone(), Tz::FixedOffset(_)));
    }

    #[rstest]
    #[case("2024-06-01T12:34:56[Z]", "2024-06-01T12:34:56+00:00", "Z")]
    #[case("2024-06-01T12:34:56+09:00[Z]", "2024-06-01T12:34:56+09:00", "Z")]
    #[case("2024-06-01T12:34:56[+09:00]", "2024-06-01T12:34:56+09:00", "+09:00")]
    #[case("2024-06-01T12:34:56[Asia/Tokyo]", "2024-06-01T12:34:56+09:00", "Asia/Tokyo")]
    #[case(
        "2024-06-01T12:34:56[America/New_York]",
        "2024-06-01T12:34:56-04:00",
        "America/New_York"
    )]
    #[case(
        "2024-12-01T12:34:56[America/New_York]",
        "2024-12-01T12:34:56-05:00",
        "America/New_York"
    )]
    #[case(
        "2012-11-04T23:00:00[Eastern Standard Time]",
        "2012-11-05T04:00:00Z",
        "America/New_York"
    )]
    fn test_parse_with_tz(#[case] s: &str, #[case] tp: &str, #[case] tz: &str) {
        let tz = Tz::from_str(tz).unwrap();
        let expected: DateTime = chrono::DateTime::parse_from_rfc3339(tp)
            .unwrap()
            .with_timezone(&tz)
            .into();
        let tested = DateTime::from_str(s).unwrap();

        assert_eq!(tested, expected);
        assert_eq!(tested.timezone(), tz);
    }

    #[rstest]
    #[case::no_tz("2024-06-01T12:34:56")]
    #[case::invalid_tp("2024-06-01T12:34:56+09")]
    #[case::invalid_tp("2024-06-01T12:34:56 Z")]
    #[case::invalid_tz("2024-06-01T12:34:56+09:00[]")]
    #[case::invalid_tz("2024-06-01T12:34:56+09:00[NOT_EXIST]")]
    #[case::invalid_tz("2024-06-01T12:34:56+09:00[ Asia/Tokyo]")]
    #[case::skipped_local_time("2024-03-10T02:30:00[America/New_York]")]
    #[case::ambiguous_local_time("2024-11-03T01:30:00[America/New_York]")]
    #[case::non_trimmed(" 2024-06-01T12:34:56+09:00")]
    fn test_parse_err(#[case] s: &str) {
        let tested = DateTime::from_str(s);

        assert!(tested.is_err());
    }

    #[rstest]
    #[case("2024-06-01T12:34:56Z")]
    #[case("2024-06-01T12:34:56+09:00")]
    #[case("2012-11-05T00:00:00-05:00[America/New_York]")]
    #[case("2999-12-31T23:59:59+09:00[Asia/Tokyo]")]
    fn test_to_string(#[case] s: &str) {
        let dt = DateTime::from_str(s).unwrap();

        assert_eq!(dt.to_string(), s);
    }

    #[test]
    fn test_equality_ignores_presentation_zone() {
        let edt = DateTime::from_str("2012-11-05T00:00:00-04:00").unwrap();
        let est = edt.with_timezone(&Tz::from_str("America/New_York").unwrap());

        assert_eq!(edt, est);
        assert_eq!(est.date(), NaiveDate::from_ymd_opt(2012, 11, 4).unwrap());
        assert_ne!(edt.date(), est.date());
    }

    #[test]
    fn test_add_day_is_absolute() {
        let dt = DateTime::from_str("2012-11-04T00:00:00[America/New_York]").unwrap();

        let next = dt.clone() + TimeDelta::days(1);

        assert_eq!(&next - &dt, TimeDelta::hours(24));
        assert_eq!(next.to_string(), "2012-11-04T23:00:00-05:00[America/New_York]");
    }

    #[test]
    fn test_serde() {
        let dt = DateTime::from_str("2012-11-05T00:00:00-05:00[America/New_York]").unwrap();

        let json = serde_json::to_value(&dt).unwrap();
        let de: DateTime = serde_json::from_value(json.clone()).unwrap();

        assert_eq!(
            json,
            serde_json::json!("2012-11-05T00:00:00-05:00[America/New_York]")
        );
        assert_eq!(de, dt);
        assert_eq!(de.timezone(), dt.timezone());
    }
}
