use std::{fmt::Display, str::FromStr};

use schemars::schema::SchemaObject;

// -----------------------------------------------------------------------------
// TzOffset
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TzOffset {
    Utc(<chrono::Utc as chrono::TimeZone>::Offset),
    FixedOffset(<chrono::FixedOffset as chrono::TimeZone>::Offset),
    Iana(<chrono_tz::Tz as chrono::TimeZone>::Offset),
}

impl chrono::Offset for TzOffset {
    #[inline]
    fn fix(&self) -> chrono::FixedOffset {
        match self {
            TzOffset::Utc(offset) => offset.fix(),
            TzOffset::FixedOffset(offset) => offset.fix(),
            TzOffset::Iana(offset) => offset.fix(),
        }
    }
}

impl Display for TzOffset {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", chrono::Offset::fix(self))
    }
}

// -----------------------------------------------------------------------------
// Tz
// -----------------------------------------------------------------------------
/// Time zone used to interpret instants as local wall-clock time.
///
/// Offsets of [`Tz::Iana`] are resolved through the tz database for each instant,
/// so daylight saving transitions and historical changes are honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tz {
    #[default]
    Utc,
    FixedOffset(chrono::FixedOffset),
    Iana(chrono_tz::Tz),
}

//
// conversion
//
impl From<chrono::Utc> for Tz {
    #[inline]
    fn from(_: chrono::Utc) -> Self {
        Tz::Utc
    }
}
impl From<chrono::FixedOffset> for Tz {
    #[inline]
    fn from(offset: chrono::FixedOffset) -> Self {
        Tz::FixedOffset(offset)
    }
}
impl From<chrono_tz::Tz> for Tz {
    #[inline]
    fn from(tz: chrono_tz::Tz) -> Self {
        Tz::Iana(tz)
    }
}

impl chrono::TimeZone for Tz {
    type Offset = TzOffset;

    #[inline]
    fn from_offset(offset: &Self::Offset) -> Self {
        match offset {
            TzOffset::Utc(offset) => chrono::Utc::from_offset(offset).into(),
            TzOffset::FixedOffset(offset) => chrono::FixedOffset::from_offset(offset).into(),
            TzOffset::Iana(offset) => chrono_tz::Tz::from_offset(offset).into(),
        }
    }
    #[inline]
    fn offset_from_local_date(
        &self,
        local: &chrono::NaiveDate,
    ) -> chrono::MappedLocalTime<Self::Offset> {
        match self {
            Tz::Utc => chrono::Utc.offset_from_local_date(local).map(TzOffset::Utc),
            Tz::FixedOffset(offset) => offset
                .offset_from_local_date(local)
                .map(TzOffset::FixedOffset),
            Tz::Iana(tz) => tz.offset_from_local_date(local).map(TzOffset::Iana),
        }
    }
    #[inline]
    fn offset_from_local_datetime(
        &self,
        local: &chrono::NaiveDateTime,
    ) -> chrono::MappedLocalTime<Self::Offset> {
        match self {
            Tz::Utc => chrono::Utc
                .offset_from_local_datetime(local)
                .map(TzOffset::Utc),
            Tz::FixedOffset(offset) => offset
                .offset_from_local_datetime(local)
                .map(TzOffset::FixedOffset),
            Tz::Iana(tz) => tz.offset_from_local_datetime(local).map(TzOffset::Iana),
        }
    }
    #[inline]
    fn offset_from_utc_date(&self, utc: &chrono::NaiveDate) -> Self::Offset {
        match self {
            Tz::Utc => TzOffset::Utc(chrono::Utc.offset_from_utc_date(utc)),
            Tz::FixedOffset(offset) => TzOffset::FixedOffset(offset.offset_from_utc_date(utc)),
            Tz::Iana(tz) => TzOffset::Iana(tz.offset_from_utc_date(utc)),
        }
    }
    #[inline]
    fn offset_from_utc_datetime(&self, utc: &chrono::NaiveDateTime) -> Self::Offset {
        match self {
            Tz::Utc => TzOffset::Utc(chrono::Utc.offset_from_utc_datetime(utc)),
            Tz::FixedOffset(offset) => TzOffset::FixedOffset(offset.offset_from_utc_datetime(utc)),
            Tz::Iana(tz) => TzOffset::Iana(tz.offset_from_utc_datetime(utc)),
        }
    }
}

// -----------------------------------------------------------------------------
// Windows zone identifiers
// -----------------------------------------------------------------------------
/// Windows time zone ids and the IANA zone each one resolves to (the CLDR "001" territory).
const WINDOWS_ZONES: &[(&str, &str)] = &[
    ("AUS Eastern Standard Time", "Australia/Sydney"),
    ("Alaskan Standard Time", "America/Anchorage"),
    ("Atlantic Standard Time", "America/Halifax"),
    ("Central Europe Standard Time", "Europe/Budapest"),
    ("Central European Standard Time", "Europe/Warsaw"),
    ("Central Standard Time", "America/Chicago"),
    ("China Standard Time", "Asia/Shanghai"),
    ("E. South America Standard Time", "America/Sao_Paulo"),
    ("Eastern Standard Time", "America/New_York"),
    ("FLE Standard Time", "Europe/Kiev"),
    ("GMT Standard Time", "Europe/London"),
    ("Greenwich Standard Time", "Atlantic/Reykjavik"),
    ("Hawaiian Standard Time", "Pacific/Honolulu"),
    ("India Standard Time", "Asia/Kolkata"),
    ("Korea Standard Time", "Asia/Seoul"),
    ("Mountain Standard Time", "America/Denver"),
    ("Nepal Standard Time", "Asia/Kathmandu"),
    ("New Zealand Standard Time", "Pacific/Auckland"),
    ("Newfoundland Standard Time", "America/St_Johns"),
    ("Pacific Standard Time", "America/Los_Angeles"),
    ("Romance Standard Time", "Europe/Paris"),
    ("Russian Standard Time", "Europe/Moscow"),
    ("Singapore Standard Time", "Asia/Singapore"),
    ("Tokyo Standard Time", "Asia/Tokyo"),
    ("Turkey Standard Time", "Europe/Istanbul"),
    ("US Mountain Standard Time", "America/Phoenix"),
    ("W. Europe Standard Time", "Europe/Berlin"),
];

fn windows_zone(id: &str) -> Option<chrono_tz::Tz> {
    WINDOWS_ZONES
        .iter()
        .find(|(win, _)| *win == id)
        .and_then(|(_, iana)| chrono_tz::Tz::from_str(iana).ok())
}

//
// ser/de
//
impl FromStr for Tz {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s != s.trim() {
            anyhow::bail!("Non-trimmed timezone string({})", s);
        }
        if s == "Z" {
            return Ok(Tz::Utc);
        }
        if let Ok(tz) = chrono::FixedOffset::from_str(s) {
            return Ok(Tz::FixedOffset(tz));
        }
        if let Ok(tz) = chrono_tz::Tz::from_str(s) {
            return Ok(Tz::Iana(tz));
        }
        if let Some(tz) = windows_zone(s) {
            return Ok(Tz::Iana(tz));
        }
        anyhow::bail!(
            "Invalid timezone({}). Only Z, fixed offset, IANA or Windows timezone ids are supported",
            s
        )
    }
}

impl Display for Tz {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tz::Utc => write!(f, "Z"),
            Tz::FixedOffset(offset) => write!(f, "{}", offset),
            Tz::Iana(tz) => write!(f, "{}", tz.name()),
        }
    }
}

impl serde::Serialize for Tz {
    #[inline]
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Tz {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl schemars::JsonSchema for Tz {
    fn schema_name() -> String {
        "Tz".to_string()
    }
    fn schema_id() -> std::borrow::Cow<'static, str> {
        "qchrono::timepoint::Tz".into()
    }

    fn json_schema(_: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        let mut sch = SchemaObject {
            instance_type: Some(schemars::schema::InstanceType::String.into()),
            ..Default::default()
        };
        sch.metadata().description = Some(
            "Timezone. 'Z', fixed offset(e.g. '+09:00'), IANA name(e.g. 'Asia/Tokyo') or Windows id(e.g. 'Eastern Standard Time')"
                .to_string(),
        );
        sch.into()
    }
}
