use qchrono::timepoint::{local_date, local_midnight, DateTime, LocalizeError, Tz};

use crate::{BaseCalendar, Calendar, CalendarError, CalendarVariant, ExcludedDays, MonthDay};

/// Max days scanned forward by the own search of [`AnnualCalendar`].
/// Long enough to reach the next February 29th from any date.
const MAX_SCAN_DAYS: usize = 8 * 366;

// -----------------------------------------------------------------------------
// AnnualCalendar
// -----------------------------------------------------------------------------
/// Calendar excluding a set of days every year, e.g. national holidays.
///
/// Days are registered without their year, so excluding January 1st 2005 excludes
/// January 1st of every year.
/// Instants are mapped to days on the wall clock of the calendar's own time zone,
/// which is independent of the time zone of its base calendar.
///
/// ```
/// use chrono::NaiveDate;
/// use qcalendar::{AnnualCalendar, Calendar};
/// use qchrono::timepoint::DateTime;
///
/// let mut cal = AnnualCalendar::new();
/// cal.set_day_excluded(NaiveDate::from_ymd_opt(2005, 1, 1).unwrap(), true);
///
/// let t: DateTime = "2024-01-01T09:00:00Z".parse().unwrap();
/// assert!(!cal.is_time_included(&t));
/// assert_eq!(
///     cal.next_included_time(&t).unwrap(),
///     "2024-01-02T00:00:00Z".parse::<DateTime>().unwrap()
/// );
/// ```
///
/// # Base calendar
/// An instant is included only if the base calendar includes it as well.
/// The base is owned and cloned deeply with the calendar, hence modifying or detaching
/// the base never changes the days excluded by the calendar itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnualCalendar {
    core: BaseCalendar,
    excluded: ExcludedDays,
}

//
// construction
//
impl AnnualCalendar {
    /// Create an empty calendar in UTC without base.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty calendar on top of `base`.
    ///
    /// # Errors
    /// * [`CalendarError::BaseChainTooDeep`]
    #[inline]
    pub fn with_base(base: impl Into<CalendarVariant>) -> Result<Self, CalendarError> {
        let mut cal = Self::new();
        cal.set_base(Some(base.into()))?;
        Ok(cal)
    }

    #[inline]
    pub fn builder() -> AnnualCalendarBuilder {
        AnnualCalendarBuilder::new()
    }
}

//
// ser/de
//
#[derive(serde::Serialize)]
struct _Ref<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    time_zone: &'a Tz,
    excluded_days: &'a ExcludedDays,
    #[serde(skip_serializing_if = "Option::is_none")]
    base: Option<&'a CalendarVariant>,
}

#[derive(serde::Deserialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
struct _Data {
    /// Free-form label of the calendar
    #[serde(default)]
    description: Option<String>,

    /// Time zone in which instants are mapped to days. UTC if omitted.
    #[serde(default)]
    time_zone: Tz,

    /// Days excluded every year, in '--MM-DD' format
    #[serde(default)]
    excluded_days: ExcludedDays,

    /// Calendar which must include an instant as well
    #[serde(default)]
    base: Option<CalendarVariant>,
}

impl serde::Serialize for AnnualCalendar {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        _Ref {
            description: self.description(),
            time_zone: self.timezone(),
            excluded_days: &self.excluded,
            base: self.base(),
        }
        .serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for AnnualCalendar {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = _Data::deserialize(deserializer)?;
        let mut builder = AnnualCalendar::builder()
            .with_timezone(data.time_zone)
            .with_excluded_days(data.excluded_days.iter());
        if let Some(description) = data.description {
            builder = builder.with_description(description);
        }
        if let Some(base) = data.base {
            builder = builder.with_base(base);
        }
        builder.build().map_err(serde::de::Error::custom)
    }
}

impl schemars::JsonSchema for AnnualCalendar {
    fn schema_name() -> String {
        "AnnualCalendar".to_string()
    }
    fn schema_id() -> std::borrow::Cow<'static, str> {
        "qcalendar::AnnualCalendar".into()
    }
    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <_Data as schemars::JsonSchema>::json_schema(gen)
    }
}

//
// methods
//
impl AnnualCalendar {
    /// Exclude or include `day` every year.
    ///
    /// `day` can be a [`MonthDay`] or a date (with time) of any year.
    /// The year and the time of day are ignored.
    #[inline]
    pub fn set_day_excluded(&mut self, day: impl Into<MonthDay>, excluded: bool) {
        let day = day.into();
        match excluded {
            true => self.excluded.insert(day),
            false => self.excluded.remove(&day),
        };
    }

    /// Exclude or include the day `instant` falls on in the time zone of this calendar.
    #[inline]
    pub fn set_day_excluded_at(&mut self, instant: &DateTime, excluded: bool) {
        self.set_day_excluded(MonthDay::local_to(instant, self.timezone()), excluded);
    }

    /// Check if `day` is excluded by this calendar itself. Base calendars are not consulted.
    #[inline]
    pub fn is_day_excluded(&self, day: impl Into<MonthDay>) -> bool {
        self.excluded.contains(&day.into())
    }

    /// Snapshot of the excluded days, from January 1st to December 31st.
    #[inline]
    pub fn days_excluded(&self) -> Vec<MonthDay> {
        self.excluded.to_vec()
    }

    /// Snapshot of the excluded days as a set.
    ///
    /// The returned value shares storage with the calendar until either side is modified.
    #[inline]
    pub fn excluded_days(&self) -> ExcludedDays {
        self.excluded.clone()
    }

    /// Replace all the excluded days. An empty iterator clears them.
    #[inline]
    pub fn set_days_excluded<I>(&mut self, days: I)
    where
        I: IntoIterator,
        I::Item: Into<MonthDay>,
    {
        self.excluded.replace(days.into_iter().map(Into::into));
    }

    #[inline]
    pub fn clear_days_excluded(&mut self) {
        self.excluded.clear();
    }

    #[inline]
    pub fn base(&self) -> Option<&CalendarVariant> {
        self.core.base()
    }

    /// See [`BaseCalendar::update_base`].
    #[inline]
    pub fn update_base<F, R>(&mut self, f: F) -> Result<Option<R>, CalendarError>
    where
        F: FnOnce(&mut CalendarVariant) -> Result<R, CalendarError>,
    {
        self.core.update_base(f)
    }

    /// See [`BaseCalendar::set_base`].
    #[inline]
    pub fn set_base(&mut self, base: Option<CalendarVariant>) -> Result<(), CalendarError> {
        self.core.set_base(base)
    }

    #[inline]
    pub fn take_base(&mut self) -> Option<CalendarVariant> {
        self.core.take_base()
    }

    #[inline]
    pub fn chain_len(&self) -> usize {
        self.core.chain_len()
    }

    #[inline]
    pub fn timezone(&self) -> &Tz {
        self.core.timezone()
    }

    #[inline]
    pub fn set_timezone(&mut self, time_zone: Tz) {
        self.core.set_timezone(time_zone);
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.core.description()
    }

    #[inline]
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.core.set_description(description);
    }

    #[inline]
    pub fn clear_description(&mut self) {
        self.core.clear_description();
    }

    /// Earliest instant at or after `instant` on a day this calendar does not exclude.
    fn own_next_included_time(&self, instant: &DateTime) -> Result<DateTime, CalendarError> {
        let tz = self.timezone();
        let mut date = local_date(instant, tz);
        if !self.is_day_excluded(date) {
            return Ok(instant.clone());
        }
        for skipped in 1..=MAX_SCAN_DAYS {
            date = date
                .succ_opt()
                .ok_or(LocalizeError::OutOfRange { date })?;
            if !self.is_day_excluded(date) {
                log::debug!("skipped {skipped} excluded days from {instant}");
                return Ok(local_midnight(date, tz)?);
            }
        }
        log::warn!("every day is excluded by annual calendar in {tz}");
        Err(CalendarError::SearchExhausted {
            from: instant.clone(),
            limit: MAX_SCAN_DAYS,
        })
    }
}

impl Calendar for AnnualCalendar {
    #[inline]
    fn is_time_included(&self, instant: &DateTime) -> bool {
        !self.is_day_excluded(MonthDay::local_to(instant, self.timezone()))
            && self.core.is_time_included_by_base(instant)
    }

    #[inline]
    fn next_included_time(&self, instant: &DateTime) -> Result<DateTime, CalendarError> {
        self.core
            .next_included_time_with(instant, |t| self.own_next_included_time(t))
    }
}

// -----------------------------------------------------------------------------
// AnnualCalendarBuilder
// -----------------------------------------------------------------------------
/// Builder of [`AnnualCalendar`].
///
/// Nothing is validated until [`AnnualCalendarBuilder::build`] is called.
#[derive(Debug, Clone, Default)]
pub struct AnnualCalendarBuilder {
    time_zone: Tz,
    description: Option<String>,
    excluded: Vec<MonthDay>,
    base: Option<CalendarVariant>,
}

impl AnnualCalendarBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_timezone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    #[inline]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add days to exclude. Calling this repeatedly accumulates the days.
    #[inline]
    pub fn with_excluded_days<I>(mut self, days: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<MonthDay>,
    {
        self.excluded.extend(days.into_iter().map(Into::into));
        self
    }

    #[inline]
    pub fn with_base(mut self, base: impl Into<CalendarVariant>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// # Errors
    /// * [`CalendarError::BaseChainTooDeep`]
    pub fn build(self) -> Result<AnnualCalendar, CalendarError> {
        let mut core = BaseCalendar::new(self.time_zone);
        core.set_base(self.base)?;
        if let Some(description) = self.description {
            core.set_description(description);
        }
        Ok(AnnualCalendar {
            core,
            excluded: self.excluded.into_iter().collect(),
        })
    }
}
