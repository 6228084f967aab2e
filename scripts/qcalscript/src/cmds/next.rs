use std::path::PathBuf;

use qcalendar::Calendar;
use qchrono::timepoint::{DateTime, Tz};

use crate::util::calendar_file::load_calendar;

use super::Cmd;

// -----------------------------------------------------------------------------
// Args
// -----------------------------------------------------------------------------
#[derive(Debug, clap::Args)]
pub struct Args {
    /// Calendar file in JSON or YAML
    #[clap(short = 'c', long = "calendar")]
    pub calendar: PathBuf,

    /// Instant to search from, e.g. 2024-01-01T09:00:00Z
    #[clap(short = 'f', long = "from")]
    pub from: DateTime,

    /// Time zone to print the result in. The zone of the calendar is used if omitted
    #[clap(long = "tz")]
    pub tz: Option<Tz>,
}

impl Cmd for Args {
    fn run(&self) -> anyhow::Result<()> {
        let cal = load_calendar(&self.calendar)?;
        let tz = self.tz.unwrap_or(*cal.timezone());
        let next = next_in(&cal, &self.from, &tz)?;
        println!("{next}");
        Ok(())
    }
}

fn next_in<C: Calendar>(cal: &C, from: &DateTime, tz: &Tz) -> anyhow::Result<DateTime> {
    let next = cal.next_included_time(from)?;
    log::debug!("next included time from {from}: {next}");
    Ok(next.with_timezone(tz))
}
