use std::path::PathBuf;

use qcalendar::Calendar;
use qchrono::timepoint::DateTime;

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

    /// Instant to check, e.g. 2024-01-01T09:00:00+09:00
    #[clap(short = 'a', long = "at")]
    pub at: DateTime,
}

impl Cmd for Args {
    fn run(&self) -> anyhow::Result<()> {
        let cal = load_calendar(&self.calendar)?;
        println!("{}", verdict(&cal, &self.at));
        Ok(())
    }
}

fn verdict<C: Calendar>(cal: &C, at: &DateTime) -> &'static str {
    match cal.is_time_included(at) {
        true => "included",
        false => "excluded",
    }
}
