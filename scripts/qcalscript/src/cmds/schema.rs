use std::path::PathBuf;

use anyhow::Context;
use qcalendar::CalendarVariant;
use schemars::{gen::SchemaSettings, schema::RootSchema};

use super::Cmd;

// -----------------------------------------------------------------------------
// Args
// -----------------------------------------------------------------------------
#[derive(Debug, clap::Args)]
pub struct Args {
    /// Output file. The schema is printed to stdout if omitted
    #[clap(short = 'o', long = "out")]
    pub out: Option<PathBuf>,
}

impl Cmd for Args {
    fn run(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&calendar_schema())?;
        match &self.out {
            Some(out) => {
                if let Some(dir) = out.parent().filter(|d| !d.as_os_str().is_empty()) {
                    std::fs::create_dir_all(dir)?;
                }
                std::fs::write(out, json)
                    .with_context(|| format!("write schema to {}", out.display()))?;
                log::info!("Schema is written to {}", out.display());
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}

fn calendar_schema() -> RootSchema {
    SchemaSettings::draft07()
        .with(|s| {
            s.option_add_null_type = false;
        })
        .into_generator()
        .into_root_schema_for::<CalendarVariant>()
}
