use std::path::Path;

use anyhow::{bail, Context};
use qcalendar::CalendarVariant;

// -----------------------------------------------------------------------------
// Format
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Detect the format from the extension of `path`.
    pub fn of(path: &Path) -> anyhow::Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("yaml" | "yml") => Ok(Format::Yaml),
            _ => bail!(
                "Unsupported calendar file: {}. '.json', '.yaml' or '.yml' is expected",
                path.display()
            ),
        }
    }
}

// -----------------------------------------------------------------------------
// functions
// -----------------------------------------------------------------------------
pub fn parse_calendar(text: &str, format: Format) -> anyhow::Result<CalendarVariant> {
    let cal = match format {
        Format::Json => serde_json::from_str(text)?,
        Format::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(cal)
}

pub fn load_calendar(path: &Path) -> anyhow::Result<CalendarVariant> {
    let format = Format::of(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read calendar file {}", path.display()))?;
    let cal = parse_calendar(&text, format)
        .with_context(|| format!("parse calendar file {}", path.display()))?;
    log::info!(
        "Loaded calendar from {} (chain length: {})",
        path.display(),
        cal.chain_len()
    );
    Ok(cal)
}
