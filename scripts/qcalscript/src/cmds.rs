pub mod check;
pub mod next;
pub mod schema;

// -----------------------------------------------------------------------------
// Cmd
// -----------------------------------------------------------------------------
pub trait Cmd {
    fn run(&self) -> anyhow::Result<()>;
}

// -----------------------------------------------------------------------------
// Commands
// -----------------------------------------------------------------------------
#[derive(Debug, clap::Subcommand)]
#[clap(rename_all = "snake_case")]
pub enum Commands {
    /// Check if an instant is included by a calendar
    Check(check::Args),
    /// Find the next instant included by a calendar
    Next(next::Args),
    /// Print the JSON schema of calendar files
    Schema(schema::Args),
}

impl Cmd for Commands {
    fn run(&self) -> anyhow::Result<()> {
        match self {
            Commands::Check(args) => args.run(),
            Commands::Next(args) => args.run(),
            Commands::Schema(args) => args.run(),
        }
    }
}
