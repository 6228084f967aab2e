use std::env;

use anyhow::ensure;
use clap::{ArgAction, CommandFactory, Parser};
use cmds::Cmd;
use dialoguer::Confirm;
use util::interactive_cmd::interactive_cmd;

mod cmds;
mod util;

#[derive(Debug, Parser)]
#[command(about = "Inspect exclusion calendar files")]
struct Cli {
    /// Increase log verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: cmds::Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = make_cli()?;
    env_logger::builder()
        .filter_level(log_level(cli.verbose))
        .init();

    log::info!("{:?}", cli);
    cli.command.run()
}

fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn make_cli() -> anyhow::Result<Cli> {
    if env::args().len() != 1 {
        return Ok(Cli::parse());
    }
    eprintln!("Interactive mode. Start to build command...\n");
    let args = interactive_cmd(&Cli::command())?;

    eprintln!("\nCommand is built:\n\t{}\n", args.join(" "));
    let confirmed = Confirm::new()
        .with_prompt("Run the command?")
        .report(true)
        .interact()?;

    ensure!(confirmed, "Operation cancelled.");
    Ok(Cli::try_parse_from(args)?)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case(&["qcalscript", "schema"], 0)]
    #[case(&["qcalscript", "-vv", "schema"], 2)]
    #[case(&["qcalscript", "schema", "-vvv"], 3)]
    fn test_verbose(#[case] args: &[&str], #[case] expected: u8) {
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.verbose, expected);
    }

    #[rstest]
    #[case(0, log::LevelFilter::Warn)]
    #[case(1, log::LevelFilter::Info)]
    #[case(3, log::LevelFilter::Trace)]
    #[case(9, log::LevelFilter::Trace)]
    fn test_log_level(#[case] verbose: u8, #[case] expected: log::LevelFilter) {
        assert_eq!(log_level(verbose), expected);
    }
}
