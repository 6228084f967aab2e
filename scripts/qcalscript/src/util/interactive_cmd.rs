use anyhow::bail;
use clap::{Arg, Command};
use dialoguer::{Confirm, Input, Select};

/// Build command line arguments by prompting for a subcommand and each of its options.
pub fn interactive_cmd(cmd: &Command) -> anyhow::Result<Vec<String>> {
    let mut args = vec![cmd.get_name().to_string()];
    let mut cmd = cmd;
    loop {
        let subcmds: Vec<_> = cmd.get_subcommands().collect();
        if subcmds.is_empty() {
            break;
        }
        let names: Vec<_> = subcmds.iter().map(|c| c.get_name()).collect();
        let selection = Select::new()
            .items(&names)
            .default(0)
            .with_prompt("Select subcommand")
            .interact()?;
        cmd = subcmds[selection];
        args.push(cmd.get_name().to_string());
    }
    for arg in cmd.get_arguments() {
        if arg.is_hide_set() {
            continue;
        }
        ask_arg(arg, &mut args)?;
    }
    Ok(args)
}

fn ask_arg(arg: &Arg, dst: &mut Vec<String>) -> anyhow::Result<()> {
    let option = option_of(arg)?;
    let prompt = match arg.get_help() {
        Some(help) => format!("{help}. {option}"),
        None => option.clone(),
    };

    if !arg.get_action().takes_values() {
        let on = Confirm::new()
            .default(false)
            .with_prompt(prompt)
            .interact()?;
        if on {
            dst.push(option);
        }
        return Ok(());
    }

    let choices: Vec<_> = arg.get_possible_values();
    let input = if choices.is_empty() {
        let input = Input::<String>::new()
            .allow_empty(!arg.is_required_set())
            .with_prompt(prompt);
        match arg.get_default_values().first().and_then(|s| s.to_str()) {
            Some(default) => input.default(default.to_string()).interact_text()?,
            None => input.interact_text()?,
        }
    } else {
        let names: Vec<_> = choices.iter().map(|p| p.get_name()).collect();
        let selection = Select::new()
            .items(&names)
            .default(0)
            .with_prompt(prompt)
            .interact()?;
        names[selection].to_string()
    };

    let input = input.trim();
    if !input.is_empty() {
        dst.push(option);
        dst.push(input.to_string());
    }
    Ok(())
}

fn option_of(arg: &Arg) -> anyhow::Result<String> {
    if let Some(long) = arg.get_long() {
        return Ok(format!("--{long}"));
    }
    let Some(short) = arg.get_short() else {
        bail!("Positional argument {} is not supported", arg.get_id());
    };
    Ok(format!("-{short}"))
}
