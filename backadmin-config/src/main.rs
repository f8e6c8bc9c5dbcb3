use anyhow::{Context, Result};
use backadmin_config::inspect::render_tree;
use clap::Parser;
use config_tree_core::parse_file;

mod check_cmd;
mod cli;
mod inputs;
mod process_cmd;

use cli::{Cli, Command, InspectArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Process(args) => process_cmd::run_process(args),
        Command::Check(args) => check_cmd::run_check(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let tree = parse_file(&args.file)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    print!("{}", render_tree(&tree, args.depth));
    Ok(())
}
