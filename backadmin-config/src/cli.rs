use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "backadmin-config")]
#[command(about = "Post-process and check backadmin backend configuration trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Run the config passes and print the processed backend config.
    Process(ProcessArgs),
    /// Run the config passes and report errors and warnings.
    Check(CheckArgs),
    /// Show the parsed structure of a backend config file.
    Inspect(InspectArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
pub struct ProcessArgs {
    /// Backend config file to process.
    pub file: PathBuf,
    /// Custom short-type aliases (TOML, `[[type]]` entries).
    #[arg(long)]
    pub custom_types: Option<PathBuf>,
    /// ORM metadata used for filter type guessing (TOML, `[[class]]` entries).
    #[arg(long)]
    pub metadata: Option<PathBuf>,
    /// Static choice lists (TOML, `[[choice]]` entries).
    #[arg(long)]
    pub choices: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = ConfigFormat::Yaml)]
    pub format: ConfigFormat,
    /// Write the processed config to a file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Backend config file to check.
    pub file: PathBuf,
    /// Custom short-type aliases (TOML, `[[type]]` entries).
    #[arg(long)]
    pub custom_types: Option<PathBuf>,
    /// ORM metadata used for filter type guessing (TOML, `[[class]]` entries).
    #[arg(long)]
    pub metadata: Option<PathBuf>,
    /// Static choice lists (TOML, `[[choice]]` entries).
    #[arg(long)]
    pub choices: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
    /// Treat warnings as failures.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Backend config file to inspect.
    pub file: PathBuf,
    #[arg(long, default_value_t = 3)]
    pub depth: usize,
}
