pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "pixy",
    about = "Pixy operator CLI",
    long_about = "Operate the Pixy lead-qualification chat: interactive sessions, \
        readiness checks, and config inspection.",
    after_help = "Examples:\n  pixy chat\n  pixy doctor --json\n  pixy config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run an interactive chat session against the local dialogue engine")]
    Chat,
    #[command(about = "Validate config, lead endpoint, and backup path readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Chat => commands::chat::run(),
        Command::Doctor { json } => commands::doctor::run(json),
        Command::Config => commands::config::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
