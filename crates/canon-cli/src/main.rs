//! Canon CLI: the `canon` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            declaration,
            caselaw,
            json,
        } => commands::validate::run(declaration, caselaw, json),

        Commands::Realize {
            declaration,
            timeout_ms,
            skip_validation,
            allow_bypass,
            json,
        } => commands::realize::run(commands::realize::Args {
            declaration,
            timeout_ms,
            skip_validation,
            allow_bypass,
            json,
        }),

        Commands::Sign {
            declaration,
            with_annotations,
        } => commands::sign::run(declaration, with_annotations),

        Commands::Solve {
            kind,
            params,
            title,
            out,
        } => commands::solve::run(kind, params, title, out),
    }
}
