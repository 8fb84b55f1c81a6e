//! Armature CLI: the `armature` command.

mod cli;
mod commands;
mod render;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    support::init_tracing(cli.verbose);

    match cli.command {
        Commands::Validate {
            file,
            all,
            dir,
            validator,
            json,
        } => commands::validate::run(file, all, dir, validator, json),

        Commands::Stats { file, json } => commands::stats::run(file, json),
    }
}
