#![deny(missing_docs)]

//! # mdxgen CLI
//!
//! Command Line Interface for the schema-to-MDX generator.
//!
//! Supported Commands:
//! - `generate`: One schema -> MDX tree on disk.
//! - `tags`: One schema -> documents printed to stdout.
//! - `files`: Many schemas (globs) -> per-file or per-entity output.

use clap::{Parser, Subcommand};
use mdxgen_core::LocalFs;
use std::process::ExitCode;

use crate::error::CliResult;

mod error;
mod files;
mod generate;
mod logging;
mod tags;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Generate MDX documentation from GraphQL or OpenAPI schemas")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the MDX tree for a single schema.
    Generate(generate::GenerateArgs),
    /// Print the generated documents without writing files.
    Tags(tags::TagsArgs),
    /// Generate from every schema matched by one or more glob patterns.
    Files(files::FilesArgs),
}

fn run(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Generate(args) => generate::execute(args, &LocalFs),
        Commands::Tags(args) => tags::execute(args, &mut std::io::stdout().lock()),
        Commands::Files(args) => files::execute(args, &LocalFs),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "generation failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
