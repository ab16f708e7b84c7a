// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod annotate;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Fabstir traffic sign recognizer CLI
#[derive(Parser, Debug)]
#[command(name = "signrec-cli")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Detect, classify and annotate traffic signs in still frames", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Annotate images with recognized signs
    Annotate(annotate::AnnotateArgs),

    /// Print the sign class label table
    Labels,

    /// Print version and build features
    Version {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Annotate(args) => annotate::annotate_images(args).await,
        Commands::Labels => annotate::print_labels(),
        Commands::Version { json } => print_version(json),
    }
}

fn print_version(json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&crate::version::get_version_info())?
        );
    } else {
        println!("{}", crate::version::get_version_string());
    }
    Ok(())
}
