//! Archstarter - Entry Point
//!
//! Runs a navigation script against the scope runtime and prints every
//! rendered screen.
//!
//! | Invocation | Script source |
//! |------------|---------------|
//! | `arch --script demo.txt` | file |
//! | `arch < demo.txt` | stdin |

// Force-link arch-features so its linkme registrations are included
extern crate arch_features;

use clap::Parser;

/// Command line interface for the Archstarter host
#[derive(Parser, Debug)]
#[command(name = "arch")]
#[command(about = "Archstarter - scoped presenter runtime host")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Navigation script; read from stdin when omitted
    #[arg(short, long)]
    pub script: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    arch::run(cli.config.as_deref(), cli.script.as_deref()).await
}
