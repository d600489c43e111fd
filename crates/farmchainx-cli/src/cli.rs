use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "farmchainx-scan")]
#[command(about = "Decode FarmChainX QR labels and look up verification records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a QR label from an image file and extract the identifier
    Scan {
        /// Image file (JPEG, PNG, or WebP; 5 MB max)
        #[arg(required = true)]
        image: PathBuf,

        /// Also fetch the verification record for the extracted identifier
        #[arg(short, long)]
        fetch: bool,

        /// Verification backend base URL
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        base_url: String,
    },

    /// Fetch the verification record for a known identifier
    Verify {
        /// Product identifier (UUID)
        #[arg(required = true)]
        identifier: String,

        /// Verification backend base URL
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        base_url: String,
    },
}
