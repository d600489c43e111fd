use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use farmchainx_capture::load_upload;
use farmchainx_core::{ProductId, VerificationRecord, interpret};
use farmchainx_decode::{DecodeOutcome, QrDecoder};
use farmchainx_verify::{VerifyClient, VerifyClientConfig};

mod cli;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Commands::Scan {
            image,
            fetch,
            base_url,
        } => {
            let bytes = tokio::fs::read(&image)
                .await
                .with_context(|| format!("reading {}", image.display()))?;
            let frame = load_upload(&bytes).context("validating uploaded image")?;

            let payload = match QrDecoder::new().decode(frame)? {
                DecodeOutcome::Decoded(payload) => payload,
                DecodeOutcome::NotFound => bail!("no QR code found in {}", image.display()),
            };
            println!("payload: {payload}");

            let Some(target) = interpret(&payload) else {
                bail!("payload carries no product identifier");
            };
            println!("identifier: {}", target.identifier);

            if fetch {
                let record = fetch_record(&base_url, &target.identifier).await?;
                print_record(&record)?;
            }
        }

        Commands::Verify {
            identifier,
            base_url,
        } => {
            let identifier = ProductId::parse(&identifier).context("parsing identifier")?;
            let record = fetch_record(&base_url, &identifier).await?;
            print_record(&record)?;
        }
    }

    Ok(())
}

async fn fetch_record(base_url: &str, identifier: &ProductId) -> Result<VerificationRecord> {
    let client = VerifyClient::new(VerifyClientConfig {
        base_url: base_url.to_string(),
        ..VerifyClientConfig::default()
    })?;
    let record = client
        .fetch_record(identifier)
        .await
        .context("fetching verification record")?;
    Ok(record)
}

fn print_record(record: &VerificationRecord) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}
