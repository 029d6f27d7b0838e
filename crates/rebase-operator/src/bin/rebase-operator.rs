use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rebase_operator::{ClaimManifest, OperatorError, RootBundle, WeightManifest};

#[derive(Parser)]
#[command(name = "rebase-operator")]
#[command(about = "Build and check claim roots for the rebase pool", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "REBASE_LOG", default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split new funding by power and add carried amounts into a claim manifest
    Allocate {
        #[arg(long, env = "REBASE_WEIGHTS")]
        weights: PathBuf,
        #[arg(long, env = "REBASE_MANIFEST")]
        out: PathBuf,
    },
    /// Build the claim tree for a manifest and write the root bundle
    Build {
        #[arg(long, env = "REBASE_MANIFEST")]
        manifest: PathBuf,
        #[arg(long, env = "REBASE_BUNDLE")]
        out: PathBuf,
    },
    /// Check every proof in a root bundle against its root
    Verify {
        #[arg(long, env = "REBASE_BUNDLE")]
        bundle: PathBuf,
    },
}

fn run(command: Command) -> Result<(), OperatorError> {
    match command {
        Command::Allocate { weights, out } => {
            let manifest = WeightManifest::load(&weights)?.allocate()?;
            manifest.save(&out)?;
            tracing::info!(claims = manifest.claims.len(), out = %out.display(), "wrote claim manifest");
        }
        Command::Build { manifest, out } => {
            let bundle = ClaimManifest::load(&manifest)?.bundle()?;
            bundle.save(&out)?;
            // Printed bare so scripts can pass it straight to publish_root.
            println!("{}", bundle.root);
        }
        Command::Verify { bundle } => {
            let bundle = RootBundle::load(&bundle)?;
            bundle.verify()?;
            tracing::info!(root = %bundle.root, claims = bundle.claims.len(), "bundle verified");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "operator command failed");
            ExitCode::FAILURE
        }
    }
}
