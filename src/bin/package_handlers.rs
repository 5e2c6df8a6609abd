//! Deployment bundle packaging tool
//!
//! Stages the compiled gateway binary once per handler deployment and zips
//! each staging directory into `<out-dir>/lambdas/<handler>.zip`. The same
//! artifact serves every handler; which tier an instance answers for is
//! decided at deploy time through `GATEWAY_ROLE`, not by bundle contents.
//!
//! A missing artifact is a warning, not a failure, so the tool can run in
//! partial builds.

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Handler deployments the gateway ships as
const HANDLERS: &[&str] = &["primary-handler", "fallback-handler", "degradation-handler"];

/// Entry name inside each bundle; the Lambda custom runtime executes it
const BUNDLE_ENTRY: &str = "bootstrap";

#[derive(Parser, Debug)]
#[command(
    name = "package-handlers",
    about = "Package per-handler deployment bundles from the compiled gateway",
    version
)]
struct Args {
    /// Compiled gateway binary to bundle
    #[arg(long, default_value = "target/release/gateway")]
    artifact: PathBuf,

    /// Directory the bundles are written under
    #[arg(long, default_value = "dist")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let packaged = package_all(&args.artifact, &args.out_dir)?;

    info!("Handler packaging complete ({} bundles)", packaged.len());
    Ok(())
}

/// Stage and zip every handler, skipping each one the artifact is absent for
fn package_all(artifact: &Path, out_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let lambdas_dir = out_dir.join("lambdas");
    std::fs::create_dir_all(&lambdas_dir)
        .with_context(|| format!("Failed to create {:?}", lambdas_dir))?;

    let mut packaged = Vec::new();
    for handler in HANDLERS {
        if !artifact.exists() {
            warn!("Artifact {:?} not found, skipping {}", artifact, handler);
            continue;
        }

        let zip_path = package_handler(artifact, &lambdas_dir, handler)
            .with_context(|| format!("Failed to package {}", handler))?;
        info!("Created: {:?}", zip_path);
        packaged.push(zip_path);
    }

    Ok(packaged)
}

/// Stage the artifact under `<lambdas>/<handler>/bootstrap` and zip it
fn package_handler(artifact: &Path, lambdas_dir: &Path, handler: &str) -> anyhow::Result<PathBuf> {
    let staging_dir = lambdas_dir.join(handler);
    std::fs::create_dir_all(&staging_dir)?;
    std::fs::copy(artifact, staging_dir.join(BUNDLE_ENTRY))?;

    let zip_path = lambdas_dir.join(format!("{}.zip", handler));
    let file = std::fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file(BUNDLE_ENTRY, options)?;
    zip.write_all(&std::fs::read(artifact)?)?;
    zip.finish()?;

    Ok(zip_path)
}
