//! CLI entry point for the prebuild fetcher.

use anyhow::{Context, Result};
use clap::Parser;
use prebuild_fetch_core::{
    DownloadOverride, HttpClient, Overrides, PackageManifest, ProcessEnv, ResolvedConfig,
    extract_tarball, fetch_to_cache,
};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let package_dir = match args.path {
        Some(path) => path,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    let manifest = PackageManifest::load(&package_dir)
        .with_context(|| format!("no installable package at {}", package_dir.display()))?;
    info!(
        package = %manifest.name,
        version = %manifest.version,
        "resolving prebuilt artifact"
    );

    let overrides = Overrides {
        platform: args.platform,
        arch: args.arch,
        runtime: args.runtime,
        abi: args.abi,
        libc: args.libc,
        debug: args.debug,
        download: DownloadOverride::from_cli(args.download),
    };
    let config = ResolvedConfig::resolve(&manifest, overrides, &ProcessEnv::capture());

    let client = HttpClient::new();
    let artifact = fetch_to_cache(&config, &client)
        .await
        .context("failed to fetch prebuilt artifact")?;

    if args.no_extract {
        info!(artifact = %artifact.display(), "fetched (extraction skipped)");
        println!("{}", artifact.display());
        return Ok(());
    }

    extract_tarball(&artifact, &package_dir)
        .await
        .with_context(|| format!("failed to extract {}", artifact.display()))?;

    info!(
        artifact = %artifact.display(),
        dest = %package_dir.display(),
        "prebuilt artifact installed"
    );
    Ok(())
}
