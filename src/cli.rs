//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Resolve, fetch, and cache prebuilt native-module binaries.
///
/// Run from (or point `--path` at) a package directory; the tool reads
/// `package.json`, resolves the artifact URL for the target runtime, and
/// installs from the shared download cache whenever it can.
#[derive(Parser, Debug)]
#[command(name = "prebuild-fetch")]
#[command(author, version, about)]
pub struct Args {
    /// Download template or URL override; bare flag uses declared metadata
    #[arg(short = 'd', long)]
    pub download: Option<Option<String>>,

    /// Target platform (linux, darwin, win32)
    #[arg(long)]
    pub platform: Option<String>,

    /// Target architecture (x64, arm64, ia32)
    #[arg(short = 'a', long)]
    pub arch: Option<String>,

    /// Target runtime
    #[arg(long)]
    pub runtime: Option<String>,

    /// Target ABI identifier
    #[arg(long)]
    pub abi: Option<String>,

    /// Libc discriminator for non-glibc targets (e.g. musl)
    #[arg(long)]
    pub libc: Option<String>,

    /// Fetch the Debug build configuration
    #[arg(long)]
    pub debug: bool,

    /// Package directory to operate in (defaults to the current directory)
    #[arg(short = 'p', long)]
    pub path: Option<PathBuf>,

    /// Skip extraction, only fetch into the cache
    #[arg(long)]
    pub no_extract: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
