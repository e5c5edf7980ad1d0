//! Builds the localized configuration reference.
//!
//! Locates the reference tree (`--root`, `CONFIGREF_ROOT`, or an upward
//! search), validates the option catalog, and writes one page plus JSON
//! summaries per language directory under `content/`, followed by
//! `languages.json`. Log output goes to stderr; stdout carries only the final
//! summary line.

use anyhow::{Result, anyhow, bail};
use configref::{Layout, SectionPlan, checked_root, find_repo_root, generate};
use std::env;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    let root = match cli.root {
        Some(path) => checked_root(&path)?,
        None => find_repo_root()?,
    };
    let layout = Layout::from_root(&root).with_output_override(cli.output);
    let report = generate(&layout, &SectionPlan::standard())?;

    println!(
        "Wrote reference files for: {}",
        report.languages.join(", ")
    );
    Ok(())
}

struct Cli {
    root: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();
        let mut root = None;
        let mut output = None;

        while let Some(arg) = args.next() {
            let arg_str = arg
                .to_str()
                .ok_or_else(|| anyhow!("invalid UTF-8 in argument"))?;
            match arg_str {
                "--root" => root = Some(next_path("--root", &mut args)?),
                "--output" => output = Some(next_path("--output", &mut args)?),
                "--help" | "-h" => usage(0),
                other => bail!("unknown argument: {other}"),
            }
        }

        Ok(Self { root, output })
    }
}

fn next_path(flag: &str, args: &mut env::ArgsOs) -> Result<PathBuf> {
    let value = args
        .next()
        .ok_or_else(|| anyhow!("{flag} requires a value"))?;
    let path = PathBuf::from(
        value
            .into_string()
            .map_err(|_| anyhow!("{flag} must be valid UTF-8"))?,
    );
    if path.as_os_str().is_empty() {
        bail!("{flag} must not be empty");
    }
    Ok(path)
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: generate-reference [--root PATH] [--output PATH]\n\nOptions:\n  --root PATH              Reference tree root (or set CONFIGREF_ROOT).\n  --output PATH            Output directory (or set CONFIGREF_OUTPUT_DIR; default <root>/output).\n  --help                   Show this help text.\n\nSet RUST_LOG=debug to trace locale fallbacks."
    );
    std::process::exit(code);
}
