use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use jsc_cfg::{LoadOptions, export};
use tracing_subscriber::EnvFilter;

/// jsc - convert JSC documents to plain JSON
#[derive(Parser)]
#[command(name = "jsc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input documents
    #[arg(short = 'f', long = "files", num_args = 1.., required = true)]
    files: Vec<PathBuf>,

    /// Output directory (created if missing)
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// Base directory for import paths (default: working directory)
    #[arg(short = 'i', long = "import-dir")]
    import_dir: Option<PathBuf>,

    /// Platform whose tagged keys are kept: Windows, Linux or Darwin (default: host)
    #[arg(long)]
    platform: Option<String>,

    /// Leave ${name} tokens and jcs_def blocks untouched
    #[arg(long)]
    no_variables: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .without_time()
        .with_target(false)
        .init();

    check_output_dir(&cli.output)?;

    let mut options = LoadOptions::default().with_variables(!cli.no_variables);
    if let Some(dir) = cli.import_dir {
        options = options.with_import_dir(dir);
    }
    if let Some(name) = cli.platform.as_deref() {
        options = options.with_platform_name(name);
    }

    for input in &cli.files {
        export::export_jsc_file(input, &cli.output, &options)
            .with_context(|| format!("failed to convert {}", input.display()))?;
    }

    Ok(())
}

/// The output path has to name a directory, not a file.
fn check_output_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        bail!("output directory is empty");
    }
    if dir.extension().is_some() {
        bail!(
            "output '{}' looks like a file, pass a directory with -o",
            dir.display()
        );
    }
    Ok(())
}
