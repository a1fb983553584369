use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lockscope::export::{export, export_all, ExportData, ExportFormat};
use lockscope::parser::parse_file;
use lockscope::scan::{scan, summarize, ScanOptions, LOCKFILE_NAME};

#[derive(Parser)]
#[command(name = "lockscope")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Dependency inventory extractor for Yarn v1 lockfiles", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract dependencies from a single lockfile
    Parse {
        /// Path to a yarn.lock file or a directory containing one
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format (json, csv, markdown)
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Find and parse every lockfile under a directory
    Scan {
        /// Directory to search (defaults to current directory)
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Output format (json, csv, markdown)
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// Also search inside node_modules
        #[arg(long)]
        include_node_modules: bool,

        /// Also search inside hidden directories
        #[arg(long)]
        include_hidden: bool,

        /// Maximum directory depth to search
        #[arg(long)]
        max_depth: Option<usize>,

        /// Follow symbolic links while searching
        #[arg(long)]
        follow_links: bool,
    },
    /// Show version information
    Version,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Parse {
            path,
            format,
            output,
        }) => run_parse(&path, format, output.as_deref()),
        Some(Commands::Scan {
            root,
            format,
            include_node_modules,
            include_hidden,
            max_depth,
            follow_links,
        }) => {
            let options = ScanOptions {
                include_node_modules,
                include_hidden,
                max_depth,
                follow_links,
            };
            run_scan(&root, format, &options)
        }
        Some(Commands::Version) => {
            println!("lockscope v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => {
            println!("lockscope - Yarn v1 lockfile dependency inventory");
            println!("Run 'lockscope parse' to extract dependencies from ./yarn.lock");
            println!("Run 'lockscope --help' for more information");
            Ok(())
        }
    }
}

fn run_parse(path: &Path, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let lockfile = if path.is_dir() {
        path.join(LOCKFILE_NAME)
    } else {
        path.to_path_buf()
    };

    let deps = parse_file(&lockfile)
        .with_context(|| format!("Failed to parse {}", lockfile.display()))?;

    let Some(deps) = deps else {
        warn!(
            "{} is not a supported yarn v1 lockfile; nothing to report",
            lockfile.display()
        );
        return Ok(());
    };

    info!("Extracted {} dependencies from {}", deps.len(), lockfile.display());
    let data = ExportData::new(lockfile.display().to_string(), deps);

    match output {
        Some(out) => {
            let file = File::create(out)
                .with_context(|| format!("Failed to create {}", out.display()))?;
            let mut writer = BufWriter::new(file);
            export(format, &data, &mut writer)?;
            writer.flush()?;
            info!("Wrote {} report to {}", format, out.display());
        }
        None => export(format, &data, &mut io::stdout().lock())?,
    }

    Ok(())
}

fn run_scan(root: &Path, format: ExportFormat, options: &ScanOptions) -> Result<()> {
    let results = scan(root, options);
    if results.is_empty() {
        warn!("No {} files found under {}", LOCKFILE_NAME, root.display());
        return Ok(());
    }

    let summary = summarize(results);
    let mut stdout = io::stdout().lock();
    export_all(format, &summary.reports, &mut stdout)?;
    stdout.flush()?;

    info!(
        parsed = summary.reports.len(),
        unsupported = summary.unsupported,
        failed = summary.failed,
        "scan complete"
    );
    if summary.failed > 0 {
        bail!("{} lockfile(s) could not be parsed", summary.failed);
    }

    Ok(())
}
