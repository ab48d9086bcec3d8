use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use audit_report_core::PageBatch;
use audit_report_html::{ReportSession, write_codes_report};
use audit_report_store::ReporterConfig;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "audit-report")]
#[command(about = "Static HTML reports for accessibility audit results", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report a batch of pages: per-page reports, index and JSON snapshots.
    Pages(PagesArgs),
    /// Build the per-code report from the recorded results.json.
    Codes(CodesArgs),
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Output directory for reports and snapshots.
    #[arg(long)]
    output: Option<PathBuf>,
    /// YAML reporter configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Heading for index pages (overrides the configuration).
    #[arg(long)]
    title: Option<String>,
    /// CSS file inlined into every page (overrides the configuration).
    #[arg(long)]
    stylesheet: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct PagesArgs {
    #[command(flatten)]
    common: OutputArgs,
    /// JSON array of `{"url": ..., "results": [...]}` batches, or `-` for stdin.
    #[arg(long)]
    input: PathBuf,
}

#[derive(Debug, Args)]
struct CodesArgs {
    #[command(flatten)]
    common: OutputArgs,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Pages(args) => run_pages(args),
        Command::Codes(args) => run_codes(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_pages(args: PagesArgs) -> Result<(), String> {
    let config = resolve_config(&args.common)?;
    let batches = read_batches(&args.input)?;

    let mut session = ReportSession::open(&config).map_err(|err| err.to_string())?;
    for batch in batches {
        let page = session
            .report_page(batch.results, &batch.url)
            .map_err(|err| format!("Failed to report '{}': {err}", batch.url))?;
        println!(
            "{}: {} errors, {} warnings, {} notices -> {}",
            page.url,
            page.counts.error,
            page.counts.warning,
            page.counts.notice,
            page.report_url
        );
    }
    let pages = session.state().len();
    let dir = session.output_directory().to_path_buf();
    session.close().map_err(|err| err.to_string())?;

    println!("Reported {pages} page(s) to {}", dir.display());
    Ok(())
}

fn run_codes(args: CodesArgs) -> Result<(), String> {
    let config = resolve_config(&args.common)?;
    let codes = write_codes_report(&config).map_err(|err| err.to_string())?;

    for code in &codes {
        println!("{:>6}  {}", code.instances, code.code);
    }
    println!(
        "Wrote {} code report(s) to {}",
        codes.len(),
        config.output_directory.display()
    );
    Ok(())
}

fn resolve_config(args: &OutputArgs) -> Result<ReporterConfig, String> {
    let mut config = match (&args.config, &args.output) {
        (Some(path), output) => {
            let mut config = ReporterConfig::load(path).map_err(|err| {
                format!("Failed to load config '{}': {err}", path.display())
            })?;
            if let Some(output) = output {
                config.output_directory = output.clone();
            }
            config
        }
        (None, Some(output)) => ReporterConfig::new(output),
        (None, None) => {
            return Err("Specify an output directory with --output or --config".to_string());
        }
    };

    if let Some(title) = &args.title {
        config.title = Some(title.clone());
    }
    if let Some(stylesheet) = &args.stylesheet {
        config.stylesheet = Some(stylesheet.clone());
    }
    Ok(config)
}

fn read_batches(input: &Path) -> Result<Vec<PageBatch>, String> {
    let raw = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|err| format!("Failed to read stdin: {err}"))?;
        buf
    } else {
        fs::read_to_string(input)
            .map_err(|err| format!("Failed to read '{}': {err}", input.display()))?
    };
    serde_json::from_str(&raw).map_err(|err| format!("Invalid page batches: {err}"))
}
