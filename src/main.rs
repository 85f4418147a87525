//! gcweb-docx - Word to GCWeb HTML converter

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use gcweb_docx::{Config, Policy, StrayContent, StyleMap, convert_path, rebuild_html};

#[derive(Parser)]
#[command(name = "gcweb-docx")]
#[command(version, about = "Convert Word documents to GCWeb HTML", long_about = None)]
#[command(after_help = "EXAMPLES:
    gcweb-docx report.docx -o report.html    Convert a document
    gcweb-docx report.docx                   Print HTML to stdout
    gcweb-docx --html fragment.html          Rebuild markers in converted HTML")]
struct Cli {
    /// Input file (.docx, or HTML with --html)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Extra style mappings (TOML with a [styles] table)
    #[arg(long, value_name = "FILE")]
    style_map: Option<PathBuf>,

    /// Settings file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Treat INPUT as an already converted HTML fragment
    #[arg(long)]
    html: bool,

    /// Keep details content that has no summary as plain paragraphs
    #[arg(long)]
    keep_stray_details: bool,

    /// Suppress conversion warnings
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(quiet: bool) {
    // --quiet ignores RUST_LOG
    let mut builder = if quiet {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(log::LevelFilter::Error);
        builder
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
    };
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{}: {}",
                record.level().as_str().to_ascii_lowercase(),
                record.args()
            )
        })
        .init();
}

fn run(cli: &Cli) -> Result<(), gcweb_docx::Error> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::default(),
    };
    if cli.style_map.is_some() {
        config.style_map = cli.style_map.clone();
    }

    let mut policy = config.policy();
    if cli.keep_stray_details {
        policy = policy.with_stray_details_content(StrayContent::KeepAsParagraph);
    }

    // Loaded in --html mode too, so a broken style map is still reported.
    let map = config.style_map()?;

    let html = if cli.html {
        let fragment = std::fs::read_to_string(&cli.input)?;
        rebuild_html(&fragment, &policy)
    } else {
        convert_docx(&cli.input, &map, &policy)?
    };

    match &cli.output {
        Some(path) => std::fs::write(path, html)?,
        None => print!("{html}"),
    }
    Ok(())
}

fn convert_docx(
    input: &Path,
    map: &StyleMap,
    policy: &Policy,
) -> Result<String, gcweb_docx::Error> {
    let output = convert_path(input, map, policy)?;
    for warning in &output.warnings {
        log::warn!("{warning}");
    }
    log::info!(
        "{}: {} alerts, {} tables, {} details, {} accordions, {} paginations",
        input.display(),
        output.report.alerts,
        output.report.tables,
        output.report.details,
        output.report.accordions,
        output.report.paginations
    );
    Ok(output.html)
}
