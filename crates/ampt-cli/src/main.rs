use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ampt_hepmc::OutputFormat;
use ampt_parse::{convert, ConversionConfig, RunReport, TracingObserver};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "ampt2hepmc",
    about = "Convert an AMPT ampt.dat event dump into HepMC event records"
)]
struct Cli {
    /// AMPT text output to read.
    input: PathBuf,
    /// Event file to create.
    output: PathBuf,
    /// YAML file overriding beam, heavy-ion and output settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format (`hepmc2` or `jsonl`), overriding the configuration.
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Write the run report as JSON to this path.
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,
    /// Log every event and sampled particles.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage(err),
    };
    init_logging(cli.verbose);
    match run(&cli) {
        Ok(report) if report.is_complete() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!(error = %err, "conversion aborted");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Help and wrong positional counts print usage and succeed without converting.
fn usage(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        ErrorKind::MissingRequiredArgument
        | ErrorKind::UnknownArgument
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            println!("{}", Cli::command().render_help());
            ExitCode::SUCCESS
        }
        _ => {
            let _ = err.print();
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<RunReport, Box<dyn Error>> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        config.format = format;
    }
    let mut observer = TracingObserver::new(config.particle_log_interval);
    let report = convert(&cli.input, &cli.output, &config, &mut observer)?;

    println!("{}", report.summary_line());
    if let Some(failure) = &report.failure {
        eprintln!("stopped: {failure}");
    }
    if let Some(path) = &cli.summary {
        report.write_json(path)?;
    }
    Ok(report)
}

fn load_config(path: Option<&Path>) -> Result<ConversionConfig, Box<dyn Error>> {
    Ok(match path {
        Some(path) => ConversionConfig::load(path)?,
        None => ConversionConfig::default(),
    })
}
