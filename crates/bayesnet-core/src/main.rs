use std::error::Error;
use std::io;
use std::path::PathBuf;

use bayesnet_core::session::{open_network, OutputFormat, SessionConfig};
use bayesnet_core::Repl;
use bayesnet_sampling::InferenceMethod;
use clap::Parser;
use clap_verbosity_flag::LevelFilter as VerbLevel;
use clap_verbosity_flag::Verbosity;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;

/// Approximate inference over boolean Bayesian networks.
#[derive(Parser, Debug)]
#[command(name = "bayesnet", author, version, about, long_about = None)]
struct Args {
    /// Network definition: `.bn` text, or `.json`.
    file: PathBuf,

    /// 1/direct, 2/rejection or 3/likelihood. Prompted for when absent.
    #[arg(short, long)]
    method: Option<InferenceMethod>,

    /// Samples per query. Prompted for when absent.
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON session config; flags take precedence over it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print each distribution as a JSON object.
    #[arg(long)]
    json: bool,

    //   errors only by default
    //   -q silences logging
    //   -v show warnings
    //   -vv show info
    //   -vvv show debug
    //   -vvvv show trace
    #[command(flatten)]
    verbose: Verbosity,
}

fn verbosity_to_tracing(lvl: VerbLevel) -> LevelFilter {
    match lvl {
        VerbLevel::Off => LevelFilter::OFF,
        VerbLevel::Error => LevelFilter::ERROR,
        VerbLevel::Warn => LevelFilter::WARN,
        VerbLevel::Info => LevelFilter::INFO,
        VerbLevel::Debug => LevelFilter::DEBUG,
        VerbLevel::Trace => LevelFilter::TRACE,
    }
}

fn setup_tracing(lvl: LevelFilter) {
    let format = fmt::format()
        .with_level(true)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .without_time()
        .compact();

    tracing_subscriber::fmt()
        .with_max_level(lvl)
        .with_writer(io::stderr)
        .event_format(format)
        .init();
}

fn session_config(args: &Args) -> Result<SessionConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if args.method.is_some() {
        config.method = args.method;
    }
    if args.samples.is_some() {
        config.samples = args.samples;
    }
    if args.seed.is_some() {
        config.sampler.seed = args.seed;
    }
    if args.json {
        config.output = OutputFormat::Json;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    setup_tracing(verbosity_to_tracing(args.verbose.log_level_filter()));

    let config = session_config(&args)?;
    debug!(?config, "session config");

    let network = open_network(&args.file, &config.compile)?;

    let stdin = io::stdin();
    let mut repl = Repl::new(stdin.lock(), io::stdout());
    repl.run(&args.file.display().to_string(), network, &config)?;
    Ok(())
}
