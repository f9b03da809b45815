use anyhow::{Context, Result};
use bandage::ingest::FallbackPolicy;
use bandage::probe::{FfprobeProber, MetadataProber, StubProber};
use bandage::timestamp::format::format_short;
use bandage::{ExtractedTimestamp, IngestConfig, IngestPipeline, Precision};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bandage")]
#[command(about = "Catalogue audio recordings and infer their recording dates", long_about = None)]
struct Args {
    /// Audio files or directories to process
    #[arg(required = true)]
    paths: Vec<String>,

    /// Walk directories recursively
    #[arg(short = 'r', long)]
    recursive: bool,

    /// Don't run ffprobe; take title and format from the path only
    #[arg(long)]
    no_probe: bool,

    /// ffprobe executable
    #[arg(long, default_value = "ffprobe")]
    ffprobe: PathBuf,

    /// Recording time for every file (RFC 3339), instead of inferring it
    #[arg(long, value_parser = parse_rfc3339)]
    at: Option<DateTime<Utc>>,

    /// Timestamp to use when a path contains no recognisable date
    #[arg(long, value_enum, default_value_t = FallbackArg::Now)]
    fallback: FallbackArg,

    /// Print the catalogue as JSON
    #[arg(long)]
    json: bool,

    /// Only run date inference on the given strings (no file access)
    #[arg(long)]
    infer_only: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FallbackArg {
    /// Current time
    Now,
    /// File modification time
    Mtime,
}

fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if args.infer_only {
        infer_only(&args.paths);
        return Ok(());
    }

    // Expand ~ in paths
    let inputs: Vec<PathBuf> = args
        .paths
        .iter()
        .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
        .collect();

    let mut config = IngestConfig::new()
        .recursive(args.recursive)
        .with_fallback(match args.fallback {
            FallbackArg::Now => FallbackPolicy::Now,
            FallbackArg::Mtime => FallbackPolicy::FileModified,
        });

    if let Some(at) = args.at {
        log::info!("Using explicit recording time {} for all files", at);
        config = config.with_explicit_timestamp(ExtractedTimestamp::new(at, Precision::Seconds));
    }

    // Use ffprobe for tag/format metadata, or StubProber if disabled
    if args.no_probe {
        run(IngestPipeline::new(config, StubProber::new()), &inputs, args.json)
    } else {
        let prober = FfprobeProber::new().with_binary(&args.ffprobe);
        run(IngestPipeline::new(config, prober), &inputs, args.json)
    }
}

fn run<P: MetadataProber>(pipeline: IngestPipeline<P>, inputs: &[PathBuf], json: bool) -> Result<()> {
    let catalogue = pipeline.ingest(inputs).context("Ingest failed")?;

    if json {
        println!("{}", catalogue.to_json()?);
        return Ok(());
    }

    for track in catalogue.newest_first() {
        println!(
            "{}\t{}\t{}\t{}",
            format_short(&track.recorded_at, track.recorded_precision),
            track.recorded_precision,
            track.timestamp_source.as_str(),
            track.display_name()
        );
    }

    Ok(())
}

fn infer_only(paths: &[String]) {
    for path in paths {
        match bandage::infer(path) {
            Ok(Some(extracted)) => println!(
                "{}\t{}\t{}",
                path,
                format_short(&extracted.timestamp, extracted.precision),
                extracted.precision
            ),
            Ok(None) => println!("{}\tno match", path),
            Err(e) => log::error!("{}: {}", path, e),
        }
    }
}
