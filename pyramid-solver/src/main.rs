use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pyramid_solver::{PathReport, Pyramid, find_path};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "pyramid-solver")]
#[command(about = "Finds a path through a pyramid map that collects every treasure", long_about = None)]
struct Args {
    /// Map file (defaults to PYRAMID_MAP environment variable if not provided)
    map: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also print the map with visited chambers marked
    #[arg(long)]
    render: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// RUST_LOG directives, with `-v` raising the global level on top of them.
fn log_filter(verbose: u8, env: Option<&str>) -> EnvFilter {
    let filter = env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    let level = match verbose {
        0 => return filter,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    filter.add_directive(level.into())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(args.verbose, std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let map_path = args
        .map
        .or_else(|| std::env::var_os("PYRAMID_MAP").map(PathBuf::from))
        .context("No map file given; pass one or set PYRAMID_MAP")?;

    let mut pyramid = Pyramid::from_file(&map_path)
        .with_context(|| format!("Failed to load pyramid map {}", map_path.display()))?;

    let exploration = find_path(&mut pyramid);
    let report = PathReport::new(map_path.display().to_string(), &pyramid, &exploration);

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("=== Pyramid Solver ===");
            println!("Map: {}", report.map);
            println!(
                "Treasures: {}/{}",
                report.treasures_found, report.treasures_total
            );
            println!("Pushes: {}, pops: {}", report.pushes, report.pops);
            if report.complete {
                println!("✅ Path: {}", report.render_trail());
            } else {
                println!("❌ No path collects every treasure");
            }
        }
    }

    if args.render {
        // keep stdout parseable in JSON mode
        match args.format {
            OutputFormat::Json => eprint!("{}", pyramid.render()),
            OutputFormat::Text => print!("\n{}", pyramid.render()),
        }
    }

    Ok(())
}
