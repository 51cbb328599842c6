//! Command-line interface for `s57tiler`.
//!
//! Opens an S-57 chart through GDAL, prints every layer it contains and writes each layer as
//! a GeoJSON file into the output directory. Optionally the GeoJSON is cut into an MBTiles
//! tile set with tippecanoe. The `style` and `config` subcommands write the Mapbox GL styles
//! and the TileServer-GL configuration used to serve the tiles.
//!
//! # Architecture
//!
//! The CLI is built using [`clap`] for argument parsing and [`tracing`] for structured logging.
//! It parses arguments, configures logging, and delegates to [`s57tiler_core`]. GDAL work is
//! blocking and runs on the tokio blocking pool.

mod display;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use tracing::{Level, info, warn};
use tracing_log::LogTracer;
use tracing_subscriber::FmtSubscriber;

use s57tiler_core::chart::S57Chart;
use s57tiler_core::error::S57Error;
use s57tiler_core::export::render_geojson;
use s57tiler_core::mbtiles::{generate_mbtiles, remove_geojson};
use s57tiler_core::options::{S57_OPTIONS_KEY, S57Options};
use s57tiler_core::style::{base_url, create_config, create_style};
use s57tiler_core::types::{LayerFilter, RenderOptions};

const USAGE_HINT: &str = "Please supply 2 arguments:\n\
                          1 - The S57 Chart file path.\n\
                          2 - The output directory for the chart's geojson layers.";

#[derive(Parser)]
#[command(
    name = "s57tiler",
    version,
    about = "Renders S57 marine chart files into geojson and/or Mapbox MBTiles",
    long_about = "Opens an IHO S-57 chart with the GDAL S57 driver and writes one GeoJSON\n\
                  file per chart layer into the output directory.",
    subcommand_negates_reqs = true,
    args_conflicts_with_subcommands = true
)]
/// Command-line arguments and options for the `s57tiler` CLI.
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// The S57 chart file path, usually ending in .000
    #[arg(value_name = "CHART", required = true)]
    chart: Option<PathBuf>,

    /// The output directory for the chart's GeoJSON layers
    #[arg(value_name = "OUT_DIR", required = true)]
    out_dir: Option<PathBuf>,

    /// Enable verbose (INFO level) logging output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug (DEBUG level) logging output with detailed diagnostics.
    #[arg(short, long, global = true)]
    debug: bool,

    /// Pretty print the GeoJSON output.
    #[arg(long)]
    pretty: bool,

    /// Include only the comma separated list of layers.
    #[arg(short = 'n', long, value_name = "LAYERS", value_delimiter = ',')]
    include: Option<Vec<String>>,

    /// Exclude the comma separated list of layers.
    #[arg(short = 'x', long, value_name = "LAYERS", value_delimiter = ',')]
    exclude: Option<Vec<String>>,

    /// List the chart's layers and exit without writing anything.
    #[arg(long)]
    list: bool,

    /// Generate chart.mbtiles from the rendered layers with tippecanoe.
    #[arg(long)]
    mbtiles: bool,

    /// Keep the generated GeoJSON after building MBTiles.
    #[arg(short = 'g', long, requires = "mbtiles")]
    keep_geojson: bool,

    /// GDAL S57 driver options.
    #[arg(
        long,
        value_name = "OPTIONS",
        env = S57_OPTIONS_KEY,
        default_value_t = S57Options::default()
    )]
    s57_options: S57Options,
}

#[derive(Subcommand)]
enum Commands {
    /// Generates Mapbox GL styles for every colour scheme and depth unit
    Style {
        /// Socket address or host name the styles are served from, e.g. localhost:8080
        #[arg(short, long)]
        socket_address: String,

        /// Serve the styles over https instead of http
        #[arg(short, long)]
        tls: bool,

        /// The output directory for the styles
        #[arg(short = 'o', long = "output", value_name = "OUT_DIR")]
        out_dir: PathBuf,
    },

    /// Generates a TileServer-GL config
    Config {
        /// Comma separated socket addresses or host names the tiles are served from
        #[arg(short, long, value_delimiter = ',', required = true)]
        socket_address: Vec<String>,

        /// The output directory for config.json
        #[arg(short = 'o', long = "output", value_name = "OUT_DIR")]
        out_dir: PathBuf,
    },
}

/// Parses arguments, exiting with status 1 when they are wrong.
///
/// The usage hint is printed when the chart arguments are at fault.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        },
        Err(e) => {
            let _ = e.print();
            if !names_subcommand(std::env::args().nth(1).as_deref()) {
                println!("{USAGE_HINT}");
            }
            std::process::exit(1);
        },
    }
}

fn names_subcommand(arg: Option<&str>) -> bool {
    arg.is_some_and(|name| Cli::command().find_subcommand(name).is_some())
}

/// Entry point for the `s57tiler` command-line interface.
///
/// # Errors
///
/// Returns an error if logging cannot be initialized. Chart, export and style failures are
/// reported on stderr and the process still exits with status 0.
#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = parse_args();

    let log_level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    // Bridge logs from the `log` crate to the `tracing` ecosystem.
    LogTracer::init()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let result = match cli.command.take() {
        Some(Commands::Style {
            socket_address,
            tls,
            out_dir,
        }) => handle_style(base_url(&socket_address, tls), out_dir).await,
        Some(Commands::Config {
            socket_address,
            out_dir,
        }) => handle_config(socket_address, out_dir).await,
        None => handle_chart(cli).await,
    };

    if let Err(e) = result {
        match e.downcast_ref::<S57Error>() {
            Some(err) => {
                eprintln!("Error: {}", err.user_message());
                if let Some(suggestion) = err.recovery_suggestion() {
                    eprintln!("hint: {suggestion}");
                }
            },
            None => eprintln!("Error: {e:#}"),
        }
    }
    Ok(())
}

async fn handle_chart(cli: Cli) -> Result<()> {
    let (Some(chart), Some(out_dir)) = (cli.chart.clone(), cli.out_dir.clone()) else {
        bail!("a chart file and an output directory are required");
    };
    if cli.list {
        handle_list(chart, cli.s57_options).await
    } else {
        handle_render(cli, chart, out_dir).await
    }
}

async fn handle_list(chart: PathBuf, s57_options: S57Options) -> Result<()> {
    info!("Listing layers of {}", chart.display());
    let layers = tokio::task::spawn_blocking(move || {
        S57Chart::open(&chart, &s57_options).map(|chart| chart.layers())
    })
    .await??;
    display::display_layers(&layers);
    Ok(())
}

async fn handle_render(cli: Cli, chart_path: PathBuf, out_dir: PathBuf) -> Result<()> {
    info!("Rendering {} to {}", chart_path.display(), out_dir.display());
    let render_options = RenderOptions {
        pretty: cli.pretty,
        filter: LayerFilter::new(cli.include, cli.exclude),
    };
    let s57_options = cli.s57_options;

    let summary = tokio::task::spawn_blocking(move || {
        let mut chart = S57Chart::open(&chart_path, &s57_options)?;
        render_geojson(&mut chart, &out_dir, &render_options)
    })
    .await??;
    display::display_summary(&summary);

    if cli.mbtiles {
        let files = summary.files();
        if files.is_empty() {
            warn!("No layers were rendered; skipping MBTiles generation");
            return Ok(());
        }
        generate_mbtiles(&summary.out_dir, &files).await?;
        if !cli.keep_geojson {
            remove_geojson(&files).await?;
        }
    }
    info!("Rendering complete.");
    Ok(())
}

async fn handle_style(base_url: String, out_dir: PathBuf) -> Result<()> {
    info!("Writing styles served from {base_url} to {}", out_dir.display());
    let written =
        tokio::task::spawn_blocking(move || create_style(&out_dir, &base_url)).await??;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

async fn handle_config(domains: Vec<String>, out_dir: PathBuf) -> Result<()> {
    info!("Writing TileServer-GL config to {}", out_dir.display());
    let path = tokio::task::spawn_blocking(move || create_config(&out_dir, &domains)).await??;
    println!("{}", path.display());
    Ok(())
}
