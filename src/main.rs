use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use formulanein::config::{Config, ReportConfig};
use formulanein::ergast::{CacheConfig, ErgastClient, FetchError};
use formulanein::output::OutputFormat;
use formulanein::simulation::{Exclusions, SimulationConfig};

const EXIT_SUCCESS: i32 = 0;
const EXIT_NOT_FOUND: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_OUTPUT: i32 = 5;

#[derive(Args, Debug)]
struct ExcludeArgs {
    /// Driver id to leave out (e.g. "hamilton"); repeatable
    #[arg(short = 'd', long = "exclude-driver", value_name = "DRIVER_ID")]
    drivers: Vec<String>,

    /// Constructor id to leave out (e.g. "mercedes"); repeatable
    #[arg(short = 'c', long = "exclude-constructor", value_name = "CONSTRUCTOR_ID")]
    constructors: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Re-run a whole season and show the standings and every race
    Simulate {
        /// Season year, e.g. 2019
        season: u16,

        #[command(flatten)]
        exclude: ExcludeArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the written report in a browser
        #[arg(long)]
        open: bool,
    },
    /// Re-run a single race
    Race {
        /// Season year
        season: u16,
        /// Round number (1-based)
        round: u32,

        #[command(flatten)]
        exclude: ExcludeArgs,
    },
    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Delete all cached season data
    ClearCache,
}

#[derive(Parser, Debug)]
#[command(name = "formulanein")]
#[command(about = "Re-run Formula 1 seasons without selected drivers or constructors", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/formulanein/config.yaml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Bypass the season cache completely
    #[arg(long, global = true)]
    no_cache: bool,

    /// Refetch seasons even if cached, then update the cache
    #[arg(long, global = true, conflicts_with = "no_cache")]
    refresh: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Everything the simulate/race commands share once config is loaded
struct Session {
    config: Config,
    simulation: SimulationConfig,
    max_rounds: u32,
    report_config: ReportConfig,
    cache_config: CacheConfig,
    client: ErgastClient,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    formulanein::logging::init_logging(cli.verbose);
    let start_time = Instant::now();
    let config_path = cli.config.as_deref().map(PathBuf::from);

    match cli.command {
        Commands::Init { force } => {
            match formulanein::config::write_default_config(config_path, force) {
                Ok(path) => println!("Wrote default config to {}", path.display()),
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
        Commands::ClearCache => {
            let cache_dir = load_or_exit(config_path).cache.unwrap_or_default().dir();
            if let Err(e) = formulanein::ergast::clear_cache(&cache_dir) {
                eprintln!("Failed to clear cache: {:#}", e);
                std::process::exit(EXIT_OUTPUT);
            }
            println!("Cleared cache at {}", cache_dir.display());
        }
        Commands::Simulate {
            season,
            exclude,
            format,
            output,
            open,
        } => {
            let session = prepare(config_path, cli.no_cache, cli.refresh);
            let exclusions = merge_exclusions(&session.config, exclude);

            let report = match formulanein::fetch_and_simulate_season(
                &session.client,
                season,
                &exclusions,
                &session.simulation,
                session.max_rounds,
                &session.cache_config,
            )
            .await
            {
                Ok(r) => r,
                Err(e) => exit_for_load_error(e),
            };

            let destination = formulanein::output::report_destination(
                format,
                output,
                &session.report_config,
                season,
            );
            // Colors never go into files
            let use_colors = destination.is_none() && formulanein::output::should_use_colors();

            let rendered = match formulanein::output::render_report(
                &report,
                format,
                &session.report_config,
                use_colors,
            ) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Failed to render report: {:#}", e);
                    std::process::exit(EXIT_OUTPUT);
                }
            };

            match destination {
                Some(path) => {
                    if let Err(e) = formulanein::output::write_report(&path, &rendered) {
                        eprintln!("{:#}", e);
                        std::process::exit(EXIT_OUTPUT);
                    }
                    println!("Wrote {} report to {}", season, path.display());

                    if open {
                        if let Err(e) = formulanein::browser::open_report(&path) {
                            eprintln!("{:#}", e);
                        }
                    }
                }
                None => {
                    if open {
                        eprintln!("--open needs a file; use --format html or --output");
                    }
                    println!("{}", rendered);
                }
            }

            tracing::info!(
                season,
                races = report.races.len(),
                elapsed = ?start_time.elapsed(),
                "done"
            );
        }
        Commands::Race {
            season,
            round,
            exclude,
        } => {
            let session = prepare(config_path, cli.no_cache, cli.refresh);
            let exclusions = merge_exclusions(&session.config, exclude);

            let race = match formulanein::fetch_and_simulate_race(
                &session.client,
                season,
                round,
                &exclusions,
                &session.simulation,
                &session.cache_config,
            )
            .await
            {
                Ok(r) => r,
                Err(e) => exit_for_load_error(e),
            };

            let use_colors = formulanein::output::should_use_colors();
            println!("{}", formulanein::output::format_race(&race, use_colors));
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Load config and build the cache settings and HTTP client, exiting on failure
fn prepare(config_path: Option<PathBuf>, no_cache: bool, refresh: bool) -> Session {
    let config = load_or_exit(config_path);

    let api = config.api.clone().unwrap_or_default();
    let cache_settings = config.cache.clone().unwrap_or_default();

    let (timeout, max_age) = match (api.timeout(), cache_settings.max_age()) {
        (Ok(timeout), Ok(max_age)) => (timeout, max_age),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let cache_config = CacheConfig {
        enabled: cache_settings.enabled() && !no_cache,
        refresh,
        max_age,
        path: cache_settings.dir(),
    };
    tracing::debug!(
        enabled = cache_config.enabled,
        path = %cache_config.path.display(),
        "season cache"
    );

    let client = match formulanein::ergast::create_client(api.base_url(), timeout) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {:#}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    Session {
        simulation: config.simulation.clone().unwrap_or_default(),
        max_rounds: api.max_rounds(),
        report_config: config.report.clone().unwrap_or_default(),
        cache_config,
        client,
        config,
    }
}

/// Load and validate config, exiting with EXIT_CONFIG on any problem
fn load_or_exit(path: Option<PathBuf>) -> Config {
    let config = match formulanein::config::load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = formulanein::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    config
}

/// Config exclusions always apply; command line adds to them
fn merge_exclusions(config: &Config, args: ExcludeArgs) -> Exclusions {
    let mut exclusions: Exclusions = config.exclude.clone().unwrap_or_default().into();
    exclusions.extend(Exclusions::new(args.drivers, args.constructors));

    if !exclusions.is_empty() {
        let (drivers, constructors) = exclusions.sorted();
        tracing::info!(?drivers, ?constructors, "excluding");
    }
    exclusions
}

/// Fetch failures are network errors; anything else means the requested
/// season or round does not exist
fn exit_for_load_error(e: anyhow::Error) -> ! {
    if e.downcast_ref::<FetchError>().is_some() {
        eprintln!("Fetch failed: {:#}", e);
        std::process::exit(EXIT_NETWORK);
    }
    eprintln!("{:#}", e);
    std::process::exit(EXIT_NOT_FOUND);
}
