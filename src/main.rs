//! ka9s - A K9s-inspired terminal dashboard for kube-applier Waybill status
//!
//! Polls the kube-applier status API and shows the last apply run of every
//! Waybill, with fuzzy namespace search and per-namespace detail panels.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ka9s::cli::{
    ConfigSubcommand, OutputFormat, StatusOptions, display_version, handle_config_command,
    init_logging, run_status,
};
use ka9s::config::{Config, ConfigLoader};
use ka9s::dashboard::Route;
use ka9s::search::SearchOptions;
use ka9s::source::{FileStatusSource, HttpStatusSource, StatusSource};
use ka9s::view::Outcome;
use std::path::PathBuf;
use std::sync::Arc;

/// ka9s - A K9s-inspired terminal dashboard for kube-applier Waybill status
#[derive(Parser, Debug)]
#[command(name = "ka9s")]
#[command(about = "A K9s-inspired terminal dashboard for kube-applier Waybill status", long_about = None)]
struct Args {
    /// Base URL of the kube-applier status API (overrides config)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Start in a single namespace
    #[arg(long, short = 'n')]
    namespace: Option<String>,

    /// Read the status snapshot from a JSON file instead of the API
    #[arg(long, global = true)]
    from_file: Option<PathBuf>,

    /// Automatic refresh period, e.g. "30s" ("0s" disables)
    #[arg(long)]
    refresh: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Print Waybill status once and exit
    Status {
        /// Namespace to show (all namespaces when omitted)
        namespace: Option<String>,

        /// Fuzzy namespace search
        #[arg(long, short = 'q')]
        query: Option<String>,

        /// Only show one outcome: pending, failure, warning or success
        #[arg(long, short = 'f', value_parser = parse_outcome)]
        filter: Option<Outcome>,

        /// Show run details for every Waybill
        #[arg(long, short = 'e')]
        expand: bool,

        /// Output format
        #[arg(long, short = 'o', value_enum, default_value_t)]
        output: OutputFormat,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Show version information
    Version,
}

fn parse_outcome(s: &str) -> Result<Outcome, String> {
    Outcome::parse(s).ok_or_else(|| {
        format!(
            "unknown outcome '{}', expected one of: pending, failure, warning, success",
            s
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args {
        api_url,
        namespace,
        from_file,
        refresh,
        debug,
        command,
    } = Args::parse();

    let command = match command {
        Some(Command::Config { subcommand }) => return handle_config_command(subcommand),
        Some(Command::Version) => {
            display_version();
            return Ok(());
        }
        other => other,
    };

    let log_file = init_logging(debug);
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let mut config = ConfigLoader::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration: {:#}, using defaults", e);
        ConfigLoader::load_defaults()
    });

    // Command line flags take precedence over file and environment
    if let Some(url) = api_url {
        config.api_url = url;
    }
    if let Some(interval) = refresh {
        config.refresh_interval = interval;
    }
    ConfigLoader::check(&config).context("Invalid configuration")?;

    tracing::debug!(
        "Configuration loaded: apiUrl={}, requestTimeout={}, refreshInterval={}",
        config.api_url,
        config.request_timeout,
        config.refresh_interval
    );

    let source = build_source(from_file, &config)?;
    tracing::info!("Using {} source at {}", source.source_type(), source.describe());

    let search = SearchOptions {
        threshold: config.search.threshold,
    };

    match command {
        Some(Command::Status {
            namespace: positional,
            query,
            filter,
            expand,
            output,
        }) => {
            let route = initial_route(positional.or(namespace), &config);
            let options = StatusOptions {
                route,
                query,
                outcome: filter,
                expand,
                search,
            };
            if !run_status(source, options, output).await? {
                std::process::exit(1);
            }
            Ok(())
        }
        _ => run_dashboard(source, initial_route(namespace, &config), config).await,
    }
}

fn initial_route(namespace: Option<String>, config: &Config) -> Route {
    let namespace = namespace.unwrap_or_else(|| config.default_namespace.clone());
    Route::from_namespace(Some(&namespace))
}

fn build_source(from_file: Option<PathBuf>, config: &Config) -> Result<Arc<dyn StatusSource>> {
    if let Some(path) = from_file {
        return Ok(Arc::new(FileStatusSource::new(path)));
    }
    let timeout = ConfigLoader::request_timeout(config)?;
    let source = HttpStatusSource::new(&config.api_url, timeout)
        .with_context(|| format!("Failed to create status client for {}", config.api_url))?;
    Ok(Arc::new(source))
}

#[cfg(feature = "tui")]
async fn run_dashboard(source: Arc<dyn StatusSource>, route: Route, config: Config) -> Result<()> {
    let refresh_interval = ConfigLoader::refresh_interval(&config)?;
    ka9s::tui::run_tui(
        source,
        route,
        config,
        refresh_interval,
        ka9s::tui::Theme::default(),
    )
    .await
}

#[cfg(not(feature = "tui"))]
async fn run_dashboard(_source: Arc<dyn StatusSource>, _route: Route, _config: Config) -> Result<()> {
    anyhow::bail!("ka9s was built without the \"tui\" feature; use `ka9s status` instead")
}
