//! Tally CLI - preview, fetch and render animated counters.

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

mod config;
mod preview;

use clap::{Parser, Subcommand, ValueEnum};
use config::TallyConfig;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tally_core::{CounterSpec, Locale};
use tally_loader::{
    default_blogs, default_counters, default_features, default_slides, HttpSource, LoadState,
    Loader,
};
use tally_widgets::{render_with, Variant, DEFAULT_FPS};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Animated statistic counters with offline fallbacks")]
#[command(version)]
struct Cli {
    /// Configuration file (default: tally.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate the counters section in the terminal
    Preview {
        /// Counters endpoint (default: from config)
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Display variant (default: from config)
        #[arg(long)]
        variant: Option<Variant>,

        /// Frames per second
        #[arg(long, default_value_t = DEFAULT_FPS)]
        fps: u32,
    },

    /// Fetch one content section and print it as JSON
    Fetch {
        /// Which section to fetch
        #[arg(value_enum)]
        section: Section,
    },

    /// Print the view of a single counter as JSON
    Render {
        /// Target value
        #[arg(long, allow_negative_numbers = true)]
        value: i64,

        /// Text appended to the number
        #[arg(short, long, default_value = "")]
        suffix: String,

        /// Displayed value (default: the target)
        #[arg(short, long)]
        displayed: Option<u64>,

        /// Display variant
        #[arg(long, default_value = "card")]
        variant: Variant,

        /// Number grouping locale
        #[arg(long, default_value = "en-US")]
        locale: Locale,

        /// Counter label
        #[arg(short, long, default_value = "Counter")]
        label: String,
    },

    /// Print the default configuration as TOML
    InitConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum Section {
    Counters,
    Slides,
    Blogs,
    Features,
}

/// What `fetch` prints: the resolved data and the error, if any.
#[derive(Serialize)]
struct FetchOutput<T> {
    data: Vec<T>,
    error: Option<String>,
}

impl<T> From<LoadState<T>> for FetchOutput<T> {
    fn from(state: LoadState<T>) -> Self {
        Self {
            data: state.data,
            error: state.error,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn source(config: &TallyConfig) -> HttpSource {
    HttpSource::new(config.api_base_url.clone()).with_timeout(config.timeout())
}

async fn fetch_json<T>(
    config: &TallyConfig,
    endpoint: &str,
    fallback: Arc<[T]>,
) -> Result<String, serde_json::Error>
where
    T: Serialize + serde::de::DeserializeOwned + Clone + Send + Sync + 'static,
{
    let loader = Loader::new(Arc::new(source(config)), fallback);
    let output = FetchOutput::from(loader.load(endpoint).await);
    serde_json::to_string_pretty(&output)
}

async fn fetch(config: &TallyConfig, section: Section) -> Result<String, serde_json::Error> {
    let endpoints = &config.endpoints;
    match section {
        Section::Counters => {
            fetch_json::<CounterSpec>(config, &endpoints.counters, default_counters()).await
        }
        Section::Slides => fetch_json(config, &endpoints.slides, default_slides()).await,
        Section::Blogs => fetch_json(config, &endpoints.blogs, default_blogs()).await,
        Section::Features => fetch_json(config, &endpoints.features, default_features()).await,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::InitConfig => {
            print!("{}", TallyConfig::default_toml()?);
        }
        Commands::Render {
            value,
            suffix,
            displayed,
            variant,
            locale,
            label,
        } => {
            if value < 0 {
                return Err(format!("value must not be negative, got {value}").into());
            }
            let spec = CounterSpec::new(1u64, label, value).with_suffix(suffix);
            let displayed = displayed.unwrap_or_else(|| spec.target_value());
            let view = render_with(&spec, displayed, variant, locale);
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Commands::Fetch { section } => {
            let config = TallyConfig::load(cli.config.as_deref())?;
            println!("{}", fetch(&config, section).await?);
        }
        Commands::Preview {
            endpoint,
            variant,
            fps,
        } => {
            let mut config = TallyConfig::load(cli.config.as_deref())?;
            if let Some(variant) = variant {
                config.section.variant = variant;
            }
            let endpoint = endpoint.unwrap_or_else(|| config.endpoints.counters.clone());
            preview::run(&config, &endpoint, fps.max(1)).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "tally",
            "render",
            "--value",
            "1200",
            "--suffix",
            "+",
            "--variant",
            "circular",
            "--locale",
            "de-DE",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                value,
                suffix,
                variant,
                locale,
                displayed,
                ..
            } => {
                assert_eq!(value, 1200);
                assert_eq!(suffix, "+");
                assert_eq!(variant, Variant::Circular);
                assert_eq!(locale, Locale::DeDe);
                assert_eq!(displayed, None);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_unknown_variant_rejected() {
        assert!(Cli::try_parse_from(["tally", "preview", "--variant", "hexagon"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["tally", "fetch", "blogs", "--config", "x.toml", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(
            cli.command,
            Commands::Fetch {
                section: Section::Blogs
            }
        ));
    }
}
