mod commands;
pub mod error;
pub mod progress;
mod utils;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigOverrides, Settings};
use crate::remote::LokaliseClient;
use crate::sync::PushRequest;
use error::CliResult;
use progress::ConsoleProgress;

#[derive(Parser)]
#[command(name = "lokalise")]
#[command(author, version, about = "Sync gettext translation files with Lokalise", long_about = None)]
pub struct Cli {
    /// Config file (default: .lokalise.yml in the current directory, if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Lokalise project id (default: LOKALISE_PROJECT_ID env or config file)
    #[arg(long, global = true)]
    pub project: Option<String>,

    /// Lokalise API token (default: LOKALISE_API_TOKEN env or config file)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Override the API URL (default: LOKALISE_API_URL env or https://lokalise.co/api/)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download all translations from Lokalise into the locale folder
    Pull {
        /// Comma-separated locales to download. All locales by default
        #[arg(short, long)]
        locales: Option<String>,
    },
    /// Upload the translation templates (.pot) and merge them upstream
    Push {
        /// Comma-separated locales to update. The default locale if omitted
        #[arg(short, long)]
        locales: Option<String>,
        /// Comma-separated tags for the uploaded keys
        #[arg(long)]
        tags: Option<String>,
        /// Hide the new strings in the Lokalise interface
        #[arg(long)]
        hidden: bool,
    },
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            project_id: self.project.clone(),
            api_token: self.token.clone(),
            api_url: self.api_url.clone(),
        }
    }
}

/// Initialize tracing subscriber with env filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "lokalise_sync=debug"
    } else {
        "lokalise_sync=warn"
    };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = execute(cli).await?;
    println!("{}", output);
    Ok(())
}

async fn execute(cli: Cli) -> CliResult<String> {
    let settings = Settings::load(&cli.overrides())?;
    let client = LokaliseClient::new(&settings.project, &settings.sync);

    match cli.command {
        Commands::Pull { locales } => {
            let locales = utils::parse_list(locales.as_deref());
            commands::pull::pull(&client, &settings, &locales).await
        }
        Commands::Push {
            locales,
            tags,
            hidden,
        } => {
            let request = PushRequest {
                locales: utils::parse_list(locales.as_deref()),
                tags: utils::parse_list(tags.as_deref()),
                hidden,
            };
            println!("{}", commands::push::upload_notice(settings.sync.throttle));
            let mut progress = ConsoleProgress::new();
            let result = commands::push::push(&client, &settings, &request, &mut progress).await;
            progress.end_line();
            result
        }
    }
}
