//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use modelboard_core::config::Config;
use modelboard_core::filter::{ContextRange, FilterState, Moderation, PriceRange, parse_price};
use modelboard_core::{Locale, logging};

mod commands;

#[derive(Parser)]
#[command(name = "modelboard")]
#[command(version)]
#[command(about = "Browse and filter the OpenRouter AI model catalog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Display language (en, ar); overrides the config file
    #[arg(long, global = true, env = "MODELBOARD_LOCALE", value_name = "LOCALE")]
    locale: Option<Locale>,

    /// Read the catalog from a snapshot file instead of the network
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the full-screen model browser (default)
    Browse {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// List, inspect and snapshot models
    Models {
        #[command(subcommand)]
        command: ModelsCommands,
    },
    /// Browse model providers
    Providers {
        #[command(subcommand)]
        command: ProvidersCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ModelsCommands {
    /// Print one page of models matching the filters
    List(ListArgs),
    /// Show every detail of one model
    Show {
        /// Model id, e.g. openai/gpt-4o
        #[arg(value_name = "MODEL_ID")]
        id: String,
    },
    /// Fetch the catalog and write it to a JSON snapshot
    Snapshot {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

#[derive(clap::Subcommand)]
enum ProvidersCommands {
    /// List providers with their model counts and sample models
    List {
        /// Case-insensitive match on provider name or slug
        #[arg(long, short)]
        search: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults (for xtask)
    Generate,
    /// Save the display language to the config file
    Locale {
        #[arg(value_name = "LOCALE")]
        locale: Locale,
    },
}

/// Filter criteria shared by `browse` and `models list`.
#[derive(clap::Args, Debug, Clone, Default)]
struct FilterArgs {
    /// Match against model name, id, description and provider name
    #[arg(long, short)]
    search: Option<String>,

    /// Provider slug to include (repeatable)
    #[arg(long = "provider", value_name = "SLUG")]
    providers: Vec<String>,

    /// Modality tag to include, e.g. text or text+image (repeatable)
    #[arg(long = "modality", value_name = "TAG")]
    modalities: Vec<String>,

    /// Minimum prompt price per token
    #[arg(long, value_name = "PRICE", value_parser = price_arg)]
    min_price: Option<f64>,

    /// Maximum prompt price per token
    #[arg(long, value_name = "PRICE", value_parser = price_arg)]
    max_price: Option<f64>,

    /// Minimum context length in tokens
    #[arg(long, value_name = "TOKENS")]
    min_context: Option<u64>,

    /// Maximum context length in tokens
    #[arg(long, value_name = "TOKENS")]
    max_context: Option<u64>,

    /// Only moderated models
    #[arg(long, conflicts_with = "unmoderated")]
    moderated: bool,

    /// Only unmoderated models
    #[arg(long)]
    unmoderated: bool,
}

impl FilterArgs {
    fn to_filter_state(&self) -> FilterState {
        let moderation = if self.moderated {
            Moderation::Moderated
        } else if self.unmoderated {
            Moderation::Unmoderated
        } else {
            Moderation::Any
        };

        FilterState {
            search: self.search.clone().unwrap_or_default(),
            providers: dedup(&self.providers),
            price_range: PriceRange::new(self.min_price, self.max_price),
            context_length: ContextRange::new(self.min_context, self.max_context),
            modalities: dedup(&self.modalities),
            moderation,
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
struct ListArgs {
    #[command(flatten)]
    filters: FilterArgs,

    /// Page to show (1-based); out-of-range pages show page 1
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Models per page (default from config)
    #[arg(long, value_name = "N")]
    page_size: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn price_arg(raw: &str) -> Result<f64, String> {
    parse_price(raw).ok_or_else(|| format!("'{raw}' is not a non-negative price"))
}

/// Keeps the first occurrence of each non-blank value.
fn dedup(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
        if !out.iter().any(|seen| seen == value) {
            out.push(value.to_string());
        }
    }
    out
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // The browser owns the terminal, so it logs to a file instead.
    if !matches!(cli.command, None | Some(Commands::Browse { .. })) {
        logging::init_stderr("warn");
    }

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load().context("load config")?;
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }

    let Cli {
        command,
        locale: _,
        catalog,
    } = cli;
    let catalog = catalog.as_deref();

    let Some(command) = command else {
        return commands::browse::run(&config, catalog, FilterState::default()).await;
    };

    match command {
        Commands::Browse { filters } => {
            commands::browse::run(&config, catalog, filters.to_filter_state()).await
        }

        Commands::Models { command } => match command {
            ModelsCommands::List(args) => {
                commands::models::list(
                    &config,
                    catalog,
                    &commands::models::ListOptions {
                        filters: args.filters.to_filter_state(),
                        page: args.page,
                        page_size: args.page_size,
                        json: args.json,
                    },
                )
                .await
            }
            ModelsCommands::Show { id } => commands::models::show(&config, catalog, &id).await,
            ModelsCommands::Snapshot { path } => {
                commands::models::snapshot(&config, catalog, &path).await
            }
        },

        Commands::Providers { command } => match command {
            ProvidersCommands::List { search, json } => {
                commands::providers::list(&config, catalog, search.as_deref(), json).await
            }
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
            ConfigCommands::Locale { locale } => commands::config::locale(locale),
        },
    }
}
