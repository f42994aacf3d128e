use anyhow::Result;
use clap::{Parser, Subcommand};
use homegenius_application::AppContext;
use homegenius_core::analysis::AnalysisType;
use homegenius_core::property::{DEFAULT_FEATURED_LIMIT, PropertyId};
use homegenius_core::recommendation::DEFAULT_RECOMMENDATION_LIMIT;
use homegenius_core::state::StateRepository;
use homegenius_infrastructure::{ConfigService, InMemoryStateRepository, TomlStateRepository};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "homegenius")]
#[command(about = "HomeGenius CLI - AI-assisted real-estate search", long_about = None)]
struct Cli {
    /// Log requests and state transitions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding config.toml and state.toml
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Backend base URL, overriding config and HOMEGENIUS_API_URL
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Keep the session in memory only; nothing is read from or written to state.toml
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search listings
    Search {
        /// Free-text query
        query: Option<String>,
        /// Filter as key=value (min_price, max_price, min_area, max_area, rooms,
        /// bedrooms, bathrooms, property_type, city, postal_code)
        #[arg(short, long = "filter", value_name = "KEY=VALUE", value_parser = commands::catalog::parse_filter)]
        filters: Vec<(String, String)>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show featured listings
    Featured {
        #[arg(long, default_value_t = DEFAULT_FEATURED_LIMIT)]
        limit: u32,
    },
    /// Show one listing
    Show { id: PropertyId },
    /// Create, update or delete listings
    Property {
        #[command(subcommand)]
        action: PropertyAction,
    },
    /// Sign in and remember the access token
    Login {
        username: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        username: String,
        email: String,
        #[arg(long)]
        full_name: Option<String>,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the access token
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Show or change account preferences
    Preferences {
        #[command(subcommand)]
        action: PreferencesAction,
    },
    /// List, show or change the display locale
    Locale {
        #[command(subcommand)]
        action: LocaleAction,
    },
    /// Run an AI analysis
    Analyze {
        #[command(subcommand)]
        action: AnalyzeAction,
    },
    /// Past analyses of a listing
    History {
        id: PropertyId,
        #[arg(long = "type")]
        analysis_type: Option<AnalysisType>,
    },
    /// Predicted price of a listing
    Price { id: PropertyId },
    /// Known style categories
    Styles,
    /// Property recommendations
    Recommend {
        #[command(subcommand)]
        action: RecommendAction,
    },
}

#[derive(Subcommand)]
enum PropertyAction {
    /// Create a listing from a JSON file
    Create { file: PathBuf },
    /// Apply a JSON patch file to a listing
    Update { id: PropertyId, file: PathBuf },
    Delete { id: PropertyId },
}

#[derive(Subcommand)]
enum PreferencesAction {
    Show,
    /// Set one preference; VALUE is parsed as JSON, falling back to a string
    Set { key: String, value: String },
}

#[derive(Subcommand)]
enum LocaleAction {
    List,
    Show,
    Set { id: String },
}

#[derive(Subcommand)]
enum AnalyzeAction {
    /// Analyze a stored listing
    Property {
        id: PropertyId,
        #[arg(long = "type", default_value = "combined")]
        analysis_type: AnalysisType,
    },
    /// Upload a photo for analysis
    Image {
        path: PathBuf,
        /// Attach the analysis to a listing
        #[arg(long)]
        property: Option<PropertyId>,
        #[arg(long = "type", default_value = "style")]
        analysis_type: AnalysisType,
    },
}

#[derive(Subcommand)]
enum RecommendAction {
    /// Personal recommendations (defaults to the signed-in user)
    User {
        #[arg(long)]
        user_id: Option<i64>,
        #[arg(long = "type")]
        recommendation_type: Option<String>,
        #[arg(long, default_value_t = DEFAULT_RECOMMENDATION_LIMIT)]
        limit: u32,
    },
    /// Listings matching style keywords
    Style {
        #[arg(required = true)]
        keywords: Vec<String>,
        #[arg(long, default_value_t = DEFAULT_RECOMMENDATION_LIMIT)]
        limit: u32,
    },
    /// Listings similar to one listing
    Similar {
        id: PropertyId,
        #[arg(long, default_value_t = DEFAULT_RECOMMENDATION_LIMIT)]
        limit: u32,
    },
    Trending {
        #[arg(long, default_value_t = DEFAULT_RECOMMENDATION_LIMIT)]
        limit: u32,
    },
    /// Rate a recommendation
    Feedback { recommendation_id: i64, feedback: String },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_dir = cli.config_dir.as_deref();
    let mut config = ConfigService::new(config_dir)?.load()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    tracing::debug!(
        "[Cli] api_url={} ephemeral={}",
        config.api_url,
        cli.ephemeral
    );

    let state_repository: Arc<dyn StateRepository> = if cli.ephemeral {
        Arc::new(InMemoryStateRepository::new())
    } else {
        Arc::new(TomlStateRepository::new(config_dir)?)
    };

    let context = AppContext::new(config, state_repository)?;
    context.start().await;

    match cli.command {
        Commands::Search {
            query,
            filters,
            page,
            limit,
        } => commands::catalog::search(&context, query, filters, page, limit).await?,
        Commands::Featured { limit } => commands::catalog::featured(&context, limit).await?,
        Commands::Show { id } => commands::catalog::show(&context, id).await?,
        Commands::Property { action } => match action {
            PropertyAction::Create { file } => commands::catalog::create(&context, &file).await?,
            PropertyAction::Update { id, file } => {
                commands::catalog::update(&context, id, &file).await?
            }
            PropertyAction::Delete { id } => commands::catalog::delete(&context, id).await?,
        },
        Commands::Login { username, password } => {
            commands::account::login(&context, username, password).await?
        }
        Commands::Register {
            username,
            email,
            full_name,
            password,
        } => commands::account::register(&context, username, email, full_name, password).await?,
        Commands::Logout => commands::account::logout(&context).await?,
        Commands::Whoami => commands::account::whoami(&context).await?,
        Commands::Preferences { action } => match action {
            PreferencesAction::Show => commands::account::show_preferences(&context).await?,
            PreferencesAction::Set { key, value } => {
                commands::account::set_preference(&context, key, &value).await?
            }
        },
        Commands::Locale { action } => match action {
            LocaleAction::List => commands::locale::list(&context),
            LocaleAction::Show => commands::locale::show(&context),
            LocaleAction::Set { id } => commands::locale::set(&context, &id).await?,
        },
        Commands::Analyze { action } => match action {
            AnalyzeAction::Property { id, analysis_type } => {
                commands::ai::analyze_property(&context, id, analysis_type).await?
            }
            AnalyzeAction::Image {
                path,
                property,
                analysis_type,
            } => commands::ai::analyze_image(&context, &path, property, analysis_type).await?,
        },
        Commands::History { id, analysis_type } => {
            commands::ai::history(&context, id, analysis_type).await?
        }
        Commands::Price { id } => commands::ai::price(&context, id).await?,
        Commands::Styles => commands::ai::styles(&context).await?,
        Commands::Recommend { action } => match action {
            RecommendAction::User {
                user_id,
                recommendation_type,
                limit,
            } => {
                commands::recommend::for_user(&context, user_id, recommendation_type, limit)
                    .await?
            }
            RecommendAction::Style { keywords, limit } => {
                commands::recommend::style(&context, &keywords, limit).await?
            }
            RecommendAction::Similar { id, limit } => {
                commands::recommend::similar(&context, id, limit).await?
            }
            RecommendAction::Trending { limit } => {
                commands::recommend::trending(&context, limit).await?
            }
            RecommendAction::Feedback {
                recommendation_id,
                feedback,
            } => commands::recommend::feedback(&context, recommendation_id, feedback).await?,
        },
    }

    Ok(())
}
