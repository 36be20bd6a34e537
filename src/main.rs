use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wiki_navigator::config::{find_config_file, load_config, Config, MAX_RESULTS_LIMIT};
use wiki_navigator::navigator::prompt_query;
use wiki_navigator::ui::StdConsole;
use wiki_navigator::{MenuPolicy, Navigator, Session, WikipediaSource};

/// Wiki Navigator - search Wikipedia and read articles interactively
#[derive(Parser, Debug)]
#[command(name = "wiki-navigator")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Утилита для получения статей из Википедии", long_about = None)]
struct Cli {
    /// Search query (asked interactively when omitted)
    #[arg(short, long)]
    request: Option<String>,

    /// Maximum number of search results
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=MAX_RESULTS_LIMIT as i64))]
    number: Option<u32>,

    /// Language edition to read articles from (e.g. "ru", "en")
    #[arg(short, long)]
    language: Option<String>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Ask again on unrecognised menu answers instead of exiting
    #[arg(long)]
    lenient: bool,

    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(long, short)]
    quiet: bool,

    /// Show all environment variables
    #[arg(long)]
    env: bool,

    /// Print the resolved configuration as TOML and exit
    #[arg(long)]
    show_config: bool,
}

/// Print all available environment variables
fn print_env_vars() {
    println!("Wiki Navigator - Environment Variables");
    println!();
    println!("Provider:");
    println!("  WIKI_NAVIGATOR_PROVIDER__API_URL          API endpoint template (default: https://{{lang}}.wikipedia.org/w/api.php)");
    println!("  WIKI_NAVIGATOR_PROVIDER__USER_AGENT       User agent sent with requests");
    println!("  WIKI_NAVIGATOR_PROVIDER__TIMEOUT_SECONDS  Request timeout in seconds (default: 30)");
    println!();
    println!("Session:");
    println!("  WIKI_NAVIGATOR_SESSION__LANGUAGE          Language edition (default: ru)");
    println!("  WIKI_NAVIGATOR_SESSION__MAX_RESULTS       Maximum search results (default: 10)");
    println!();
    println!("Navigation:");
    println!("  WIKI_NAVIGATOR_NAVIGATION__MENU_POLICY    strict | lenient (default: strict)");
    println!();
    println!("Other Settings:");
    println!("  RUST_LOG                    Rust logging level (e.g., debug, info, warn, error)");
    println!();
    println!("Example:");
    println!("  export WIKI_NAVIGATOR_SESSION__LANGUAGE=\"en\"");
    println!("  wiki-navigator -r \"Cat\" -n 3");
}

/// Command-line flags win over file and environment settings
fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(number) = cli.number {
        config.session.max_results = number as usize;
    }
    if let Some(language) = &cli.language {
        config.session.language = language.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.provider.timeout_seconds = timeout;
    }
    if cli.lenient {
        config.navigation.menu_policy = MenuPolicy::Lenient;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.env {
        print_env_vars();
        return Ok(());
    }

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("wiki_navigator={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = cli.config.clone().or_else(find_config_file);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    let mut config = load_config(config_path.as_deref())?;
    apply_cli_overrides(&mut config, &cli);
    config.validate()?;

    if cli.show_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let provider = WikipediaSource::from_config(&config.provider)?;
    let mut console = StdConsole::new();

    let query = match cli.request {
        Some(query) => query,
        None => prompt_query(&mut console)?,
    };

    let session = Session::establish(
        &provider,
        query,
        config.session.max_results,
        config.session.language.as_str(),
    )
    .await?;

    Navigator::new(&provider, console, session)
        .with_policy(config.navigation.menu_policy)
        .run()
        .await?;

    Ok(())
}
