use clap::{ArgAction, Parser, Subcommand};
use commands::{auth, config, details, discover, genres, rate, status, watchlist};

mod app;
mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelmood")]
#[command(about = "ReelMood - mood-based movie discovery with a personal watchlist")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and load your watchlist and ratings
    Login {
        /// Account email (prompted for the password)
        email: String,
    },
    /// Create an account (a confirmation email is sent before login works)
    Signup {
        /// Account email (prompted for the password)
        email: String,
    },
    /// Log out and clear the stored session
    Logout,
    /// List the genres you can discover by
    Genres,
    /// Get movie recommendations for a set of genres
    #[command(long_about = "Ask the generative service for 8 distinct movies matching the \
        given genre tags. The batch replaces the previous one; address its movies later \
        by position (1-8) or id in the details, watchlist and rate commands.")]
    Discover {
        /// Genre tags, e.g. scifi thriller (see `reelmood genres`)
        #[arg(required = true)]
        genres: Vec<String>,
    },
    /// Show enriched details for a movie from the last discovery batch
    Details {
        /// Position in the last batch (1-based) or movie id
        selector: String,
    },
    /// Manage your watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: Option<WatchlistCommands>,
    },
    /// Rate a movie from 1 to 5
    Rate {
        /// Position in the last batch (1-based), movie id, or watchlist movie id
        selector: String,
        /// Score from 1 (hated it) to 5 (loved it)
        score: u8,
    },
    /// Show session and configuration status
    Status,
    /// View or change configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// Show the watchlist (default)
    Show,
    /// Add a movie from the last discovery batch
    Add {
        /// Position in the last batch (1-based) or movie id
        selector: String,
    },
    /// Remove a movie by position in the watchlist or movie id
    Remove {
        /// Position in the watchlist (1-based) or movie id
        selector: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks secrets)
    Show {
        /// Show masked values in full
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Set configuration values
    Set {
        /// Data store base URL
        #[arg(long)]
        store_url: Option<String>,

        /// Data store anonymous key
        #[arg(long)]
        store_anon_key: Option<String>,

        /// Generative service API key
        #[arg(long)]
        gemini_api_key: Option<String>,

        /// Generative model id
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Login { email } => auth::run_login(&email, &output).await,
        Commands::Signup { email } => auth::run_signup(&email, &output).await,
        Commands::Logout => auth::run_logout(&output).await,
        Commands::Genres => genres::run_genres(&output),
        Commands::Discover { genres } => discover::run_discover(&genres, &output).await,
        Commands::Details { selector } => details::run_details(&selector, &output).await,
        Commands::Watchlist { cmd } => {
            let cmd = cmd.unwrap_or(WatchlistCommands::Show);
            match cmd {
                WatchlistCommands::Show => watchlist::run_show(&output).await,
                WatchlistCommands::Add { selector } => watchlist::run_add(&selector, &output).await,
                WatchlistCommands::Remove { selector } => {
                    watchlist::run_remove(&selector, &output).await
                }
            }
        }
        Commands::Rate { selector, score } => rate::run_rate(&selector, score, &output).await,
        Commands::Status => status::run_status(&output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            match cmd {
                ConfigCommands::Show { full } => config::run_show(full, &output),
                ConfigCommands::Set {
                    store_url,
                    store_anon_key,
                    gemini_api_key,
                    model,
                } => config::run_set(store_url, store_anon_key, gemini_api_key, model, &output),
            }
        }
    }
}
