use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use stargazer_core::{
    AppController, AsyncResource, Config, ConfigThemeStore, GitHubProvider, Msg, Route, Session,
    SortMode, ThemeStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stargazer")]
#[command(version, about = "Browse, filter and sort a GitHub user's starred repositories", long_about = None)]
struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true, env = "STARGAZER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List a user's starred repositories
    Stars {
        /// GitHub username
        username: String,
        /// Only show repositories with this topic (repeatable; any match counts)
        #[arg(short, long = "topic")]
        topics: Vec<String>,
        /// Substring to look for in names and descriptions
        #[arg(short, long)]
        search: Option<String>,
        /// stars, updated or name
        #[arg(long, default_value = "stars", value_parser = parse_sort)]
        sort: SortMode,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the topics across a user's stars, most common first
    Topics {
        /// GitHub username
        username: String,
        /// Fuzzy filter for topic names
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Show or flip the saved theme
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

fn parse_sort(value: &str) -> Result<SortMode, String> {
    SortMode::parse(value).ok_or_else(|| format!("unknown sort '{}' (stars, updated, name)", value))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stargazer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_path()?,
    };
    let config = Config::load_from(&config_path)?;
    let theme_store: Arc<dyn ThemeStore> = Arc::new(ConfigThemeStore::new(config_path));

    match cli.command {
        Some(Commands::Stars {
            username,
            topics,
            search,
            sort,
            json,
        }) => {
            let mut session = load(&config, theme_store, &username).await?;

            for topic in topics {
                session.dispatch(Msg::TopicToggled(topic));
            }
            if let Some(search) = search {
                session.dispatch(Msg::SearchChanged(search));
            }
            session.dispatch(Msg::SortChanged(sort));

            print_stars(&session, json)?;
        }
        Some(Commands::Topics { username, filter }) => {
            let mut session = load(&config, theme_store, &username).await?;
            if let Some(filter) = filter {
                session.dispatch(Msg::TopicSearchChanged(filter));
            }

            for option in session.controller().topic_picker() {
                println!("{:>5}  {}", option.count, option.topic);
            }
        }
        Some(Commands::Theme { toggle }) => {
            let provider = GitHubProvider::from_config(&config.github)?;
            let mut session = Session::new(Arc::new(provider), theme_store);
            if toggle {
                session.dispatch(Msg::ThemeToggled);
                session.flush().await;
            }
            println!("{}", session.controller().theme());
        }
        None => {
            println!("No command specified. Try --help");
        }
    }

    Ok(())
}

/// Navigate to the user's stars and wait for both fetches to land
async fn load(
    config: &Config,
    theme_store: Arc<dyn ThemeStore>,
    username: &str,
) -> anyhow::Result<Session> {
    let provider = GitHubProvider::from_config(&config.github)?;
    let mut session = Session::new(Arc::new(provider), theme_store);

    tracing::info!("Fetching stars for {}", username);
    session.dispatch(Msg::Navigate(Route::Repositories(username.to_string())));
    session.settle().await;

    // Failures arrive as notices; surface them on stderr
    for notice in session.controller().notifications().iter() {
        eprintln!("error: {}", notice.message);
    }

    ensure_loaded(session.controller(), username)?;
    Ok(session)
}

/// Nothing useful to print when both fetches failed
fn ensure_loaded(app: &AppController, username: &str) -> anyhow::Result<()> {
    if app.user().error().is_some() && app.repositories().error().is_some() {
        anyhow::bail!("Could not load anything for {}", username);
    }
    Ok(())
}

fn print_stars(session: &Session, json: bool) -> anyhow::Result<()> {
    let app = session.controller();
    let visible = app.visible_repositories();

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    if let AsyncResource::Ready(user) = app.user() {
        println!("{} ({})", user.display_name(), user.login);
        if let Some(bio) = &user.bio {
            println!("  {}", bio);
        }
        println!();
    }

    if let AsyncResource::Ready(all) = app.repositories() {
        println!("{} of {} starred repositories", visible.len(), all.len());
    }

    for repo in visible {
        println!(
            "{:>7}  {:<40} {}",
            repo.stars,
            repo.name,
            repo.language.as_deref().unwrap_or("-")
        );
        if let Some(description) = &repo.description {
            println!("         {}", description);
        }
    }

    Ok(())
}
