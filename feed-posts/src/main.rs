//! feed-posts - Browse and edit the posts of the feed

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use libfeedcast::logging::LoggingConfig;
use libfeedcast::types::{NEW_POST_BODY, NEW_POST_TITLE};
use libfeedcast::{Config, FeedError, FeedStore, Post, PostId};

#[derive(Parser, Debug)]
#[command(name = "feed-posts")]
#[command(version, about = "Browse and edit the posts of the feed")]
#[command(long_about = r#"Browse and edit the posts of the feed.

EXAMPLES:
    # Show the feed, newest post first
    feed-posts list

    # Create a post (title and body default to placeholders)
    feed-posts create
    feed-posts create --title "Hello" --body "First post"

    # Change the title of post 3, keeping its body
    feed-posts update 3 --title "Hello again"

    # Delete post 3
    feed-posts delete 3

    # JSON output for scripting
    feed-posts list --format json | jq '.[].title'

CONFIGURATION:
    FEEDCAST_CONFIG   - Path to config.toml
    FEEDCAST_API_URL  - Override the backend base URL

EXIT CODES:
    0 - Success
    1 - Request failed or configuration error
    2 - Invalid arguments
    3 - Invalid input (unknown post, nothing to update)
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the feed, newest post first
    List,

    /// Create a new post
    Create {
        /// Post title
        #[arg(long)]
        title: Option<String>,

        /// Post body
        #[arg(long)]
        body: Option<String>,

        /// Author id (defaults to feed.default_user_id)
        #[arg(long, value_name = "ID")]
        user_id: Option<u64>,
    },

    /// Change the title and/or body of a post
    Update {
        /// Id of the post to change
        id: PostId,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New body
        #[arg(long)]
        body: Option<String>,
    },

    /// Delete a post
    Delete {
        /// Id of the post to delete
        id: PostId,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    LoggingConfig::from_env(cli.verbose).init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(&e));
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<FeedError>()
        .map(FeedError::exit_code)
        .unwrap_or(1)
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    tracing::debug!(base_url = %config.api.base_url, locale = ?config.feed.locale, "Configuration loaded");
    let store = FeedStore::from_config(&config)?;

    match cli.command {
        Command::List => {
            store.fetch_posts().await?;
            let feed = store.state().feed_newest_first();
            match cli.format {
                OutputFormat::Text => {
                    if feed.is_empty() {
                        println!("No posts.");
                    }
                    for post in &feed {
                        println!("{}\n", format_post(post));
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&feed)?),
            }
        }
        Command::Create {
            title,
            body,
            user_id,
        } => {
            let draft = Post::draft(
                user_id.unwrap_or(config.feed.default_user_id),
                title.unwrap_or_else(|| NEW_POST_TITLE.to_string()),
                body.unwrap_or_else(|| NEW_POST_BODY.to_string()),
            );
            let created = store.create_post(draft).await?;
            print_post(&created, cli.format)?;
        }
        Command::Update { id, title, body } => {
            if title.is_none() && body.is_none() {
                return Err(FeedError::InvalidInput(
                    "Nothing to update, pass --title and/or --body".to_string(),
                )
                .into());
            }

            store.fetch_posts().await?;
            let current = store
                .state()
                .post(id)
                .cloned()
                .ok_or_else(|| FeedError::InvalidInput(format!("No post with id {}", id)))?;

            let updated = store.update_post(current.with_changes(title, body)).await?;
            print_post(&updated, cli.format)?;
        }
        Command::Delete { id } => {
            let deleted = store.delete_post(id).await?;
            match cli.format {
                OutputFormat::Text => println!("Deleted post {}", deleted),
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "deleted": deleted }))
                }
            }
        }
    }

    Ok(())
}

fn print_post(post: &Post, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{}", format_post(post)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(post)?),
    }
    Ok(())
}

fn format_post(post: &Post) -> String {
    format!(
        "[{}] {}\n    {}\n    by user {}",
        post.id, post.title, post.body, post.user_id
    )
}
