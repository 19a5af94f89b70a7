//! feed-comments - Browse and edit the comments on a post

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use libfeedcast::logging::LoggingConfig;
use libfeedcast::{Comment, CommentId, Config, FeedError, FeedStore, PostId};

#[derive(Parser, Debug)]
#[command(name = "feed-comments")]
#[command(version, about = "Browse and edit the comments on a post")]
#[command(long_about = r#"Browse and edit the comments on a post.

EXAMPLES:
    # Show the comments on post 1
    feed-comments list 1

    # Comment on post 1
    feed-comments create 1 "Nice post"

    # Edit comment 4 on post 1
    feed-comments update 1 4 "Nice post, indeed"

    # Delete comment 4 on post 1
    feed-comments delete 1 4

    # JSON output for scripting
    feed-comments list 1 --format json | jq '.[].text'

CONFIGURATION:
    FEEDCAST_CONFIG   - Path to config.toml
    FEEDCAST_API_URL  - Override the backend base URL

EXIT CODES:
    0 - Success
    1 - Request failed or configuration error
    2 - Invalid arguments
    3 - Invalid input (empty comment text)
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
    /// Show the comments on a post
    List {
        /// Post whose comments to show
        post_id: PostId,
    },

    /// Add a comment to a post
    Create {
        /// Post to comment on
        post_id: PostId,

        /// Comment text (surrounding whitespace is trimmed)
        text: String,
    },

    /// Replace the text of a comment
    Update {
        /// Post the comment belongs to
        post_id: PostId,

        /// Comment to change
        comment_id: CommentId,

        /// New text (surrounding whitespace is trimmed)
        text: String,
    },

    /// Delete a comment
    Delete {
        /// Post the comment belongs to
        post_id: PostId,

        /// Comment to delete
        comment_id: CommentId,
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

/// Trim comment text, refusing text that is empty afterwards
fn comment_text(text: &str) -> libfeedcast::Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FeedError::InvalidInput(
            "Comment text cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

async fn run(cli: Cli) -> Result<()> {
    // Reject bad text before touching config or network
    let text = match &cli.command {
        Command::Create { text, .. } | Command::Update { text, .. } => Some(comment_text(text)?),
        _ => None,
    };

    let config = Config::load()?;
    tracing::debug!(base_url = %config.api.base_url, locale = ?config.feed.locale, "Configuration loaded");
    let store = FeedStore::from_config(&config)?;

    match cli.command {
        Command::List { post_id } => {
            store.fetch_comments(post_id).await?;
            let state = store.state();
            let comments = state.comments_for(post_id);
            match cli.format {
                OutputFormat::Text => {
                    if comments.is_empty() {
                        println!("No comments on post {}.", post_id);
                    }
                    for comment in comments {
                        println!("{}", format_comment(comment));
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(comments)?),
            }
        }
        Command::Create { post_id, .. } => {
            let created = store
                .create_comment(post_id, text.unwrap_or_default())
                .await?;
            print_comment(&created, cli.format)?;
        }
        Command::Update {
            post_id,
            comment_id,
            ..
        } => {
            let updated = store
                .update_comment(comment_id, post_id, text.unwrap_or_default())
                .await?;
            print_comment(&updated, cli.format)?;
        }
        Command::Delete {
            post_id,
            comment_id,
        } => {
            let (comment_id, post_id) = store.delete_comment(comment_id, post_id).await?;
            match cli.format {
                OutputFormat::Text => {
                    println!("Deleted comment {} on post {}", comment_id, post_id)
                }
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({ "deleted": comment_id, "postId": post_id })
                ),
            }
        }
    }

    Ok(())
}

fn print_comment(comment: &Comment, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{}", format_comment(comment)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(comment)?),
    }
    Ok(())
}

fn format_comment(comment: &Comment) -> String {
    format!("[{}] {}", comment.id, comment.text)
}
