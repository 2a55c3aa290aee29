//! CLI for the postindex in-memory post index.
//!
//! Loads posts from a JSON file and runs point, range, and most-viewed
//! queries against them, or runs a built-in demo scenario.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use postindex::{IndexConfig, Post, RecordIndex};
use tracing_subscriber::EnvFilter;

/// postindex — In-memory post index CLI.
#[derive(Parser)]
#[command(name = "postindex", version, about)]
struct Cli {
    /// Path to an index config JSON file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the built-in demo scenario.
    Demo,

    /// Look up the post at an exact timestamp.
    Get {
        /// JSON file holding an array of posts.
        posts: PathBuf,

        /// Timestamp to look up (e.g. "17/1/2024 15:00").
        timestamp: String,
    },

    /// List posts in an inclusive time range.
    Range {
        /// JSON file holding an array of posts.
        posts: PathBuf,

        /// Start of the range.
        start: String,

        /// End of the range.
        end: String,

        /// Output format.
        #[arg(long, default_value = "csv")]
        format: OutputFormat,
    },

    /// Show the most-viewed posts, highest first.
    Top {
        /// JSON file holding an array of posts.
        posts: PathBuf,

        /// How many posts to show.
        #[arg(long, default_value = "1")]
        count: usize,
    },
}

/// Output format for range results.
#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Comma-separated values.
    Csv,
    /// JSON array of objects.
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Demo => cmd_demo(cli.config.as_deref()),
        Commands::Get { posts, timestamp } => cmd_get(cli.config.as_deref(), &posts, &timestamp),
        Commands::Range {
            posts,
            start,
            end,
            format,
        } => cmd_range(cli.config.as_deref(), &posts, &start, &end, &format),
        Commands::Top { posts, count } => cmd_top(cli.config.as_deref(), &posts, count),
    };

    if let Err(e) = result {
        tracing::error!("command failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Builds an empty index from the optional config file.
fn open_index(config: Option<&Path>) -> Result<RecordIndex, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => IndexConfig::load(path)?,
        None => IndexConfig::default(),
    };
    Ok(RecordIndex::with_config(&config)?)
}

/// Builds an index and fills it from a posts file.
fn load_index(
    config: Option<&Path>,
    posts: &Path,
) -> Result<RecordIndex, Box<dyn std::error::Error>> {
    let mut index = open_index(config)?;
    index.load_json_file(posts)?;
    Ok(index)
}

/// Implements `postindex demo`.
fn cmd_demo(config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut index = open_index(config)?;

    index.add("1/1/2024 08:30", "Good morning", "Mohammed", 98)?;
    index.add("4/1/2024 09:00", "Eid Mubarak", "Sara", 20)?;
    index.add("17/1/2024 15:00", "Coffee dose", "Ali", 56)?;
    index.add("10/1/2024 14:00", "Rainy Day", "Shamma", 105)?;
    index.add("13/1/2024 12:00", "Ramadan Kareem", "Noora", 200)?;
    index.add("7/1/2024 10:00", "Family", "Saif", 50)?;

    println!("Lookup by timestamp:");
    for ts in ["17/1/2024 15:00", "7/1/2024 10:00", "20/1/2024 12:00"] {
        match index.get_by_timestamp(ts)? {
            Some(post) => println!("  {ts}: {} ({})", post.content, post.author),
            None => println!("  {ts}: not found"),
        }
    }

    let ranges = [
        ("1 January to 4 January", "1/1/2024 00:00", "4/1/2024 23:59"),
        ("10 January to 14 January", "10/1/2024 00:00", "14/1/2024 23:59"),
        ("4 January to 17 January", "4/1/2024 00:00", "17/1/2024 23:59"),
    ];
    for (label, start, end) in ranges {
        println!();
        println!("Range {label}:");
        for post in index.get_in_range(start, end)? {
            println!("  {} ({})", post.content, post.author);
        }
    }

    println!();
    println!("Most viewed:");
    match index.pop_max_views() {
        Some(top) => println!("  {} ({}) views={}", top.content, top.author, top.views),
        None => println!("  no posts"),
    }

    Ok(())
}

/// Implements `postindex get <posts> <timestamp>`.
fn cmd_get(
    config: Option<&Path>,
    posts: &Path,
    timestamp: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let index = load_index(config, posts)?;
    match index.get_by_timestamp(timestamp)? {
        Some(post) => print_post(&index, post),
        None => println!("No post at {timestamp}"),
    }
    Ok(())
}

/// Implements `postindex range <posts> <start> <end>`.
fn cmd_range(
    config: Option<&Path>,
    posts: &Path,
    start: &str,
    end: &str,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let index = load_index(config, posts)?;
    let found = index.get_in_range(start, end)?;
    let parser = index.parser();

    match format {
        OutputFormat::Csv => {
            println!(
                "# start={start}, end={end}, format={}, posts={}",
                parser.format_str(),
                found.len()
            );
            println!("timestamp,author,views,content");
            for post in &found {
                println!(
                    "{},{},{},{}",
                    parser.format(&post.timestamp),
                    csv_field(&post.author),
                    post.views,
                    csv_field(&post.content),
                );
            }
        }
        OutputFormat::Json => {
            let json_posts: Vec<serde_json::Value> = found
                .iter()
                .map(|post| {
                    serde_json::json!({
                        "timestamp": parser.format(&post.timestamp),
                        "content": post.content,
                        "author": post.author,
                        "views": post.views,
                    })
                })
                .collect();

            let output = serde_json::json!({
                "start": start,
                "end": end,
                "count": found.len(),
                "posts": json_posts,
            });

            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Implements `postindex top <posts>`.
fn cmd_top(
    config: Option<&Path>,
    posts: &Path,
    count: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut index = load_index(config, posts)?;
    for rank in 1..=count {
        let Some(top) = index.pop_max_views() else {
            break;
        };
        println!("{rank}. {} ({}) views={}", top.content, top.author, top.views);
    }
    Ok(())
}

/// Prints one post in a human-readable block.
fn print_post(index: &RecordIndex, post: &Post) {
    println!("Timestamp: {}", index.parser().format(&post.timestamp));
    println!("Author:    {}", post.author);
    println!("Views:     {}", post.views);
    println!("Content:   {}", post.content);
}

/// Quotes a CSV field if it contains a separator, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_field_plain() {
        assert_eq!(csv_field("Good morning"), "Good morning");
    }

    #[test]
    fn test_csv_field_quotes() {
        assert_eq!(csv_field("a, b"), "\"a, b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_cli_parses_range() {
        let cli = Cli::try_parse_from([
            "postindex",
            "range",
            "posts.json",
            "1/1/2024 00:00",
            "4/1/2024 23:59",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Range {
                format: OutputFormat::Json,
                ..
            }
        ));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_demo_runs() {
        assert!(cmd_demo(None).is_ok());
    }
}
