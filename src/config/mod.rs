// src/config/mod.rs
// Command line and environment configuration
//
// Every flag can also be set through its PHRASE_* environment variable;
// a `.env` file in the working directory is read first by main.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::phrase::RotationsPerDay;

/// Startup configuration problems. Any of these stops the process before it serves.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rotations per day must be between 1 and 1440, got {0}")]
    InvalidRotations(i64),
    #[error("feed base URL must not be empty")]
    EmptyFeedBaseUrl,
}

#[derive(Debug, Parser)]
#[command(name = "daily-phrase", version)]
#[command(about = "Serves a deterministic phrase of the period over HTTP and RSS", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Serve options, used when no subcommand is given
    #[command(flatten)]
    pub serve: ServeArgs,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "PHRASE_LOG", default_value = "info", global = true)]
    pub log_level: String,
}

impl Cli {
    /// The subcommand to run; `serve` when none was given
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Serve(self.serve))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service
    Serve(ServeArgs),
    /// Import a flat phrase file into the SQLite database
    Migrate(MigrateArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Number of phrase rotations per calendar day
    #[arg(
        long,
        env = "PHRASE_ROTATIONS_PER_DAY",
        default_value_t = i64::from(RotationsPerDay::DEFAULT),
        allow_negative_numbers = true
    )]
    pub rotations_per_day: i64,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Address to bind
    #[arg(long, env = "PHRASE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "PHRASE_PORT", default_value_t = 8000)]
    pub port: u16,

    #[command(flatten)]
    pub feed: FeedArgs,
}

#[derive(Debug, Clone, Args)]
pub struct StoreArgs {
    /// SQLite database holding the `phrases` table
    #[arg(long, env = "PHRASE_DATABASE_URL", default_value = "sqlite:phrases.db")]
    pub database_url: String,

    /// Flat phrase file, used when the database is unavailable
    #[arg(long, env = "PHRASE_FILE", default_value = "phrases.txt")]
    pub phrases_file: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct FeedArgs {
    /// Public base URL used for feed links
    #[arg(long, env = "PHRASE_FEED_BASE_URL", default_value = FeedConfig::DEFAULT_BASE_URL)]
    pub feed_base_url: String,

    #[arg(long, env = "PHRASE_FEED_TITLE", default_value = FeedConfig::DEFAULT_TITLE)]
    pub feed_title: String,

    #[arg(long, env = "PHRASE_FEED_DESCRIPTION", default_value = FeedConfig::DEFAULT_DESCRIPTION)]
    pub feed_description: String,

    #[arg(long, env = "PHRASE_FEED_LANGUAGE", default_value = FeedConfig::DEFAULT_LANGUAGE)]
    pub feed_language: String,

    /// Managing editor and webmaster, e.g. `mail@example.com (Name)`
    #[arg(long, env = "PHRASE_FEED_EDITOR", default_value = FeedConfig::DEFAULT_EDITOR)]
    pub feed_editor: String,
}

#[derive(Debug, Clone, Args)]
pub struct MigrateArgs {
    /// Flat phrase file to import
    #[arg(short, long, env = "PHRASE_FILE", default_value = "phrases.txt")]
    pub input: PathBuf,

    /// Target SQLite database (created if missing)
    #[arg(long, env = "PHRASE_DATABASE_URL", default_value = "sqlite:phrases.db")]
    pub database_url: String,
}

/// RSS channel metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub base_url: String,
    pub title: String,
    pub description: String,
    pub language: String,
    pub editor: String,
}

impl FeedConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://daily-phrase.ademapps.dev";
    pub const DEFAULT_TITLE: &'static str = "Frase Diaria";
    pub const DEFAULT_DESCRIPTION: &'static str = "Frases diarias inspiradoras para alegrar tu día";
    pub const DEFAULT_LANGUAGE: &'static str = "es";
    pub const DEFAULT_EDITOR: &'static str = "noreply@ademapps.dev (Daily Phrase API)";
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            title: Self::DEFAULT_TITLE.to_string(),
            description: Self::DEFAULT_DESCRIPTION.to_string(),
            language: Self::DEFAULT_LANGUAGE.to_string(),
            editor: Self::DEFAULT_EDITOR.to_string(),
        }
    }
}

impl TryFrom<FeedArgs> for FeedConfig {
    type Error = ConfigError;

    fn try_from(args: FeedArgs) -> Result<Self, Self::Error> {
        let base_url = args.feed_base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ConfigError::EmptyFeedBaseUrl);
        }
        Ok(Self {
            base_url,
            title: args.feed_title,
            description: args.feed_description,
            language: args.feed_language,
            editor: args.feed_editor,
        })
    }
}

/// Validated settings for the HTTP service
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub rotations: RotationsPerDay,
    pub database_url: String,
    pub phrases_file: PathBuf,
    pub host: String,
    pub port: u16,
    pub feed: FeedConfig,
}

impl TryFrom<ServeArgs> for ServeConfig {
    type Error = ConfigError;

    fn try_from(args: ServeArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            rotations: RotationsPerDay::new(args.rotations_per_day)?,
            database_url: args.store.database_url,
            phrases_file: args.store.phrases_file,
            host: args.host,
            port: args.port,
            feed: FeedConfig::try_from(args.feed)?,
        })
    }
}
