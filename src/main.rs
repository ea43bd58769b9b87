// src/main.rs

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use daily_phrase::config::{Cli, Command, ServeConfig};
use daily_phrase::migrate::migrate_file;
use daily_phrase::server::{self, db};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.into_command() {
        Command::Serve(args) => {
            // Invalid rotation counts stop here, before anything binds
            let config = ServeConfig::try_from(args)?;
            info!("Starting daily phrase service v{}", env!("CARGO_PKG_VERSION"));
            server::serve(config).await
        }
        Command::Migrate(args) => {
            let pool = db::create_pool(&args.database_url).await?;
            let report = migrate_file(&args.input, &pool).await?;
            pool.close().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}
