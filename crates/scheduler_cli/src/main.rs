//! Main entry point for the vaccine appointment scheduler.
//! Reads one command per line from standard input and prints one reply per command.

use anyhow::Context;
use command_handlers::HandlerContext;
use database::{create_connection_pool, init_schema, test_connection};
use tokio::io::BufReader;

mod config;
mod shell;

use config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger; replies go to stdout, logs to stderr
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let config = AppConfig::from_env().context("invalid configuration")?;
    log::info!("🚀 Starting vaccine scheduler with database {}", config.database.url);

    // Create database connection pool
    let pool = match create_connection_pool(&config.database).await {
        Ok(pool) => {
            log::info!("🗃️ Database pool created successfully");

            if let Err(e) = test_connection(&pool).await {
                log::error!("❌ Database connection test failed: {}", e);
            }
            pool
        }
        Err(e) => {
            log::error!("❌ Failed to create database pool: {}", e);
            log::error!("💡 Check DATABASE_URL points to a writable SQLite location");
            return Err(e).context("failed to open database");
        }
    };

    init_schema(&pool)
        .await
        .context("failed to create database schema")?;

    let ctx = HandlerContext::new(pool.clone(), config.bcrypt_cost);

    let mut stdout = std::io::stdout();
    shell::print_greeting(&mut stdout)?;
    shell::run(&ctx, BufReader::new(tokio::io::stdin()), &mut stdout).await?;

    pool.close().await;
    Ok(())
}
