//! # World Clock Main Entry Point
//!
//! Initializes logging, loads configuration, opens the preference store,
//! restores the saved board and then runs the clock: one frame per tick,
//! with typed commands read from stdin in between.

use anyhow::Result;
use chrono::Utc;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use world_clock::config::Config;
use world_clock::database::connection::DatabaseManager;
use world_clock::input::commands::{Command, CommandParseError};
use world_clock::input::handlers::{handle_command, CommandOutcome};
use world_clock::services::clock_context::ClockContext;
use world_clock::services::ticker::{tick, tick_interval};
use world_clock::utils::logging::log_system_event;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging; stdout belongs to the clock face
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "world_clock=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting World Clock v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded - Database: {}, tick: {:?}, display cap: {}",
        config.database_url, config.tick_interval, config.display_cap);

    // Initialize preference store
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    db_manager.run_migrations().await?;
    let mut context = ClockContext::load(db_manager).await?;
    info!("Loaded {} clocks, theme {}", context.clocks().len(), context.theme());

    let mut interval = tick_interval(config.tick_interval);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;
    let mut status: Option<String> = None;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                draw(&context, &config, status.as_deref());
            }
            line = lines.next_line(), if input_open => {
                match line {
                    Ok(Some(line)) => {
                        match line.parse::<Command>() {
                            Ok(command) => match handle_command(&mut context, command, Utc::now()).await {
                                CommandOutcome::Quit => break,
                                CommandOutcome::Continue(message) => status = message,
                            },
                            Err(CommandParseError::Empty) => {}
                            Err(e) => status = Some(e.to_string()),
                        }
                        draw(&context, &config, status.as_deref());
                    }
                    Ok(None) => {
                        log_system_event("stdin closed", Some("continuing without input"));
                        input_open = false;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read input: {}", e);
                        input_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log_system_event("interrupt received", None);
                break;
            }
        }
    }

    info!("Application stopped");
    Ok(())
}

fn draw(context: &ClockContext, config: &Config, status: Option<&str>) {
    let frame = match tick(context, Utc::now(), config.display_cap) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::error!("Failed to compute frame: {}", e);
            return;
        }
    };

    let mut screen = String::from(CLEAR_SCREEN);
    screen.push_str(&frame.render(context.theme()));
    if let Some(status) = status {
        screen.push('\n');
        screen.push_str(status);
        screen.push('\n');
    }
    screen.push_str("\n> ");

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(screen.as_bytes()).and_then(|_| stdout.flush()) {
        tracing::warn!("Failed to draw frame: {}", e);
    }
}
