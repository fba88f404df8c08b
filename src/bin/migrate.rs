use anyhow::{Result, anyhow};
use world_clock::config::Config;
use world_clock::database::connection::{sqlite_file_path, DatabaseManager};
use world_clock::database::models::{Preference, CLOCKS_KEY, THEME_KEY};
use world_clock::services::clock_context::{decode_clocks, decode_theme};
use std::env;
use std::io;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize basic logging for the migration
    env_logger::init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("migrate");

    match command {
        "migrate" | "up" => run_migrations().await,
        "check" => check_database().await,
        "reset" => reset_database().await,
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            print_help();
            std::process::exit(1);
        }
    }
}

async fn run_migrations() -> Result<()> {
    println!("🕐 World Clock - Preference Store Setup");
    println!("=======================================");

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    println!("📊 Database URL: {}", mask_url(&config.database_url));
    println!("🚀 Running database migrations...");

    let db_manager = DatabaseManager::new(&config.database_url).await
        .map_err(|e| anyhow!("Failed to open database: {}", e))?;

    match db_manager.run_migrations().await {
        Ok(_) => {
            println!("✅ Migrations completed successfully!");
        }
        Err(e) => {
            eprintln!("❌ Migration failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn check_database() -> Result<()> {
    println!("🔍 Checking preference store...");

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    println!("📊 Database URL: {}", mask_url(&config.database_url));

    let db_manager = DatabaseManager::new(&config.database_url).await
        .map_err(|e| anyhow!("Failed to open database: {}", e))?;

    let preferences = match Preference::list(&db_manager.pool).await {
        Ok(preferences) => preferences,
        Err(e) => {
            println!("⚠️  Preference table unreadable: {e}");
            println!("💡 Try running 'migrate up' to create the schema");
            return Ok(());
        }
    };

    println!("✅ Database connection successful!");
    if preferences.is_empty() {
        println!("📋 No saved preferences yet; defaults will be used");
        return Ok(());
    }

    for preference in &preferences {
        let verdict = match preference.key.as_str() {
            CLOCKS_KEY => decode_clocks(Some(preference.value.as_str()))
                .map(|clocks| format!("{} clocks", clocks.len())),
            THEME_KEY => decode_theme(Some(preference.value.as_str()))
                .map(|theme| format!("theme {theme}")),
            _ => Ok("unused key".to_string()),
        };
        match verdict {
            Ok(summary) => println!("  • {} ({}) - updated {}", preference.key, summary, preference.updated_at),
            Err(e) => println!("  • {} ⚠️  {} - defaults will be used", preference.key, e),
        }
    }

    Ok(())
}

async fn reset_database() -> Result<()> {
    println!("⚠️  WARNING: This will delete your saved clocks and theme!");
    println!("🤔 Are you sure you want to continue? (yes/no)");

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    if input.trim().to_lowercase() != "yes" {
        println!("❌ Reset cancelled.");
        return Ok(());
    }

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let db_path = sqlite_file_path(&config.database_url)
        .ok_or_else(|| anyhow!("Reset is only supported for file-backed SQLite databases"))?;
    if Path::new(db_path).exists() {
        std::fs::remove_file(db_path)?;
        println!("🗑️  Deleted database file: {db_path}");
    }

    println!("🔄 Recreating database schema...");
    run_migrations().await?;

    println!("✅ Reset completed!");

    Ok(())
}

fn mask_url(url: &str) -> String {
    // Only show the file name of local database paths
    match sqlite_file_path(url).and_then(|path| Path::new(path).file_name()) {
        Some(filename) => format!("sqlite:.../{}", filename.to_string_lossy()),
        None => url.to_string(),
    }
}

fn print_help() {
    println!("🕐 World Clock - Preference Store Tool");
    println!();
    println!("USAGE:");
    println!("    migrate [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    migrate, up    Run database migrations (default)");
    println!("    check          Show saved preferences and whether they decode");
    println!("    reset          Delete saved clocks and theme (SQLite file only)");
    println!("    help           Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    DATABASE_URL   Database connection string (default: sqlite:./data/world_clock.db)");
    println!();
}
