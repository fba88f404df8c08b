#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use tempfile::{tempdir, TempDir};
use world_clock::database::connection::DatabaseManager;
use world_clock::database::models::{ClockEntry, Preference, Theme, CLOCKS_KEY};
use world_clock::services::clock_context::ClockContext;
use world_clock::services::ticker::tick;
use world_clock::utils::render::OffsetTone;

async fn setup_test_db() -> (DatabaseManager, TempDir) {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.to_string_lossy());

    let db = DatabaseManager::new(&db_url).await.unwrap();
    db.run_migrations().await.unwrap();
    (db, dir)
}

fn entry(id: &str, zone: &str, pinned: bool) -> ClockEntry {
    ClockEntry {
        id: id.to_string(),
        zone: zone.to_string(),
        pinned,
        name: id.to_string(),
    }
}

#[tokio::test]
async fn test_default_board_frame() {
    let (db, _temp_dir) = setup_test_db().await;
    let context = ClockContext::load(db).await.unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

    let frame = tick(&context, now, 200).unwrap();

    assert_eq!(frame.header, "Current Time");
    assert_eq!(frame.pinned.len(), 1);
    assert_eq!(frame.pinned[0].relative_label, "Current Location");
    assert_eq!(frame.pinned[0].tone, OffsetTone::Local);
    assert_eq!(frame.others.len(), 2);
    assert!(frame.skipped.is_empty());

    let tokyo = frame.others.iter().find(|c| c.id == "tokyo").unwrap();
    assert_eq!(tokyo.time, "09:00:00");
    assert_eq!(tokyo.period, "PM");
    assert_eq!(tokyo.date, "Saturday, Jun 15");
    assert!(tokyo.relative_label.ends_with(" hrs from local"));
}

#[tokio::test]
async fn test_stored_unknown_zone_is_skipped() {
    let (db, _temp_dir) = setup_test_db().await;
    let stored = vec![
        entry("mars", "Mars/Phobos", true),
        entry("utc", "UTC", false),
        entry("tokyo", "Asia/Tokyo", false),
    ];
    Preference::set(&db.pool, CLOCKS_KEY, &serde_json::to_string(&stored).unwrap())
        .await
        .unwrap();

    let context = ClockContext::load(db).await.unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let frame = tick(&context, now, 200).unwrap();

    assert_eq!(frame.skipped, vec!["mars".to_string()]);
    assert!(frame.pinned.is_empty());
    let ids: Vec<&str> = frame.others.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["utc", "tokyo"]);
}

#[tokio::test]
async fn test_time_travel_moves_every_clock() {
    let (db, _temp_dir) = setup_test_db().await;
    let mut context = ClockContext::load(db).await.unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

    context.set_time_offset(150).unwrap();
    let frame = tick(&context, now, 200).unwrap();

    assert_eq!(frame.instant, Utc.with_ymd_and_hms(2024, 6, 15, 14, 30, 0).unwrap());
    assert!(frame.header.starts_with("Time Travel: "));
    assert!(frame.header.ends_with("(+150m)"));
    let tokyo = frame.others.iter().find(|c| c.id == "tokyo").unwrap();
    assert_eq!(tokyo.time, "11:30");
}

#[tokio::test]
async fn test_display_cap_limits_cards() {
    let (db, _temp_dir) = setup_test_db().await;
    let context = ClockContext::load(db).await.unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

    let frame = tick(&context, now, 1).unwrap();

    assert_eq!(frame.pinned.len() + frame.others.len(), 1);
    assert_eq!(frame.pinned[0].id, "local");
}

#[tokio::test]
async fn test_empty_board_renders_hint() {
    let (db, _temp_dir) = setup_test_db().await;
    Preference::set(&db.pool, CLOCKS_KEY, "[]").await.unwrap();
    let context = ClockContext::load(db).await.unwrap();

    colored::control::set_override(false);
    let frame = tick(&context, Utc::now(), 200).unwrap();
    let screen = frame.render(Theme::Dark);

    assert!(screen.starts_with("Current Time"));
    assert!(screen.contains("No clocks yet"));
}
