#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use tempfile::{tempdir, TempDir};
use world_clock::database::connection::DatabaseManager;
use world_clock::database::models::{ClockEntry, Preference, Theme, CLOCKS_KEY, THEME_KEY};
use world_clock::error::ClockError;
use world_clock::services::clock_context::{ClockContext, MAX_TIME_OFFSET_MINUTES};

async fn setup_test_db() -> (DatabaseManager, TempDir) {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.to_string_lossy());

    let db = DatabaseManager::new(&db_url).await.unwrap();
    db.run_migrations().await.unwrap();
    (db, dir)
}

#[tokio::test]
async fn test_first_start_uses_defaults() {
    let (db, _temp_dir) = setup_test_db().await;

    let context = ClockContext::load(db).await.unwrap();

    assert_eq!(context.clocks(), ClockEntry::defaults().as_slice());
    assert_eq!(context.theme(), Theme::Dark);
    assert_eq!(context.time_offset_minutes(), 0);
}

#[tokio::test]
async fn test_malformed_state_falls_back_to_defaults() {
    let (db, _temp_dir) = setup_test_db().await;
    Preference::set(&db.pool, CLOCKS_KEY, "{not json").await.unwrap();
    Preference::set(&db.pool, THEME_KEY, "42").await.unwrap();

    let context = ClockContext::load(db).await.unwrap();

    assert_eq!(context.clocks(), ClockEntry::defaults().as_slice());
    assert_eq!(context.theme(), Theme::Dark);
}

#[tokio::test]
async fn test_add_clock_persists() {
    let (db, _temp_dir) = setup_test_db().await;
    let mut context = ClockContext::load(db.clone()).await.unwrap();

    let added = context.add_clock("America/New_York").await.unwrap().clone();
    assert_eq!(added.name, "New York");
    assert!(!added.pinned);
    assert_eq!(context.clocks().len(), 4);

    let reloaded = ClockContext::load(db).await.unwrap();
    assert_eq!(reloaded.clocks().last().unwrap(), &added);
}

#[tokio::test]
async fn test_add_duplicate_is_rejected() {
    let (db, _temp_dir) = setup_test_db().await;
    let mut context = ClockContext::load(db).await.unwrap();

    let result = context.add_clock("Asia/Tokyo").await;
    assert!(matches!(result, Err(ClockError::DuplicateClock(_))));
    assert_eq!(context.clocks().len(), 3);
}

#[tokio::test]
async fn test_add_unknown_zone_is_rejected() {
    let (db, _temp_dir) = setup_test_db().await;
    let mut context = ClockContext::load(db).await.unwrap();

    let result = context.add_clock("Mars/Phobos").await;
    assert!(matches!(result, Err(ClockError::UnknownTimezone(_))));
    assert_eq!(context.clocks().len(), 3);
}

#[tokio::test]
async fn test_remove_clock() {
    let (db, _temp_dir) = setup_test_db().await;
    let mut context = ClockContext::load(db.clone()).await.unwrap();

    let removed = context.remove_clock("london").await.unwrap();
    assert_eq!(removed.zone, "Europe/London");
    assert!(matches!(
        context.remove_clock("london").await,
        Err(ClockError::ClockNotFound(_))
    ));

    let reloaded = ClockContext::load(db).await.unwrap();
    assert!(reloaded.clocks().iter().all(|c| c.id != "london"));
}

#[tokio::test]
async fn test_removing_everything_persists_empty_board() {
    let (db, _temp_dir) = setup_test_db().await;
    let mut context = ClockContext::load(db.clone()).await.unwrap();

    for id in ["local", "london", "tokyo"] {
        context.remove_clock(id).await.unwrap();
    }

    let reloaded = ClockContext::load(db).await.unwrap();
    assert!(reloaded.clocks().is_empty());
}

#[tokio::test]
async fn test_toggle_pin_reorders_visible_clocks() {
    let (db, _temp_dir) = setup_test_db().await;
    let mut context = ClockContext::load(db).await.unwrap();

    assert!(context.toggle_pin("tokyo").await.unwrap());
    let order: Vec<&str> = context.visible_clocks(10).iter().map(|c| c.id.as_str()).collect();
    assert_eq!(order, vec!["local", "tokyo", "london"]);

    assert!(!context.toggle_pin("local").await.unwrap());
    let order: Vec<&str> = context.visible_clocks(10).iter().map(|c| c.id.as_str()).collect();
    assert_eq!(order, vec!["tokyo", "local", "london"]);

    assert!(matches!(
        context.toggle_pin("missing").await,
        Err(ClockError::ClockNotFound(_))
    ));
}

#[tokio::test]
async fn test_visible_clocks_respects_cap() {
    let (db, _temp_dir) = setup_test_db().await;
    let context = ClockContext::load(db).await.unwrap();

    assert_eq!(context.visible_clocks(2).len(), 2);
    assert_eq!(context.visible_clocks(200).len(), 3);
}

#[tokio::test]
async fn test_theme_toggle_persists() {
    let (db, _temp_dir) = setup_test_db().await;
    let mut context = ClockContext::load(db.clone()).await.unwrap();

    assert_eq!(context.toggle_theme().await.unwrap(), Theme::Light);

    let reloaded = ClockContext::load(db).await.unwrap();
    assert_eq!(reloaded.theme(), Theme::Light);
}

#[tokio::test]
async fn test_bare_theme_value_is_loaded() {
    let (db, _temp_dir) = setup_test_db().await;
    Preference::set(&db.pool, THEME_KEY, "light").await.unwrap();

    let context = ClockContext::load(db).await.unwrap();

    assert_eq!(context.theme(), Theme::Light);
}

#[tokio::test]
async fn test_time_offset_shifts_now_and_is_not_persisted() {
    let (db, _temp_dir) = setup_test_db().await;
    let mut context = ClockContext::load(db.clone()).await.unwrap();
    let real_now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

    context.set_time_offset(-90).unwrap();
    assert_eq!(
        context.simulated_now(real_now),
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
    );

    context.set_time_offset(60 * 24 * 365).unwrap();
    assert_eq!(
        context.simulated_now(real_now),
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    );

    context.reset_time_offset();
    assert_eq!(context.simulated_now(real_now), real_now);

    context.set_time_offset(30).unwrap();
    let reloaded = ClockContext::load(db).await.unwrap();
    assert_eq!(reloaded.time_offset_minutes(), 0);
}

#[tokio::test]
async fn test_absurd_time_offset_is_rejected() {
    let (db, _temp_dir) = setup_test_db().await;
    let mut context = ClockContext::load(db).await.unwrap();

    assert!(context.set_time_offset(MAX_TIME_OFFSET_MINUTES).is_ok());
    assert!(matches!(
        context.set_time_offset(i64::MIN),
        Err(ClockError::TimeOffsetOutOfRange(_))
    ));
    assert_eq!(context.time_offset_minutes(), MAX_TIME_OFFSET_MINUTES);
}
