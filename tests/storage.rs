//! Integration tests against a file-backed database opened from a
//! connection string, the way the CLI does it.

use learning_trainer::{config, seed, SqliteStore};
use tempfile::TempDir;

fn file_backed_url(dir: &TempDir) -> String {
    format!("sqlite://{}", dir.path().join("learning_trainer.db").display())
}

#[test]
fn connects_and_reports_database_name() {
    let dir = TempDir::new().unwrap();
    let url = file_backed_url(&dir);

    let store = SqliteStore::open_from_url(&url).unwrap();
    store.ping().unwrap();

    // The reported name must match the connection string's database segment
    let expected = config::database_name_from_url(&url);
    assert_eq!(expected, "learning_trainer");
    assert_eq!(store.database_name().unwrap(), expected);
}

#[test]
fn vector_extension_probe_executes() {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::open_from_url(&file_backed_url(&dir)).unwrap();

    // Must execute without error whether or not an extension is installed
    store.vector_search_available().unwrap();
}

#[test]
fn seed_populates_file_backed_database() {
    let dir = TempDir::new().unwrap();
    let url = file_backed_url(&dir);

    let mut store = SqliteStore::open_from_url(&url).unwrap();
    let summary = seed::run(&mut store).unwrap();
    assert_eq!(summary.user_email, seed::DEMO_EMAIL);
    drop(store);

    // Reopen to confirm the rows hit the file, not just the connection
    let store = SqliteStore::open_from_url(&url).unwrap();
    let stats = store.stats().unwrap();
    assert_eq!(stats.users, 1);
    assert_eq!(stats.content, 1);
    assert_eq!(stats.questions, 3);
    assert_eq!(stats.sessions, 1);
    assert_eq!(stats.interactions, 2);

    let user = store.get_user_by_email(seed::DEMO_EMAIL).unwrap().unwrap();
    let prefs = store.get_preferences(&user.id).unwrap().unwrap();
    assert_eq!(prefs.custom_settings.difficulty_range, [3, 7]);
}
