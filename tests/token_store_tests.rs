use academy_client::token_store::{FileTokenStore, TokenStore};

#[test]
fn load_returns_none_when_no_file_exists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileTokenStore::new(dir.path().join("session-token"));

    assert_eq!(store.load(), None);
}

#[test]
fn save_then_load_round_trips_the_token() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileTokenStore::new(dir.path().join("session-token"));

    store.save("opaque-token-value").expect("save");
    assert_eq!(store.load(), Some("opaque-token-value".to_string()));
}

#[test]
fn save_replaces_a_previous_token() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileTokenStore::new(dir.path().join("session-token"));

    store.save("first").expect("save");
    store.save("second").expect("save");
    assert_eq!(store.load(), Some("second".to_string()));
}

#[test]
fn clear_removes_the_token_and_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileTokenStore::new(dir.path().join("session-token"));

    store.save("token").expect("save");
    store.clear();
    assert_eq!(store.load(), None);

    // Clearing with nothing stored is a no-op, not an error.
    store.clear();
    assert_eq!(store.load(), None);
}

#[test]
fn surrounding_whitespace_is_trimmed_on_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session-token");
    std::fs::write(&path, "  token-with-newline\n").expect("write");

    let store = FileTokenStore::new(path);
    assert_eq!(store.load(), Some("token-with-newline".to_string()));
}

#[test]
fn an_empty_file_counts_as_absent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session-token");
    std::fs::write(&path, "").expect("write");

    let store = FileTokenStore::new(path);
    assert_eq!(store.load(), None);
}
