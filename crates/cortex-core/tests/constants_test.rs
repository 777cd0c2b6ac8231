use cortex_core::constants::*;

#[test]
fn version_matches_package_version() {
    assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
}

#[test]
fn pool_size_default_is_within_its_own_max() {
    assert!(DEFAULT_READ_POOL_SIZE <= MAX_READ_POOL_SIZE);
}

#[test]
fn allowed_db_extensions_cover_the_common_sqlite_spellings() {
    for ext in ["db", "sqlite", "sqlite3"] {
        assert!(ALLOWED_DB_EXTENSIONS.contains(&ext));
    }
}

#[test]
fn marker_file_name_is_a_plain_relative_filename() {
    assert!(!MARKER_FILE_NAME.contains('/'));
    assert!(!MARKER_FILE_NAME.is_empty());
}
