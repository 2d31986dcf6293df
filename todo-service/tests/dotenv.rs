//! `.env` loading. Kept in its own test binary because it mutates the
//! process environment.

use std::io::Write;

use clap::Parser;
use todo_service::{config::load_env_file, Config};

#[test]
fn env_file_supplies_mongodb_uri() {
    if std::env::var_os("MONGODB_URI").is_some()
        || std::env::var_os("MONGODB_COLLECTION").is_some()
    {
        // An existing variable wins over the file; nothing to check.
        return;
    }

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "MONGODB_URI=mongodb://from-env-file:27017").unwrap();
    writeln!(file, "MONGODB_COLLECTION=todos_from_file").unwrap();

    let loaded = load_env_file(Some(file.path())).unwrap();
    assert_eq!(loaded, file.path());

    let config = Config::try_parse_from(["todo-service"]).unwrap();
    assert_eq!(
        config.mongodb_uri.as_deref(),
        Some("mongodb://from-env-file:27017")
    );
    assert_eq!(config.collection, "todos_from_file");
}
