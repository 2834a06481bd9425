// Changes the process working directory, so it lives in its own test binary.

use postmeta::config::{Config, PROJECT_FILE};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn relative_directory_searches_parents() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(PROJECT_FILE), "url_prefix: /blog/\n").unwrap();
    let nested = dir.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    std::env::set_current_dir(&nested).unwrap();
    let config = Config::from_directory(Path::new(".")).unwrap();

    assert_eq!(config.url_prefix, "/blog/");
    assert!(config.posts_directory.ends_with("posts"));
    assert!(config.posts_directory.is_absolute());
}
