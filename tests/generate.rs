use postmeta::build::{build_index, find_post_files, generate, Error};
use postmeta::config::{Config, PROJECT_FILE};
use postmeta::post::Error as PostError;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_post(dir: &Path, name: &str, title: &str, extra_head: &str) {
    let html = format!(
        "<!DOCTYPE html>\n<html><head><title>{}</title>{}</head><body></body></html>\n",
        title, extra_head
    );
    fs::write(dir.join(name), html).unwrap();
}

fn project() -> (TempDir, Config) {
    postmeta::logging::initialize_for_tests();
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("posts")).unwrap();
    let config = Config::from_directory(dir.path()).unwrap();
    (dir, config)
}

#[test]
fn finds_only_html_files_outside_exclude_list() {
    let (dir, config) = project();
    let posts = dir.path().join("posts");
    write_post(&posts, "2025-01-02-b.html", "B", "");
    write_post(&posts, "2025-01-01-a.HTML", "A", "");
    write_post(&posts, "index.html", "Index", "");
    fs::write(posts.join("notes.txt"), "not a post").unwrap();
    fs::create_dir(posts.join("drafts.html")).unwrap();
    write_post(&posts.join("drafts.html"), "2025-01-03-nested.html", "N", "");

    let names: Vec<String> = find_post_files(&config)
        .unwrap()
        .into_iter()
        .map(|f| f.file_name)
        .collect();
    assert_eq!(names, vec!["2025-01-01-a.HTML", "2025-01-02-b.html"]);
}

#[test]
fn sorts_newest_first_and_skips_undated_posts() {
    let (dir, config) = project();
    let posts = dir.path().join("posts");
    write_post(&posts, "2024-12-31-old.html", "Old", "");
    write_post(
        &posts,
        "2025-01-10-new.html",
        "New",
        r#"<meta name="description" content="Fresh"><meta name="keywords" content="a, b">"#,
    );
    write_post(&posts, "2025-01-10-also.html", "Also", "");
    write_post(&posts, "undated.html", "Undated", "");
    write_post(&posts, "2025-02-30-impossible.html", "Impossible", "");

    let index = build_index(&config).unwrap();
    let summary: Vec<(&str, &str)> = index
        .iter()
        .map(|p| (p.date.as_str(), p.url.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("2025-01-10", "/posts/2025-01-10-also.html"),
            ("2025-01-10", "/posts/2025-01-10-new.html"),
            ("2024-12-31", "/posts/2024-12-31-old.html"),
        ]
    );
    assert_eq!(index[1].excerpt, "Fresh");
    assert_eq!(index[1].tags, vec!["a", "b"]);
}

#[test]
fn missing_title_aborts_the_build() {
    let (dir, config) = project();
    let posts = dir.path().join("posts");
    fs::write(posts.join("2025-01-01-untitled.html"), "<p>no title</p>").unwrap();

    match build_index(&config) {
        Err(Error::Post { path, err }) => {
            assert_eq!(path, posts.join("2025-01-01-untitled.html"));
            assert_eq!(err, PostError::MissingTitle);
        }
        other => panic!("expected a missing-title error, got {:?}", other),
    }
}

#[test]
fn missing_posts_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = Config::from_directory(dir.path()).unwrap();
    assert!(matches!(build_index(&config), Err(Error::Walk(_))));
}

#[test]
fn generate_writes_json_using_project_settings() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(PROJECT_FILE),
        "posts_directory: content\noutput_file: public/posts.json\nurl_prefix: /blog\n",
    )
    .unwrap();
    let content = dir.path().join("content");
    fs::create_dir(&content).unwrap();
    write_post(
        &content,
        "2025-01-15-hello.html",
        "Hello",
        r#"<meta content="/img/c.png" property="og:image">"#,
    );

    let config = Config::from_directory(dir.path()).unwrap();
    assert_eq!(generate(&config).unwrap(), 1);

    let json = fs::read_to_string(dir.path().join("public").join("posts.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "title": "Hello",
            "url": "/blog/2025-01-15-hello.html",
            "date": "2025-01-15",
            "excerpt": "",
            "tags": [],
            "cover": "/img/c.png"
        }])
    );
    let keys = ["title", "url", "date", "excerpt", "tags", "cover"];
    let positions: Vec<usize> = keys
        .iter()
        .map(|k| json.find(&format!("\"{}\"", k)).unwrap())
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn non_utf8_post_is_decoded_lossily() {
    let (dir, config) = project();
    let posts = dir.path().join("posts");
    write_post(&posts, "2025-01-01-ok.html", "Fine", "");
    let mut latin1 = b"<!DOCTYPE html><title>Caf".to_vec();
    latin1.push(0xE9);
    latin1.extend_from_slice(b"</title>");
    fs::write(posts.join("2025-01-02-latin1.html"), latin1).unwrap();

    let index = build_index(&config).unwrap();
    let titles: Vec<&str> = index.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Caf\u{FFFD}", "Fine"]);
}
