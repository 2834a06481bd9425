//! Defines the [`Post`] type, one entry of the generated `posts.json`, and
//! [`Post::from_html`] which assembles it from a post file using only the
//! functions in [`crate::extract`].

use crate::extract::*;
use serde::Serialize;
use std::fmt;

/// One published post as listed in `posts.json`. Field order is the JSON key
/// order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Post {
    /// The page title, see [`extract_title`].
    pub title: String,

    /// Site-relative URL of the post, e.g. `/posts/2025-01-15-hello.html`.
    pub url: String,

    /// Publication date in `YYYY-MM-DD` form.
    pub date: String,

    /// The `description` meta tag, or empty.
    pub excerpt: String,

    /// Tags from the `keywords` (or `tags`) meta tag, in source order.
    pub tags: Vec<String>,

    /// Cover image reference from `<meta name="cover">` or `og:image`.
    pub cover: Option<String>,
}

impl Post {
    /// Builds a [`Post`] from a file name and the file's HTML. The date comes
    /// from the `date` meta tag when present, otherwise from the file name's
    /// leading `YYYY-MM-DD`. A post needs both a title and a real calendar
    /// date.
    pub fn from_html(file_name: &str, html: &str, url_prefix: &str) -> Result<Post> {
        let title = extract_title(html).ok_or(Error::MissingTitle)?;
        Ok(Post {
            title,
            url: join_url(url_prefix, file_name),
            date: post_date(file_name, html)?,
            excerpt: extract_meta_tag(html, "description").unwrap_or_default(),
            tags: extract_meta_tag(html, "keywords")
                .or_else(|| extract_meta_tag(html, "tags"))
                .map(|raw| split_tags(&raw))
                .unwrap_or_default(),
            cover: extract_meta_tag(html, "cover")
                .or_else(|| extract_meta_property(html, "og:image"))
                .filter(|cover| !cover.is_empty()),
        })
    }
}

fn post_date(file_name: &str, html: &str) -> Result<String> {
    let meta_date = extract_meta_tag(html, "date").filter(|date| !date.is_empty());
    if let Some(date) = meta_date {
        return match is_valid_calendar_date(&date) {
            true => Ok(date),
            false => Err(Error::InvalidDate(date)),
        };
    }
    extract_leading_date(file_name)
        .filter(|date| is_valid_calendar_date(date))
        .ok_or(Error::MissingDate)
}

fn join_url(prefix: &str, file_name: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), file_name)
}

type Result<T> = std::result::Result<T, Error>;

/// The reasons a post file cannot become a [`Post`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Returned when neither a `<title>` nor an `<h1>` was found.
    MissingTitle,

    /// Returned when there is no `date` meta tag and the file name has no
    /// valid leading date.
    MissingDate,

    /// Returned when the `date` meta tag is not a real `YYYY-MM-DD` date.
    InvalidDate(String),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingTitle => write!(f, "No title found"),
            Error::MissingDate => write!(f, "No date found in meta tags or file name"),
            Error::InvalidDate(date) => write!(f, "Invalid date '{}'", date),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Hello World</title>
  <meta name="description" content="A first post">
  <meta name="date" content="2025-03-01">
  <meta name="keywords" content="rust, blog、日記">
  <meta property="og:image" content="/img/hello.png">
</head>
<body><h1>Ignored</h1></body>
</html>"#;

    #[test]
    fn test_from_html_full() {
        let post = Post::from_html("2025-01-15-hello.html", FULL, "/posts/").unwrap();
        assert_eq!(
            post,
            Post {
                title: "Hello World".to_owned(),
                url: "/posts/2025-01-15-hello.html".to_owned(),
                date: "2025-03-01".to_owned(),
                excerpt: "A first post".to_owned(),
                tags: vec!["rust".to_owned(), "blog".to_owned(), "日記".to_owned()],
                cover: Some("/img/hello.png".to_owned()),
            }
        );
    }

    #[test]
    fn test_from_html_minimal_uses_file_name_date() {
        let post = Post::from_html("2025-01-15-min.html", "<h1>Min</h1>", "/posts").unwrap();
        assert_eq!(post.title, "Min");
        assert_eq!(post.url, "/posts/2025-01-15-min.html");
        assert_eq!(post.date, "2025-01-15");
        assert_eq!(post.excerpt, "");
        assert!(post.tags.is_empty());
        assert_eq!(post.cover, None);
    }

    #[test]
    fn test_cover_meta_wins_over_og_image() {
        let html = r#"<title>T</title><meta property="og:image" content="og.png"><meta name="cover" content="cover.png">"#;
        let post = Post::from_html("2025-01-15-t.html", html, "/").unwrap();
        assert_eq!(post.cover, Some("cover.png".to_owned()));
        assert_eq!(post.url, "/2025-01-15-t.html");
    }

    #[test]
    fn test_tags_meta_fallback() {
        let html = r#"<title>T</title><meta name="tags" content="a，b">"#;
        let post = Post::from_html("2025-01-15-t.html", html, "/posts/").unwrap();
        assert_eq!(post.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_title() {
        assert_eq!(
            Post::from_html("2025-01-15-x.html", "<p>body</p>", "/posts/"),
            Err(Error::MissingTitle)
        );
    }

    #[test]
    fn test_blank_meta_date_uses_file_name_date() {
        let html = r#"<title>T</title><meta name="date" content="  ">"#;
        let post = Post::from_html("2025-01-15-x.html", html, "/posts/").unwrap();
        assert_eq!(post.date, "2025-01-15");
    }

    #[test]
    fn test_missing_and_invalid_dates() {
        assert_eq!(
            Post::from_html("undated.html", "<title>T</title>", "/posts/"),
            Err(Error::MissingDate)
        );
        assert_eq!(
            Post::from_html("2025-02-30-x.html", "<title>T</title>", "/posts/"),
            Err(Error::MissingDate)
        );
        let html = r#"<title>T</title><meta name="date" content="2025-13-01">"#;
        assert_eq!(
            Post::from_html("2025-01-15-x.html", html, "/posts/"),
            Err(Error::InvalidDate("2025-13-01".to_owned()))
        );
    }
}
