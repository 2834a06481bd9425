//! The library code for `postmeta`, a helper for a blog written as plain HTML
//! files. At its heart is [`crate::extract`], a handful of pure functions that
//! scrape known fields (meta tags, the title, dates in file names) out of raw
//! HTML with targeted regular expressions rather than a parser.
//!
//! Two callers are built on top of it:
//!
//! 1. The generator ([`crate::build`]) turns every post file into a
//!    [`crate::post::Post`], sorts them newest first, and writes `posts.json`
//!    ([`crate::write`]).
//! 2. The validator ([`crate::validate`]) runs the same extraction against
//!    each post file and reports missing or suspicious metadata.
//!
//! Both read their settings from a `postmeta.yaml` project file
//! ([`crate::config`]).

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod extract;
pub mod logging;
pub mod post;
pub mod validate;
pub mod write;

mod util;
