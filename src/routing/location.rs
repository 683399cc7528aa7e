//! Navigation target parsing.
//!
//! # Responsibilities
//! - Split a target (`/characters/7?tab=info#bio`) into path, query and hash
//! - Strip the application base from the path
//! - Reject targets pointing at another origin
//!
//! # Design Decisions
//! - Parsing is delegated to `url` against a fixed internal origin, which
//!   splits off query and hash and resolves relative targets
//! - Absolute paths are kept as written: `.` and `..` segments are not
//!   collapsed, so `/characters/..` is a character with id `..`
//! - The path stays percent-encoded; decoding happens per segment at match time
//!
//! # Base
//! Targets are browser paths that normally carry the base
//! (`/catalog/characters/1` under base `/catalog`). A path that does not start
//! with the base is taken as already base-relative. A path that does start
//! with it always has it removed, so under base `/characters` the route
//! `/characters/:id` is reached as `/characters/characters/1`.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::{form_urlencoded, Url};

const ORIGIN: &str = "http://app.invalid/";

/// Characters escaped in a raw absolute path. `%` and `/` pass through so
/// existing escapes and segment boundaries survive.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Errors produced when a navigation target cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("invalid navigation target: {0}")]
    Invalid(#[from] url::ParseError),

    #[error("navigation target `{0}` points at another origin")]
    External(String),
}

/// A parsed navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Location {
    /// Absolute path relative to the base, percent-encoded.
    pub path: String,

    /// Decoded query parameters; the last occurrence of a key wins.
    pub query: BTreeMap<String, String>,

    /// Fragment without the leading `#`.
    pub hash: Option<String>,
}

impl Location {
    /// Parse `target`, removing `base` from the front of its path.
    ///
    /// Paths outside the base are kept whole.
    pub fn parse(target: &str, base: &str) -> Result<Self, LocationError> {
        let origin = Url::parse(ORIGIN)?;
        let url = origin.join(target)?;
        if url.origin() != origin.origin() {
            return Err(LocationError::External(target.to_string()));
        }

        let path = match raw_absolute_path(target) {
            Some(raw) => utf8_percent_encode(raw, PATH).to_string(),
            None => url.path().to_string(),
        };
        let path = strip_base(&path, base).to_string();
        let query = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let hash = url.fragment().filter(|f| !f.is_empty()).map(str::to_string);

        Ok(Self { path, query, hash })
    }

    /// A location with only a path.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Path, query and hash rendered back into a single string.
    pub fn full_path(&self) -> String {
        let mut out = self.path.clone();
        if !self.query.is_empty() {
            out.push('?');
            out.push_str(
                &form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(&self.query)
                    .finish(),
            );
        }
        if let Some(hash) = &self.hash {
            out.push('#');
            out.push_str(hash);
        }
        out
    }
}

/// Normalize a base to `/` or `/prefix` without a trailing slash.
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Prefix an absolute path with a normalized base.
pub fn join_base(base: &str, path: &str) -> String {
    if base == "/" {
        path.to_string()
    } else if path == "/" {
        base.to_string()
    } else {
        format!("{}{}", base, path)
    }
}

/// The path part of an absolute target, before any query or hash.
fn raw_absolute_path(target: &str) -> Option<&str> {
    if !target.starts_with('/') {
        return None;
    }
    let end = target.find(['?', '#']).unwrap_or(target.len());
    Some(&target[..end])
}

fn strip_base<'a>(path: &'a str, base: &str) -> &'a str {
    if base == "/" {
        return path;
    }
    match path.strip_prefix(base) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}
