//! Path pattern parsing, matching and rendering.
//!
//! # Syntax
//! - `/characters` static segments
//! - `/characters/:id` named parameter, matches exactly one non-empty segment
//! - `/files/*rest` catch-all, matches zero or more trailing segments
//!
//! # Design Decisions
//! - Segment-wise comparison, no regex
//! - Parameter values are percent-decoded on match and percent-encoded on render
//! - `.` and `..` values render as `%2E` and `%2E%2E` so no consumer of the
//!   path can collapse them as dot segments
//! - Static segments compare ASCII-case-insensitively unless `case_sensitive`

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::routing::error::PatternError;

/// Path parameters extracted from (or substituted into) a pattern.
pub type Params = BTreeMap<String, String>;

/// Characters escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Options controlling how paths are compared with patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchOptions {
    /// Compare static segments case-sensitively.
    pub case_sensitive: bool,

    /// Treat a trailing slash as significant.
    pub strict: bool,
}

/// One segment of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    Param(String),
    CatchAll(String),
}

impl Segment {
    fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Static(_) => None,
            Segment::Param(name) | Segment::CatchAll(name) => Some(name),
        }
    }
}

/// A parsed route path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
    trailing_slash: bool,
}

impl PathPattern {
    /// Parse a pattern such as `/characters/:id`.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let rest = raw
            .strip_prefix('/')
            .ok_or_else(|| PatternError::MissingLeadingSlash(raw.to_string()))?;
        if rest.starts_with('/') {
            return Err(PatternError::EmptySegment(raw.to_string()));
        }

        let trailing_slash = rest.ends_with('/');
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let mut segments: Vec<Segment> = Vec::new();
        if !rest.is_empty() {
            for part in rest.split('/') {
                if part.is_empty() {
                    return Err(PatternError::EmptySegment(raw.to_string()));
                }
                if matches!(segments.last(), Some(Segment::CatchAll(_))) {
                    return Err(PatternError::CatchAllNotLast(raw.to_string()));
                }

                let segment = if let Some(name) = part.strip_prefix(':') {
                    Segment::Param(validate_param_name(raw, name)?)
                } else if let Some(name) = part.strip_prefix('*') {
                    Segment::CatchAll(validate_param_name(raw, name)?)
                } else {
                    Segment::Static(part.to_string())
                };

                if let Some(name) = segment.param_name() {
                    if segments.iter().any(|s| s.param_name() == Some(name)) {
                        return Err(PatternError::DuplicateParam {
                            pattern: raw.to_string(),
                            name: name.to_string(),
                        });
                    }
                }
                segments.push(segment);
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
            trailing_slash,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the parameters declared by this pattern, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::param_name)
    }

    /// Returns true if the pattern has no parameters.
    pub fn is_static(&self) -> bool {
        self.param_names().next().is_none()
    }

    /// Key identifying patterns that match exactly the same set of paths.
    ///
    /// Parameter names are erased; static segments are lowercased when
    /// matching is case-insensitive.
    pub fn structural_key(&self, case_sensitive: bool) -> String {
        let parts: Vec<String> = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Static(s) if case_sensitive => s.clone(),
                Segment::Static(s) => s.to_ascii_lowercase(),
                Segment::Param(_) => ":".to_string(),
                Segment::CatchAll(_) => "*".to_string(),
            })
            .collect();
        format!("/{}", parts.join("/"))
    }

    /// Match an absolute, percent-encoded path (no query or hash).
    ///
    /// Returns the decoded parameters on success.
    pub fn matches(&self, path: &str, options: MatchOptions) -> Option<Params> {
        let trimmed = path.strip_prefix('/')?;
        let path_trailing = trimmed.ends_with('/');
        if options.strict && !self.segments.is_empty() && path_trailing != self.trailing_slash {
            return None;
        }
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

        let parts: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        let mut params = Params::new();
        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Static(expected) => {
                    let actual = decode(parts.get(index)?);
                    let equal = if options.case_sensitive {
                        actual == *expected
                    } else {
                        actual.eq_ignore_ascii_case(expected)
                    };
                    if !equal {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let part = parts.get(index)?;
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), decode(part));
                }
                Segment::CatchAll(name) => {
                    let rest: Vec<String> = parts.get(index..)?.iter().map(|p| decode(p)).collect();
                    params.insert(name.clone(), rest.join("/"));
                    return Some(params);
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(params)
    }

    /// Substitute `params` into the pattern, producing a concrete path.
    ///
    /// On failure returns the name of the first required parameter that is
    /// absent or empty. A catch-all is optional.
    pub fn render(&self, params: &Params) -> Result<String, String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Static(s) => {
                    out.push('/');
                    out.push_str(s);
                }
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| name.clone())?;
                    push_segment(&mut out, value);
                }
                Segment::CatchAll(name) => {
                    let value = params.get(name).map(|v| v.trim_matches('/')).unwrap_or("");
                    for piece in value.split('/').filter(|p| !p.is_empty()) {
                        push_segment(&mut out, piece);
                    }
                }
            }
        }

        if out.is_empty() || self.trailing_slash {
            out.push('/');
        }
        Ok(out)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.raw)
    }
}

impl FromStr for PathPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn validate_param_name(pattern: &str, name: &str) -> Result<String, PatternError> {
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(name.to_string())
    } else {
        Err(PatternError::InvalidParamName {
            pattern: pattern.to_string(),
            name: name.to_string(),
        })
    }
}

fn push_segment(out: &mut String, value: &str) {
    out.push('/');
    match value {
        "." => out.push_str("%2E"),
        ".." => out.push_str("%2E%2E"),
        _ => out.extend(utf8_percent_encode(value, SEGMENT)),
    }
}

fn decode(part: &str) -> String {
    percent_decode_str(part).decode_utf8_lossy().into_owned()
}
