//! Derives the sub-zone a `type=path` record delegates to.
//!
//! Three modes, chosen by the record:
//! - default: the first path segment is the sub-zone label.
//! - `from=`: a positional pattern such as `/$2/$1`; each `$N` captures the
//!   path segment at its position and the labels are joined in ascending `N`
//!   order, so `/$2/$1` on `/a/b` yields `b.a`.
//! - `re=`: a regular expression matched against the path; the named group
//!   `label` wins, otherwise the first capture group.

use crate::record::Record;
use crate::DomainError;
use fancy_regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSplit {
    /// Labels prepended to the request host, e.g. `docs` or `b.a`.
    pub sub_zone: String,
    /// Path left after the matched part, always starting with `/`.
    pub remainder: String,
}

impl PathSplit {
    /// Host to resolve next: `<sub_zone>.<host>`.
    pub fn zone_for(&self, host: &str) -> String {
        format!("{}.{}", self.sub_zone, host)
    }
}

pub fn split_path(path: &str, record: &Record) -> Result<PathSplit, DomainError> {
    if record.has_conflicting_aliases() {
        return Err(DomainError::ConflictingAliases);
    }

    let split = if !record.re.is_empty() {
        split_by_regex(path, &record.re)?
    } else if !record.from.is_empty() {
        split_by_positions(path, &record.from)?
    } else {
        split_first_segment(path)?
    };

    if split.sub_zone.is_empty() || split.sub_zone.split('.').any(str::is_empty) {
        return Err(invalid(path, "empty sub-zone label"));
    }
    Ok(split)
}

fn invalid(path: &str, reason: impl Into<String>) -> DomainError {
    DomainError::InvalidPath {
        path: path.to_string(),
        reason: reason.into(),
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn remainder_of(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}

fn split_first_segment(path: &str) -> Result<PathSplit, DomainError> {
    let parts = segments(path);
    let (first, rest) = parts
        .split_first()
        .ok_or_else(|| invalid(path, "no path segment"))?;
    Ok(PathSplit {
        sub_zone: first.to_string(),
        remainder: remainder_of(rest),
    })
}

fn split_by_positions(path: &str, pattern: &str) -> Result<PathSplit, DomainError> {
    let pattern_parts = segments(pattern);
    let path_parts = segments(path);

    if path_parts.len() < pattern_parts.len() {
        return Err(invalid(path, format!("shorter than pattern {}", pattern)));
    }

    let mut labels: Vec<(usize, &str)> = Vec::new();
    for (expected, actual) in pattern_parts.iter().zip(&path_parts) {
        match expected.strip_prefix('$') {
            Some(position) => {
                let position: usize = position
                    .parse()
                    .map_err(|_| invalid(path, format!("bad placeholder {}", expected)))?;
                labels.push((position, actual));
            }
            None if expected == actual => {}
            None => {
                return Err(invalid(path, format!("does not match pattern {}", pattern)));
            }
        }
    }

    if labels.is_empty() {
        return Err(invalid(path, format!("pattern {} has no placeholders", pattern)));
    }
    labels.sort_by_key(|(position, _)| *position);

    Ok(PathSplit {
        sub_zone: labels
            .iter()
            .map(|(_, label)| *label)
            .collect::<Vec<_>>()
            .join("."),
        remainder: remainder_of(&path_parts[pattern_parts.len()..]),
    })
}

fn split_by_regex(path: &str, pattern: &str) -> Result<PathSplit, DomainError> {
    let regex = Regex::new(pattern).map_err(|e| invalid(path, format!("bad regex: {}", e)))?;
    let captures = regex
        .captures(path)
        .map_err(|e| invalid(path, format!("regex failed: {}", e)))?
        .ok_or_else(|| invalid(path, format!("does not match {}", pattern)))?;

    let label = captures
        .name("label")
        .or_else(|| captures.get(1))
        .ok_or_else(|| invalid(path, "regex has no capture group"))?;
    let matched_end = captures.get(0).map(|m| m.end()).unwrap_or(path.len());

    Ok(PathSplit {
        sub_zone: label.as_str().trim_matches('/').to_string(),
        remainder: remainder_of(&segments(&path[matched_end..])),
    })
}
