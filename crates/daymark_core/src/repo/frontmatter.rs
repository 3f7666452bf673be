//! YAML header parsing for daily notes.
//!
//! # Responsibility
//! - Locate the `---` delimited header at the top of a note.
//! - Read the tag field using the host's frontmatter rules.
//!
//! # Invariants
//! - Returned tags always carry a leading `#`.
//! - Declaration order and duplicates are preserved.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

const HEADER_DELIMITER: &str = "---";
const HEADER_END_ALT: &str = "...";
const TAG_KEYS: [&str; 2] = ["tags", "tag"];

static TAG_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,\s]+").expect("valid tag separator regex"));

/// Header parse failures. Callers treat these as "no tags".
#[derive(Debug)]
pub enum FrontmatterError {
    Unterminated,
    Yaml(serde_yaml::Error),
}

impl Display for FrontmatterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unterminated => write!(f, "header block is not terminated"),
            Self::Yaml(err) => write!(f, "header block is not valid yaml: {err}"),
        }
    }
}

impl Error for FrontmatterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unterminated => None,
            Self::Yaml(err) => Some(err),
        }
    }
}

/// Returns the raw header text, `Ok(None)` when the note has no header.
pub fn split_header(content: &str) -> Result<Option<&str>, FrontmatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');
    match lines.next() {
        Some(first) if first.trim_end() == HEADER_DELIMITER => {}
        _ => return Ok(None),
    }

    let start = content.find('\n').map_or(content.len(), |idx| idx + 1);
    let mut offset = start;
    for line in lines {
        let trimmed = line.trim_end();
        if trimmed == HEADER_DELIMITER || trimmed == HEADER_END_ALT {
            return Ok(Some(&content[start..offset]));
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unterminated)
}

/// Parses the tag field of a note header.
pub fn parse_header_tags(content: &str) -> Result<Option<Vec<String>>, FrontmatterError> {
    let Some(header) = split_header(content)? else {
        return Ok(None);
    };
    if header.trim().is_empty() {
        return Ok(None);
    }

    let value: Value = serde_yaml::from_str(header).map_err(FrontmatterError::Yaml)?;
    let Some(field) = TAG_KEYS.iter().find_map(|key| value.get(*key)) else {
        return Ok(None);
    };

    let raw: Vec<String> = match field {
        Value::Sequence(items) => items.iter().filter_map(scalar_to_string).collect(),
        Value::Null => return Ok(None),
        other => match scalar_to_string(other) {
            Some(text) => TAG_SEPARATOR_RE
                .split(&text)
                .map(str::to_string)
                .collect(),
            None => return Ok(None),
        },
    };

    Ok(Some(
        raw.iter().map(String::as_str).filter_map(with_marker).collect(),
    ))
}

/// Lenient variant used by repositories: malformed headers yield `None`.
pub fn header_tags_or_none(content: &str) -> Option<Vec<String>> {
    match parse_header_tags(content) {
        Ok(tags) => tags,
        Err(err) => {
            debug!("event=header_parse module=frontmatter status=error error={err}");
            None
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn with_marker(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() || trimmed == "#" {
        return None;
    }
    if trimmed.starts_with('#') {
        Some(trimmed.to_string())
    } else {
        Some(format!("#{trimmed}"))
    }
}
