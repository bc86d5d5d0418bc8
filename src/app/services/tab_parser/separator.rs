//! Field separator policies for table lines
//!
//! The source tables are laid out with hand-picked column widths, so the gap
//! between two columns is not guaranteed to be exactly one separator wide.
//! Both policies here trim every field and never yield empty fields.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::{Error, Result};

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// How a table line is split into fields
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Separator {
    /// Split on an exact substring; gaps spanning several separators collapse
    Literal(String),
    /// Split on any run of whitespace
    Whitespace,
}

impl Separator {
    /// Create a literal separator, rejecting the empty string
    pub fn literal(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(Error::configuration("Field separator cannot be empty"));
        }
        Ok(Self::Literal(text))
    }

    /// Split a line into trimmed, non-empty fields
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Self::Literal(text) => line
                .split(text.as_str())
                .map(str::trim)
                .filter(|field| !field.is_empty())
                .collect(),
            Self::Whitespace => WHITESPACE_RUN
                .split(line.trim())
                .filter(|field| !field.is_empty())
                .collect(),
        }
    }
}

impl Default for Separator {
    fn default() -> Self {
        Self::Literal(crate::constants::DEFAULT_SEPARATOR.to_string())
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whitespace => write!(f, "whitespace"),
            Self::Literal(text) if text == "\t" => write!(f, "tab"),
            Self::Literal(text) if text.chars().all(|c| c == ' ') => {
                write!(f, "spaces:{}", text.len())
            }
            Self::Literal(text) => write!(f, "{}", text),
        }
    }
}

/// Parses `whitespace`, `tab`, `spaces:N`, or any other text as a literal
impl FromStr for Separator {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "whitespace" => Ok(Self::Whitespace),
            "tab" => Ok(Self::Literal("\t".to_string())),
            "" => Err("Field separator cannot be empty".to_string()),
            _ => match s.strip_prefix("spaces:") {
                Some(count) => {
                    let width: usize = count
                        .parse()
                        .map_err(|_| format!("Invalid space count '{}'", count))?;
                    if width == 0 {
                        return Err("Space separator width must be at least 1".to_string());
                    }
                    Ok(Self::Literal(" ".repeat(width)))
                }
                None => Ok(Self::Literal(s.to_string())),
            },
        }
    }
}

impl TryFrom<String> for Separator {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Separator> for String {
    fn from(separator: Separator) -> Self {
        separator.to_string()
    }
}
