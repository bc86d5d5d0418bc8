//! Core tabular parser implementation
//!
//! The parser borrows its input text and produces records lazily. Each call
//! to [`TabularParser::records`] starts a fresh pass, so a consumer can walk
//! the table again without re-reading or re-splitting the source.

use std::str::FromStr;
use tracing::debug;

use super::separator::Separator;
use crate::app::models::Record;
use crate::{Error, Result};

/// What to do with a line whose field count differs from the header count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnPolicy {
    /// Fail the line with a column count error
    #[default]
    Strict,
    /// Pad missing trailing fields with empty strings and drop surplus fields
    Lenient,
}

impl FromStr for ColumnPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(format!(
                "Invalid column policy '{}'. Valid options: strict, lenient",
                other
            )),
        }
    }
}

/// Parser pairing separator-split line fields with a header list
#[derive(Debug, Clone)]
pub struct TabularParser<'a> {
    text: &'a str,
    headers: Vec<String>,
    separator: Separator,
    policy: ColumnPolicy,
    first_line: usize,
}

impl<'a> TabularParser<'a> {
    /// Create a parser over `text` with the strict column policy
    pub fn new<H: AsRef<str>>(text: &'a str, headers: &[H], separator: Separator) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.as_ref().to_string()).collect();

        let distinct = headers
            .iter()
            .enumerate()
            .filter(|(i, h)| !headers[..*i].contains(h))
            .count();
        if distinct < headers.len() {
            debug!(
                "Header list has {} duplicate names; later columns overwrite earlier ones",
                headers.len() - distinct
            );
        }

        Self {
            text,
            headers,
            separator,
            policy: ColumnPolicy::default(),
            first_line: 1,
        }
    }

    /// Set the column count policy
    pub fn with_policy(mut self, policy: ColumnPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Number reported for the first line of `text`
    ///
    /// Set this when the text was cut from a larger file so that line numbers
    /// in errors and from [`Records::line_number`] refer to that file.
    pub fn with_first_line(mut self, first_line: usize) -> Self {
        self.first_line = first_line.max(1);
        self
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn separator(&self) -> &Separator {
        &self.separator
    }

    pub fn policy(&self) -> ColumnPolicy {
        self.policy
    }

    /// Start a new pass over the table
    pub fn records(&self) -> Records<'_, 'a> {
        Records {
            parser: self,
            lines: self.text.lines().enumerate(),
            line_number: 0,
        }
    }

    /// Parse one line; `None` for lines that are blank after trimming
    ///
    /// `line_number` is 1-based and only used in error reports.
    pub fn parse_line(&self, line_number: usize, line: &str) -> Option<Result<Record>> {
        if line.trim().is_empty() {
            return None;
        }

        let fields = self.separator.split(line);
        let expected = self.headers.len();

        if fields.len() != expected && self.policy == ColumnPolicy::Strict {
            return Some(Err(Error::column_count(line_number, expected, fields.len())));
        }

        let mut record = Record::with_capacity(expected);
        for (i, header) in self.headers.iter().enumerate() {
            record.insert(header.as_str(), fields.get(i).copied().unwrap_or(""));
        }

        Some(Ok(record))
    }
}

/// Lazy iterator over the records of one parser pass
#[derive(Debug, Clone)]
pub struct Records<'p, 'a> {
    parser: &'p TabularParser<'a>,
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    line_number: usize,
}

impl Records<'_, '_> {
    /// Line number of the most recently yielded record, 0 before the first
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl Iterator for Records<'_, '_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, line) in self.lines.by_ref() {
            let line_number = self.parser.first_line + index;
            if let Some(result) = self.parser.parse_line(line_number, line) {
                self.line_number = line_number;
                return Some(result);
            }
        }
        None
    }
}

impl<'p, 'a> IntoIterator for &'p TabularParser<'a> {
    type Item = Result<Record>;
    type IntoIter = Records<'p, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.records()
    }
}
