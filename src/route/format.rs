use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

use super::url;
use crate::parse::Headers;

/// Accumulator threaded through a route while formatting.
///
/// Routes are formatted back to front, so fragments and query parameters are
/// prepended.
#[derive(Debug, Clone, Default)]
pub struct FormatState {
    fragments: VecDeque<String>,
    method: Option<String>,
    headers: Headers,
    params: VecDeque<(String, String)>,
}

impl FormatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepend(mut self, fragment: impl Into<String>) -> Self {
        self.fragments.push_front(fragment.into());
        self
    }

    pub fn prepend_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push_front((key.into(), value.into()));
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn pathname(&self) -> String {
        self.fragments.iter().map(String::as_str).collect()
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn finish(self) -> FormattedUrl {
        FormattedUrl {
            pathname: self.pathname(),
            search: url::format_search(self.params()),
            hash: String::new(),
            method: self.method,
        }
    }
}

/// The output of formatting a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedUrl {
    pub pathname: String,
    /// `?key=value&...`, or empty.
    pub search: String,
    pub hash: String,
    pub method: Option<String>,
}

impl fmt::Display for FormattedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.hash, self.search)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormatError {
    #[error("value has no entry for capture '{key}'")]
    MissingKey { key: String },
    #[error("capture '{key}' needs a record but got {found}")]
    ExpectedRecord { key: String, found: &'static str },
    #[error("expected {expected} value but got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("'{value}' is not one of [{}]", .options.join(", "))]
    UnknownVariant { value: String, options: Vec<String> },
    #[error("'{value}' contains the delimiter '{delimiter}'")]
    ContainsDelimiter { value: String, delimiter: String },
    #[error("capture value must not be empty")]
    EmptyCapture,
    #[error("{value} cannot be written as a route number")]
    OutOfRange { value: String },
}

pub type FormatResult<T> = Result<T, FormatError>;
