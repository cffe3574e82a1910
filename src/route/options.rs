use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::position::is_alpha;

/// Settings applied when a segment list is compiled into a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteOptions {
    /// Method guard added in front of the path. A method written into the
    /// first literal (`"POST /ipfs/"`) must agree with it.
    pub method: Option<String>,
    /// Accept a single trailing `/` after the last segment.
    pub trailing_slash: bool,
    /// Require the match to start at the beginning of the pathname.
    pub anchor_root: bool,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            method: None,
            trailing_slash: true,
            anchor_root: true,
        }
    }
}

impl RouteOptions {
    pub fn builder() -> RouteOptionsBuilder {
        RouteOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if let Some(method) = &self.method {
            validate_method(method)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_method(method: &str) -> Result<(), OptionsError> {
    if method.is_empty() {
        return Err(OptionsError::EmptyMethod);
    }
    if let Some(invalid) = method.chars().find(|c| !is_alpha(*c)) {
        return Err(OptionsError::InvalidMethodCharacter {
            method: method.to_owned(),
            invalid,
        });
    }
    Ok(())
}

#[derive(Debug, Default, Clone)]
pub struct RouteOptionsBuilder {
    options: RouteOptions,
}

impl RouteOptionsBuilder {
    pub fn method<S: Into<String>>(mut self, method: S) -> Self {
        self.options.method = Some(method.into());
        self
    }

    pub fn trailing_slash(mut self, value: bool) -> Self {
        self.options.trailing_slash = value;
        self
    }

    pub fn anchor_root(mut self, value: bool) -> Self {
        self.options.anchor_root = value;
        self
    }

    pub fn build(self) -> Result<RouteOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("method must not be empty")]
    EmptyMethod,
    #[error("method '{method}' contains invalid character {invalid:?}")]
    InvalidMethodCharacter { method: String, invalid: char },
}
