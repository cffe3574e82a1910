use std::fmt::Write as _;
use thiserror::Error;

use super::OptionsError;
use super::problem::{Problem, RouteProblems};

/// A route, or every route of a router, failed to match.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", render(.problems))]
pub struct ParseError {
    pub problems: RouteProblems,
}

impl ParseError {
    pub fn new(problems: RouteProblems) -> Self {
        Self { problems }
    }

    /// The first reported problem, if any.
    pub fn problem(&self) -> Option<&Problem> {
        self.problems.first().map(|dead_end| &dead_end.problem)
    }
}

impl From<RouteProblems> for ParseError {
    fn from(problems: RouteProblems) -> Self {
        Self::new(problems)
    }
}

fn render(problems: &RouteProblems) -> String {
    if problems.is_empty() {
        return "no route to match against".to_owned();
    }
    let mut out = String::new();
    for (index, dead_end) in problems.iter().enumerate() {
        if index > 0 {
            out.push_str("; ");
        }
        let _ = write!(
            out,
            "{}:{}: {}",
            dead_end.line, dead_end.column, dead_end.problem
        );
        for frame in &dead_end.context {
            let _ = write!(out, " in {} at {}:{}", frame.context, frame.line, frame.column);
        }
    }
    out
}

/// A segment list that cannot be compiled into a route.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("capture '{second}' directly follows unbounded capture '{first}'")]
    AdjacentCaptures { first: String, second: String },
    #[error("rest capture '{key}' must be the last path segment")]
    RestNotLast { key: String },
    #[error("capture key '{key}' is used more than once")]
    DuplicateKey { key: String },
    #[error("capture key must not be empty")]
    EmptyKey,
    #[error("enumerated capture '{key}' has no options")]
    EmptyVariants { key: String },
    #[error("route declares method {declared} but options require {configured}")]
    MethodConflict { declared: String, configured: String },
    #[error(transparent)]
    Options(#[from] OptionsError),
}

pub type RouteResult<T> = Result<T, RouteError>;
