use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parse::{ParseResult, ParseState, Problems};

/// Why a route did not match at a given position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Problem {
    ExpectingLiteral { literal: String },
    ExpectingInt,
    ExpectingFloat,
    ExpectingHex,
    ExpectingOctal,
    ExpectingBinary,
    ExpectingEnd,
    ExpectingStart,
    ExpectingMethod { method: String },
    /// An unbounded capture had nothing to capture.
    ExpectingValue,
    ExpectingVariant { options: Vec<String> },
    ExpectingQueryParam { key: String },
    /// A malformed numeric literal.
    Invalid,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::ExpectingLiteral { literal } => write!(f, "expecting '{literal}'"),
            Problem::ExpectingInt => f.write_str("expecting an integer"),
            Problem::ExpectingFloat => f.write_str("expecting a number"),
            Problem::ExpectingHex => f.write_str("expecting a hexadecimal number"),
            Problem::ExpectingOctal => f.write_str("expecting an octal number"),
            Problem::ExpectingBinary => f.write_str("expecting a binary number"),
            Problem::ExpectingEnd => f.write_str("expecting the end of input"),
            Problem::ExpectingStart => f.write_str("expecting the start of input"),
            Problem::ExpectingMethod { method } => write!(f, "expecting method {method}"),
            Problem::ExpectingValue => f.write_str("expecting a non-empty value"),
            Problem::ExpectingVariant { options } => {
                write!(f, "expecting one of [{}]", options.join(", "))
            }
            Problem::ExpectingQueryParam { key } => write!(f, "expecting query parameter '{key}'"),
            Problem::Invalid => f.write_str("invalid number"),
        }
    }
}

/// What a route was in the middle of when it failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "key", rename_all = "snake_case")]
pub enum RouteContext {
    /// A named path capture.
    Capture(String),
    /// A query-bound parameter.
    Query(String),
}

impl fmt::Display for RouteContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteContext::Capture(key) => write!(f, "capture '{key}'"),
            RouteContext::Query(key) => write!(f, "query parameter '{key}'"),
        }
    }
}

pub type RouteState = ParseState<RouteContext>;
pub type RouteProblems = Problems<RouteContext, Problem>;
pub type RouteParse<T> = ParseResult<RouteContext, Problem, T>;
