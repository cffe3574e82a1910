use memchr::memmem;
use std::fmt;

use crate::combinator::{at_end, chomp_until_literal, parse_token, sequence, to_end, within};
use crate::numeric::{NumberConfig, parse_number};
use crate::parse::{ParseResult, fail, fail_at};
use crate::position::{match_literal, position_at};

use super::format::{FormatError, FormatResult, FormatState};
use super::problem::{Problem, RouteContext, RouteParse, RouteState};
use super::value::{Record, Value};

/// How a numeric capture is written back out.
///
/// Only values the matching parser reads back are written: integer notations
/// take non-negative `Value::Int`, `Float` also takes finite non-negative
/// `Value::Float`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    /// A decimal integer.
    #[default]
    Decimal,
    /// A decimal integer or floating literal.
    Float,
    Hex,
    Octal,
    Binary,
}

impl Notation {
    fn render(self, value: &Value) -> FormatResult<String> {
        match (self, value) {
            (_, Value::Int(n)) if *n < 0 => Err(FormatError::OutOfRange {
                value: n.to_string(),
            }),
            (Notation::Decimal | Notation::Float, Value::Int(n)) => Ok(n.to_string()),
            (Notation::Hex, Value::Int(n)) => Ok(format!("0x{n:x}")),
            (Notation::Octal, Value::Int(n)) => Ok(format!("0o{n:o}")),
            (Notation::Binary, Value::Int(n)) => Ok(format!("0b{n:b}")),
            (Notation::Float, Value::Float(n)) if n.is_finite() && !n.is_sign_negative() => {
                Ok(n.to_string())
            }
            (Notation::Float, Value::Float(n)) => Err(FormatError::OutOfRange {
                value: n.to_string(),
            }),
            (Notation::Float, other) => Err(FormatError::TypeMismatch {
                expected: "number",
                found: other.kind(),
            }),
            (_, other) => Err(FormatError::TypeMismatch {
                expected: "int",
                found: other.kind(),
            }),
        }
    }
}

/// Where a text capture directly followed by a bounded capture stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundary {
    /// The earliest occurrence of any of the options.
    AnyOf(Vec<String>),
    /// The first ASCII digit.
    Digit,
}

impl Boundary {
    /// Byte offset of the boundary in `haystack`.
    fn find(&self, haystack: &str) -> Option<usize> {
        match self {
            Boundary::AnyOf(options) => options
                .iter()
                .filter_map(|option| memmem::find(haystack.as_bytes(), option.as_bytes()))
                .min(),
            Boundary::Digit => haystack.bytes().position(|b| b.is_ascii_digit()),
        }
    }

    fn problem(&self) -> Problem {
        match self {
            Boundary::AnyOf(options) => Problem::ExpectingVariant {
                options: options.clone(),
            },
            Boundary::Digit => Problem::ExpectingFloat,
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::AnyOf(options) => f.write_str(&options.join("|")),
            Boundary::Digit => f.write_str("0-9"),
        }
    }
}

/// A bidirectional route.
///
/// The same tree parses a pathname into a [`Value`] and formats a [`Value`]
/// back into a pathname. Routes are immutable and can be shared between
/// threads.
#[derive(Debug, Clone)]
pub enum Route {
    /// Matches only at the very start of the input.
    Root,
    /// Matches only when the input is used up.
    End { trailing_slash: bool },
    /// A static literal.
    Replace { literal: String },
    /// Captures text up to, not including, the next `delimiter`.
    TakeUntil { delimiter: String },
    /// Captures non-empty text up to, not including, `boundary`.
    TakeBefore { boundary: Boundary },
    /// Captures the remaining input.
    Rest { allow_empty: bool },
    /// Tags the value of `inner` under `key`.
    Variable { key: String, inner: Box<Route> },
    Numeric {
        config: NumberConfig<Problem, Value>,
        notation: Notation,
    },
    /// Guards on the request method, compared case-insensitively.
    Method { expect: String },
    /// Parses both sides in sequence and merges their values.
    Join { left: Box<Route>, right: Box<Route> },
    /// Parses both sides in sequence and keeps the value of `right`.
    And { left: Box<Route>, right: Box<Route> },
    /// The first option that matches, in declared order.
    Enum { options: Vec<String> },
    /// Runs `inner` over the query parameter `key` and tags the value under
    /// `key`.
    Query { key: String, inner: Box<Route> },
}

impl Route {
    pub fn root() -> Self {
        Route::Root
    }

    pub fn end() -> Self {
        Route::End {
            trailing_slash: true,
        }
    }

    pub fn end_with(trailing_slash: bool) -> Self {
        Route::End { trailing_slash }
    }

    pub fn literal(literal: impl Into<String>) -> Self {
        Route::Replace {
            literal: literal.into(),
        }
    }

    pub fn take_until(delimiter: impl Into<String>) -> Self {
        Route::TakeUntil {
            delimiter: delimiter.into(),
        }
    }

    pub fn take_before(boundary: Boundary) -> Self {
        Route::TakeBefore { boundary }
    }

    /// Captures the remaining input, which must not be empty.
    pub fn rest() -> Self {
        Route::Rest { allow_empty: false }
    }

    pub fn rest_or_empty() -> Self {
        Route::Rest { allow_empty: true }
    }

    pub fn variable(key: impl Into<String>, inner: Route) -> Self {
        Route::Variable {
            key: key.into(),
            inner: Box::new(inner),
        }
    }

    pub fn numeric(config: NumberConfig<Problem, Value>, notation: Notation) -> Self {
        Route::Numeric { config, notation }
    }

    /// A decimal integer. Prefixed and floating literals are rejected.
    pub fn int() -> Self {
        let config = NumberConfig::int(Problem::ExpectingInt, Problem::Invalid).map(Value::Int);
        Route::numeric(config, Notation::Decimal)
    }

    /// A decimal or floating literal, integers widened.
    pub fn float() -> Self {
        let config =
            NumberConfig::float(Problem::ExpectingFloat, Problem::Invalid).map(Value::Float);
        Route::numeric(config, Notation::Float)
    }

    /// A `0x` literal.
    pub fn hex() -> Self {
        let config = NumberConfig::new(Problem::ExpectingHex, Problem::Invalid)
            .on_hex(|n| Ok(Value::Int(n)));
        Route::numeric(config, Notation::Hex)
    }

    /// A `0o` literal.
    pub fn octal() -> Self {
        let config = NumberConfig::new(Problem::ExpectingOctal, Problem::Invalid)
            .on_octal(|n| Ok(Value::Int(n)));
        Route::numeric(config, Notation::Octal)
    }

    /// A `0b` literal.
    pub fn binary() -> Self {
        let config = NumberConfig::new(Problem::ExpectingBinary, Problem::Invalid)
            .on_binary(|n| Ok(Value::Int(n)));
        Route::numeric(config, Notation::Binary)
    }

    pub fn method(expect: impl Into<String>) -> Self {
        Route::Method {
            expect: expect.into().to_ascii_uppercase(),
        }
    }

    pub fn join(left: Route, right: Route) -> Self {
        Route::Join {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Route, right: Route) -> Self {
        Route::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn enumerate<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Route::Enum {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn query(key: impl Into<String>, inner: Route) -> Self {
        Route::Query {
            key: key.into(),
            inner: Box::new(inner),
        }
    }

    /// Sequences `next` after this route, merging values.
    pub fn then(self, next: Route) -> Self {
        Route::join(self, next)
    }

    pub(crate) fn parse_state(&self, state: &RouteState) -> RouteParse<Value> {
        match self {
            Route::Root => {
                if state.offset() == 0 {
                    ParseResult::good(false, Value::Unit, state.clone())
                } else {
                    ParseResult::bad(false, fail(Problem::ExpectingStart, state))
                }
            }
            Route::End { trailing_slash } => {
                if at_end(state, *trailing_slash) {
                    let next = to_end(state);
                    ParseResult::good(next.offset() > state.offset(), Value::Unit, next)
                } else {
                    ParseResult::bad(false, fail(Problem::ExpectingEnd, state))
                }
            }
            Route::Replace { literal } => parse_token(literal, state, || {
                Problem::ExpectingLiteral {
                    literal: literal.clone(),
                }
            })
            .map(|()| Value::Unit),
            Route::TakeUntil { delimiter } => take_until(delimiter, state),
            Route::TakeBefore { boundary } => take_before(boundary, state),
            Route::Rest { allow_empty } => {
                let rest = state.remaining();
                if rest.is_empty() && !allow_empty {
                    return ParseResult::bad(false, fail(Problem::ExpectingValue, state));
                }
                let value = Value::text(rest);
                let next = to_end(state);
                ParseResult::good(next.offset() > state.offset(), value, next)
            }
            Route::Variable { key, inner } => {
                within(RouteContext::Capture(key.clone()), state, |s| {
                    inner.parse_state(s)
                })
                .map(|value| Value::Record(Record::single(key.clone(), value)))
            }
            Route::Numeric { config, .. } => parse_number(state, config),
            Route::Method { expect } => match state.method() {
                Some(method) if method.eq_ignore_ascii_case(expect) => {
                    ParseResult::good(false, Value::Unit, state.clone())
                }
                _ => ParseResult::bad(
                    false,
                    fail(
                        Problem::ExpectingMethod {
                            method: expect.clone(),
                        },
                        state,
                    ),
                ),
            },
            Route::Join { left, right } => sequence(
                state,
                |s| left.parse_state(s),
                |s| right.parse_state(s),
                Value::merge,
            ),
            Route::And { left, right } => sequence(
                state,
                |s| left.parse_state(s),
                |s| right.parse_state(s),
                |_, value| value,
            ),
            Route::Enum { options } => parse_variant(options, state),
            Route::Query { key, inner } => parse_query_param(key, inner, state),
        }
    }

    /// Formats `value` into `state`. Sequences format their right side
    /// first since the state is prepended to.
    pub(crate) fn format_into(&self, value: &Value, state: FormatState) -> FormatResult<FormatState> {
        match self {
            Route::Root | Route::End { .. } => Ok(state),
            Route::Replace { literal } => Ok(state.prepend(literal.as_str())),
            Route::TakeUntil { delimiter } => {
                let text = expect_text(value)?;
                if text.is_empty() {
                    return Err(FormatError::EmptyCapture);
                }
                if text.contains(delimiter.as_str()) {
                    return Err(FormatError::ContainsDelimiter {
                        value: text.to_owned(),
                        delimiter: delimiter.clone(),
                    });
                }
                Ok(state.prepend(text))
            }
            // The boundary must first occur exactly where the text ends.
            Route::TakeBefore { boundary } => {
                let text = expect_text(value)?;
                if text.is_empty() {
                    return Err(FormatError::EmptyCapture);
                }
                let joined = format!("{text}{}", state.pathname());
                if boundary.find(&joined) != Some(text.len()) {
                    return Err(FormatError::ContainsDelimiter {
                        value: text.to_owned(),
                        delimiter: boundary.to_string(),
                    });
                }
                Ok(state.prepend(text))
            }
            Route::Rest { allow_empty } => {
                let text = expect_text(value)?;
                if text.is_empty() && !allow_empty {
                    return Err(FormatError::EmptyCapture);
                }
                Ok(state.prepend(text))
            }
            Route::Variable { key, inner } => inner.format_into(field(value, key)?, state),
            Route::Numeric { notation, .. } => Ok(state.prepend(notation.render(value)?)),
            Route::Method { expect } => Ok(state.with_method(expect.as_str())),
            Route::Join { left, right } => {
                let state = right.format_into(value, state)?;
                left.format_into(value, state)
            }
            // The left value is dropped when parsing, so the left side is
            // formatted from unit.
            Route::And { left, right } => {
                let state = right.format_into(value, state)?;
                left.format_into(&Value::Unit, state)
            }
            Route::Enum { options } => {
                let text = expect_text(value)?;
                if options.iter().any(|option| option == text) {
                    Ok(state.prepend(text))
                } else {
                    Err(FormatError::UnknownVariant {
                        value: text.to_owned(),
                        options: options.clone(),
                    })
                }
            }
            Route::Query { key, inner } => {
                let rendered = inner
                    .format_into(field(value, key)?, FormatState::new())?
                    .pathname();
                Ok(state.prepend_param(key.as_str(), rendered))
            }
        }
    }
}

fn take_until(delimiter: &str, state: &RouteState) -> RouteParse<Value> {
    let start = state.offset();
    let found = chomp_until_literal(delimiter, state, || Problem::ExpectingLiteral {
        literal: delimiter.to_owned(),
    });
    match found {
        ParseResult::Good { state: next, .. } if next.offset() == start => {
            ParseResult::bad(false, fail(Problem::ExpectingValue, state))
        }
        ParseResult::Good {
            progress,
            state: next,
            ..
        } => {
            let value = Value::text(next.source().get(start..next.offset()).unwrap_or_default());
            ParseResult::good(progress, value, next)
        }
        ParseResult::Bad { progress, problems } => ParseResult::bad(progress, problems),
    }
}

fn take_before(boundary: &Boundary, state: &RouteState) -> RouteParse<Value> {
    let rest = state.remaining();
    let Some(relative) = boundary.find(rest) else {
        let end = position_at(state.source().len(), state.source(), state.position());
        return ParseResult::bad(
            false,
            fail_at(boundary.problem(), end.line, end.column, state.context()),
        );
    };
    if relative == 0 {
        return ParseResult::bad(false, fail(Problem::ExpectingValue, state));
    }
    let value = Value::text(rest.get(..relative).unwrap_or_default());
    let position = position_at(state.offset() + relative, state.source(), state.position());
    ParseResult::good(true, value, state.advance(position))
}

fn parse_variant(options: &[String], state: &RouteState) -> RouteParse<Value> {
    for option in options {
        if let Ok(position) = match_literal(option, state.source(), state.position()) {
            return ParseResult::good(
                position.offset > state.offset(),
                Value::text(option.as_str()),
                state.advance(position),
            );
        }
    }
    ParseResult::bad(
        false,
        fail(
            Problem::ExpectingVariant {
                options: options.to_vec(),
            },
            state,
        ),
    )
}

/// The parameter value is parsed as its own source and must be used up.
/// Nothing of the pathname is consumed.
fn parse_query_param(key: &str, inner: &Route, state: &RouteState) -> RouteParse<Value> {
    let Some(raw) = state.param(key) else {
        return ParseResult::bad(
            false,
            fail(
                Problem::ExpectingQueryParam {
                    key: key.to_owned(),
                },
                state,
            ),
        );
    };

    let nested = state
        .push_context(RouteContext::Query(key.to_owned()))
        .with_source(raw);

    match inner.parse_state(&nested) {
        ParseResult::Good { value, state: after, .. } if after.is_at_end() => {
            let record = Record::single(key, value);
            ParseResult::good(false, Value::Record(record), state.clone())
        }
        ParseResult::Good { state: after, .. } => {
            ParseResult::bad(false, fail(Problem::ExpectingEnd, &after))
        }
        ParseResult::Bad { problems, .. } => ParseResult::bad(false, problems),
    }
}

fn expect_text(value: &Value) -> FormatResult<&str> {
    value.as_str().ok_or(FormatError::TypeMismatch {
        expected: "text",
        found: value.kind(),
    })
}

fn field<'a>(value: &'a Value, key: &str) -> FormatResult<&'a Value> {
    let record = value.as_record().ok_or_else(|| FormatError::ExpectedRecord {
        key: key.to_owned(),
        found: value.kind(),
    })?;
    record.get(key).ok_or_else(|| FormatError::MissingKey {
        key: key.to_owned(),
    })
}
