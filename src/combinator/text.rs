use super::{Parser, Shared};
use crate::parse::{ParseResult, ParseState, fail, fail_at};
use crate::position::{CharMatch, Position, find_literal, match_char, match_literal, position_at};

/// A literal together with the problem reported when it is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<X> {
    pub literal: String,
    pub expecting: X,
}

impl<X> Token<X> {
    pub fn new(literal: impl Into<String>, expecting: X) -> Self {
        Self {
            literal: literal.into(),
            expecting,
        }
    }
}

pub(crate) fn parse_token<C, X>(
    literal: &str,
    state: &ParseState<C>,
    expecting: impl FnOnce() -> X,
) -> ParseResult<C, X, ()> {
    match match_literal(literal, state.source(), state.position()) {
        Ok(position) => ParseResult::good(
            position.offset > state.offset(),
            (),
            state.advance(position),
        ),
        Err(_) => ParseResult::bad(false, fail(expecting(), state)),
    }
}

/// Whether nothing but an optional single `/` is left to consume.
pub(crate) fn at_end<C>(state: &ParseState<C>, allow_trailing_slash: bool) -> bool {
    match state.remaining() {
        "" => true,
        "/" => allow_trailing_slash,
        _ => false,
    }
}

pub(crate) fn to_end<C>(state: &ParseState<C>) -> ParseState<C> {
    state.advance(position_at(state.source().len(), state.source(), state.position()))
}

/// Moves to the start of the next `literal`, failing where the search gave up.
pub(crate) fn chomp_until_literal<C, X>(
    literal: &str,
    state: &ParseState<C>,
    expecting: impl FnOnce() -> X,
) -> ParseResult<C, X, ()> {
    match find_literal(literal, state.source(), state.position()) {
        Ok(position) => ParseResult::good(
            position.offset > state.offset(),
            (),
            state.advance(position),
        ),
        Err(Position { line, column, .. }) => {
            ParseResult::bad(false, fail_at(expecting(), line, column, state.context()))
        }
    }
}

pub fn token<C, X>(token: Token<X>) -> Parser<C, X, ()>
where
    C: 'static,
    X: Shared,
{
    let Token { literal, expecting } = token;
    Parser::new(move |state| parse_token(&literal, state, || expecting.clone()))
}

/// Succeeds with `value` once the input is used up.
///
/// A single trailing `/` still counts as the end and is consumed.
pub fn end<C, X, T>(value: T, problem: X) -> Parser<C, X, T>
where
    C: 'static,
    X: Shared,
    T: Shared,
{
    Parser::new(move |state| {
        if at_end(state, true) {
            let next = to_end(state);
            ParseResult::good(next.offset() > state.offset(), value.clone(), next)
        } else {
            ParseResult::bad(false, fail(problem.clone(), state))
        }
    })
}

/// Consumes characters while `predicate` holds. Never fails.
pub fn chomp_while<C, X, P>(predicate: P) -> Parser<C, X, ()>
where
    C: 'static,
    X: 'static,
    P: Fn(char) -> bool + Send + Sync + 'static,
{
    Parser::new(move |state| {
        let source = state.source();
        let Position {
            mut offset,
            mut line,
            mut column,
        } = state.position();

        loop {
            match match_char(&predicate, offset, source) {
                CharMatch::Miss => break,
                CharMatch::Newline(next) => {
                    offset = next;
                    line += 1;
                    column = 1;
                }
                CharMatch::Advance(next) => {
                    offset = next;
                    column += 1;
                }
            }
        }

        ParseResult::good(
            offset > state.offset(),
            (),
            state.advance(Position::new(offset, line, column)),
        )
    })
}

/// Consumes up to the start of the next occurrence of the token's literal.
///
/// Fails with the token's problem, positioned at the end of the input, when
/// the literal never occurs.
pub fn chomp_until<C, X>(token: Token<X>) -> Parser<C, X, ()>
where
    C: 'static,
    X: Shared,
{
    let Token { literal, expecting } = token;
    Parser::new(move |state| chomp_until_literal(&literal, state, || expecting.clone()))
}

/// Like [`chomp_until`], but consumes the rest of the input instead of failing.
pub fn chomp_until_end_or<C, X>(literal: impl Into<String>) -> Parser<C, X, ()>
where
    C: 'static,
    X: 'static,
{
    let literal = literal.into();
    Parser::new(move |state| {
        let position = match find_literal(&literal, state.source(), state.position()) {
            Ok(position) | Err(position) => position,
        };
        ParseResult::good(position.offset > state.offset(), (), state.advance(position))
    })
}

/// Returns the slice of the source consumed by `parser`.
pub fn get_chomped_string<C, X, T>(parser: Parser<C, X, T>) -> Parser<C, X, String>
where
    C: 'static,
    X: 'static,
    T: 'static,
{
    map_chomped_string(|chomped, _| chomped.to_owned(), parser)
}

/// Hands the consumed slice and the value of `parser` to `f`.
///
/// The slice is cut from the source once, after `parser` finished.
pub fn map_chomped_string<C, X, T, U, F>(f: F, parser: Parser<C, X, T>) -> Parser<C, X, U>
where
    C: 'static,
    X: 'static,
    T: 'static,
    U: 'static,
    F: Fn(&str, T) -> U + Send + Sync + 'static,
{
    Parser::new(move |state| {
        let start = state.offset();
        match parser.parse(state) {
            ParseResult::Good {
                progress,
                value,
                state: next,
            } => {
                let chomped = next.source().get(start..next.offset()).unwrap_or_default();
                let mapped = f(chomped, value);
                ParseResult::good(progress, mapped, next)
            }
            ParseResult::Bad { progress, problems } => ParseResult::bad(progress, problems),
        }
    })
}
