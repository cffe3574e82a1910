use super::{Parser, Shared};
use crate::parse::{ParseResult, ParseState, Problems, fail};

/// Always succeeds with `value` without consuming anything.
pub fn succeed<C, X, T>(value: T) -> Parser<C, X, T>
where
    C: 'static,
    X: 'static,
    T: Shared,
{
    Parser::new(move |state| ParseResult::good(false, value.clone(), state.clone()))
}

/// Always fails with `problem` at the current position.
pub fn problem<C, X, T>(problem: X) -> Parser<C, X, T>
where
    C: 'static,
    X: Shared,
    T: 'static,
{
    Parser::new(move |state| ParseResult::bad(false, fail(problem.clone(), state)))
}

pub fn map<C, X, T, U, F>(parser: Parser<C, X, T>, f: F) -> Parser<C, X, U>
where
    C: 'static,
    X: 'static,
    T: 'static,
    U: 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    Parser::new(move |state| parser.parse(state).map(|value| f(value)))
}

/// Runs `left` then `right` on the state `left` left behind.
///
/// `left` failing short-circuits. The combined progress is the OR of both
/// sides, so a failure in `right` after `left` consumed input still reports
/// progress.
pub(crate) fn sequence<C, X, A, B, T>(
    state: &ParseState<C>,
    left: impl FnOnce(&ParseState<C>) -> ParseResult<C, X, A>,
    right: impl FnOnce(&ParseState<C>) -> ParseResult<C, X, B>,
    join: impl FnOnce(A, B) -> T,
) -> ParseResult<C, X, T> {
    match left(state) {
        ParseResult::Bad { progress, problems } => ParseResult::bad(progress, problems),
        ParseResult::Good {
            progress: left_progress,
            value: a,
            state,
        } => match right(&state) {
            ParseResult::Bad { progress, problems } => {
                ParseResult::bad(left_progress || progress, problems)
            }
            ParseResult::Good {
                progress,
                value: b,
                state,
            } => ParseResult::good(left_progress || progress, join(a, b), state),
        },
    }
}

pub fn join<C, X, A, B, T, F>(f: F, left: Parser<C, X, A>, right: Parser<C, X, B>) -> Parser<C, X, T>
where
    C: 'static,
    X: 'static,
    A: 'static,
    B: 'static,
    T: 'static,
    F: Fn(A, B) -> T + Send + Sync + 'static,
{
    Parser::new(move |state| {
        sequence(
            state,
            |s| left.parse(s),
            |s| right.parse(s),
            |a, b| f(a, b),
        )
    })
}

/// Sequences two parsers and keeps the value of the second.
pub fn keep<C, X, A, B>(left: Parser<C, X, A>, right: Parser<C, X, B>) -> Parser<C, X, B>
where
    C: 'static,
    X: 'static,
    A: 'static,
    B: 'static,
{
    join(|_, b| b, left, right)
}

/// Sequences two parsers and keeps the value of the first.
pub fn skip<C, X, A, B>(parser: Parser<C, X, A>, ignore: Parser<C, X, B>) -> Parser<C, X, A>
where
    C: 'static,
    X: 'static,
    A: 'static,
    B: 'static,
{
    join(|a, _| a, parser, ignore)
}

/// Feeds the value of `parser` to `f` and runs the parser it returns.
pub fn and_then<C, X, T, U, F>(parser: Parser<C, X, T>, f: F) -> Parser<C, X, U>
where
    C: 'static,
    X: 'static,
    T: 'static,
    U: 'static,
    F: Fn(T) -> Parser<C, X, U> + Send + Sync + 'static,
{
    Parser::new(move |state| match parser.parse(state) {
        ParseResult::Bad { progress, problems } => ParseResult::bad(progress, problems),
        ParseResult::Good {
            progress,
            value,
            state,
        } => match f(value).parse(&state) {
            ParseResult::Good {
                progress: next,
                value,
                state,
            } => ParseResult::good(progress || next, value, state),
            ParseResult::Bad {
                progress: next,
                problems,
            } => ParseResult::bad(progress || next, problems),
        },
    })
}

pub fn or<C, X, T>(left: Parser<C, X, T>, right: Parser<C, X, T>) -> Parser<C, X, T>
where
    C: 'static,
    X: 'static,
    T: 'static,
{
    one_of(vec![left, right])
}

/// Tries each parser from the same starting state and returns the first
/// success.
///
/// Every alternative is retried from the start no matter how far the previous
/// one got. When all of them fail the result carries every alternative's
/// problems, in order, with no progress.
pub fn one_of<C, X, T>(parsers: Vec<Parser<C, X, T>>) -> Parser<C, X, T>
where
    C: 'static,
    X: 'static,
    T: 'static,
{
    Parser::new(move |state| {
        let mut problems = Problems::new();
        for parser in &parsers {
            match parser.parse(state) {
                good @ ParseResult::Good { .. } => return good,
                ParseResult::Bad { problems: more, .. } => problems = problems.append(more),
            }
        }
        ParseResult::bad(false, problems)
    })
}
