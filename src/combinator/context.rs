use super::{Parser, Shared};
use crate::parse::{ParseResult, ParseState};

/// Runs `run` inside a new context frame.
///
/// On success the frame is dropped from the resulting state; on failure it
/// stays attached to the reported problems.
pub(crate) fn within<C, X, T>(
    label: C,
    state: &ParseState<C>,
    run: impl FnOnce(&ParseState<C>) -> ParseResult<C, X, T>,
) -> ParseResult<C, X, T> {
    let entered = state.push_context(label);
    match run(&entered) {
        ParseResult::Good {
            progress,
            value,
            state: next,
        } => ParseResult::good(progress, value, next.with_context(state.context().clone())),
        bad @ ParseResult::Bad { .. } => bad,
    }
}

pub fn in_context<C, X, T>(label: C, parser: Parser<C, X, T>) -> Parser<C, X, T>
where
    C: Shared,
    X: 'static,
    T: 'static,
{
    Parser::new(move |state| within(label.clone(), state, |s| parser.parse(s)))
}
