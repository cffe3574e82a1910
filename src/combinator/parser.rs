use std::fmt;
use std::sync::Arc;

use crate::parse::{ParseResult, ParseState, Problems};

/// Bound shared by context labels, problems and values captured inside a
/// [`Parser`].
pub trait Shared: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Shared for T {}

type ParseFn<C, X, T> = dyn Fn(&ParseState<C>) -> ParseResult<C, X, T> + Send + Sync;

/// An immutable, shareable parsing function.
///
/// Cloning is cheap and a parser can be used from several threads at once;
/// every call receives its own [`ParseState`].
pub struct Parser<C, X, T>(Arc<ParseFn<C, X, T>>);

impl<C, X, T> Parser<C, X, T> {
    pub fn new<F>(parse: F) -> Self
    where
        F: Fn(&ParseState<C>) -> ParseResult<C, X, T> + Send + Sync + 'static,
    {
        Self(Arc::new(parse))
    }

    #[inline]
    pub fn parse(&self, state: &ParseState<C>) -> ParseResult<C, X, T> {
        (self.0)(state)
    }
}

impl<C, X, T> Clone for Parser<C, X, T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<C, X, T> fmt::Debug for Parser<C, X, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}

/// Runs `parser` over `source` from its first character.
///
/// Trailing input is not an error here; sequence with [`end`](super::end)
/// to require it.
#[tracing::instrument(level = "trace", skip(parser), fields(len = source.len() as u64))]
pub fn run<C, X, T>(parser: &Parser<C, X, T>, source: &str) -> Result<T, Problems<C, X>> {
    let state = ParseState::new(source);
    parser.parse(&state).into_result().map(|(value, _)| value)
}
