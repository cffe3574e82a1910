use serde::Serialize;
use smallvec::SmallVec;

use super::{ContextStack, ParseState};

/// A single structured parse failure.
///
/// Lines and columns are counted like a text editor. `context` is a snapshot
/// of the context stack at the moment of failure, innermost frame first, so a
/// report can say what was being parsed and where that construct started.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeadEnd<C, X> {
    pub line: usize,
    pub column: usize,
    pub problem: X,
    pub context: ContextStack<C>,
}

/// Ordered, append-only list of [`DeadEnd`]s.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Problems<C, X>(SmallVec<[DeadEnd<C, X>; 1]>);

impl<C, X> Problems<C, X> {
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    pub fn single(dead_end: DeadEnd<C, X>) -> Self {
        let mut items = SmallVec::new();
        items.push(dead_end);
        Self(items)
    }

    /// Concatenates two lists, keeping `self` first.
    pub fn append(mut self, other: Problems<C, X>) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&DeadEnd<C, X>> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeadEnd<C, X>> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<DeadEnd<C, X>> {
        self.0.into_vec()
    }
}

impl<C, X> Default for Problems<C, X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, X> IntoIterator for Problems<C, X> {
    type Item = DeadEnd<C, X>;
    type IntoIter = smallvec::IntoIter<[DeadEnd<C, X>; 1]>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, C, X> IntoIterator for &'a Problems<C, X> {
    type Item = &'a DeadEnd<C, X>;
    type IntoIter = std::slice::Iter<'a, DeadEnd<C, X>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Outcome of running a parser.
///
/// `progress` records whether the cursor moved, on success and on failure
/// alike.
#[derive(Debug, Clone)]
pub enum ParseResult<C, X, T> {
    Good {
        progress: bool,
        value: T,
        state: ParseState<C>,
    },
    Bad {
        progress: bool,
        problems: Problems<C, X>,
    },
}

impl<C, X, T> ParseResult<C, X, T> {
    pub fn good(progress: bool, value: T, state: ParseState<C>) -> Self {
        Self::Good {
            progress,
            value,
            state,
        }
    }

    pub fn bad(progress: bool, problems: Problems<C, X>) -> Self {
        Self::Bad { progress, problems }
    }

    pub fn progress(&self) -> bool {
        match self {
            Self::Good { progress, .. } | Self::Bad { progress, .. } => *progress,
        }
    }

    pub fn is_good(&self) -> bool {
        matches!(self, Self::Good { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseResult<C, X, U> {
        match self {
            Self::Good {
                progress,
                value,
                state,
            } => ParseResult::Good {
                progress,
                value: f(value),
                state,
            },
            Self::Bad { progress, problems } => ParseResult::Bad { progress, problems },
        }
    }

    pub fn into_result(self) -> Result<(T, ParseState<C>), Problems<C, X>> {
        match self {
            Self::Good { value, state, .. } => Ok((value, state)),
            Self::Bad { problems, .. } => Err(problems),
        }
    }
}

/// One-element [`Problems`] at the current position of `state`.
pub fn fail<C, X>(problem: X, state: &ParseState<C>) -> Problems<C, X> {
    fail_at(problem, state.line(), state.column(), state.context())
}

/// One-element [`Problems`] at an explicit line and column.
pub fn fail_at<C, X>(
    problem: X,
    line: usize,
    column: usize,
    context: &ContextStack<C>,
) -> Problems<C, X> {
    Problems::single(DeadEnd {
        line,
        column,
        problem,
        context: context.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn append_keeps_order() {
        let state: ParseState<()> = ParseState::new("abc");
        let first = fail("first", &state);
        let second = fail("second", &state.advance(Position::new(1, 1, 2)));
        let merged = first.append(second);
        let problems: Vec<_> = merged.iter().map(|d| (d.problem, d.column)).collect();
        assert_eq!(problems, vec![("first", 1), ("second", 2)]);
    }

    #[test]
    fn failure_snapshots_the_context() {
        let state: ParseState<&str> = ParseState::new("x").push_context("segment");
        let problems = fail("oops", &state);
        let dead_end = problems.first().unwrap();
        assert_eq!(dead_end.context.top().map(|l| l.context), Some("segment"));
    }
}
