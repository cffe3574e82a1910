use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A context label stamped with the line and column where it was entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Located<C> {
    pub line: usize,
    pub column: usize,
    pub context: C,
}

impl<C> Located<C> {
    pub fn new(line: usize, column: usize, context: C) -> Self {
        Self {
            line,
            column,
            context,
        }
    }
}

struct Frame<C> {
    located: Located<C>,
    parent: Option<Arc<Frame<C>>>,
}

/// Persistent stack of [`Located`] frames.
///
/// Pushing and popping are O(1) and share structure with the stack they were
/// derived from, so a snapshot can be kept in a failure report after the
/// parse that produced it has unwound. Iteration goes from the innermost
/// frame outwards.
pub struct ContextStack<C> {
    head: Option<Arc<Frame<C>>>,
    depth: usize,
}

impl<C> ContextStack<C> {
    pub fn new() -> Self {
        Self {
            head: None,
            depth: 0,
        }
    }

    pub fn push(&self, located: Located<C>) -> Self {
        Self {
            head: Some(Arc::new(Frame {
                located,
                parent: self.head.clone(),
            })),
            depth: self.depth + 1,
        }
    }

    pub fn pop(&self) -> Self {
        match &self.head {
            Some(frame) => Self {
                head: frame.parent.clone(),
                depth: self.depth - 1,
            },
            None => Self::new(),
        }
    }

    pub fn top(&self) -> Option<&Located<C>> {
        self.head.as_deref().map(|frame| &frame.located)
    }

    pub fn len(&self) -> usize {
        self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }

    pub fn iter(&self) -> Iter<'_, C> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    pub fn to_vec(&self) -> Vec<Located<C>>
    where
        C: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<C> Default for ContextStack<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for ContextStack<C> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            depth: self.depth,
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for ContextStack<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<C: PartialEq> PartialEq for ContextStack<C> {
    fn eq(&self, other: &Self) -> bool {
        self.depth == other.depth && self.iter().eq(other.iter())
    }
}

impl<C: Eq> Eq for ContextStack<C> {}

impl<C: Serialize> Serialize for ContextStack<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<C> FromIterator<Located<C>> for ContextStack<C> {
    /// Builds a stack from frames listed outermost first.
    fn from_iter<I: IntoIterator<Item = Located<C>>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ContextStack::new(), |stack, located| stack.push(located))
    }
}

pub struct Iter<'a, C> {
    next: Option<&'a Frame<C>>,
}

impl<'a, C> Iterator for Iter<'a, C> {
    type Item = &'a Located<C>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.next?;
        self.next = frame.parent.as_deref();
        Some(&frame.located)
    }
}

impl<'a, C> IntoIterator for &'a ContextStack<C> {
    type Item = &'a Located<C>;
    type IntoIter = Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_restores_the_parent_without_touching_the_original() {
        let root: ContextStack<&str> = ContextStack::new();
        let outer = root.push(Located::new(1, 1, "outer"));
        let inner = outer.push(Located::new(1, 5, "inner"));

        assert_eq!(inner.len(), 2);
        assert_eq!(inner.top().map(|l| l.context), Some("inner"));

        let popped = inner.pop();
        assert_eq!(popped, outer);
        assert_eq!(inner.len(), 2);
    }

    #[test]
    fn iterates_innermost_first() {
        let stack: ContextStack<&str> = [Located::new(1, 1, "a"), Located::new(1, 2, "b")]
            .into_iter()
            .collect();
        let labels: Vec<_> = stack.iter().map(|l| l.context).collect();
        assert_eq!(labels, vec!["b", "a"]);
    }

    #[test]
    fn popping_an_empty_stack_stays_empty() {
        let stack: ContextStack<u8> = ContextStack::new();
        assert!(stack.pop().is_empty());
    }
}
