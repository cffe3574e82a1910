use hashbrown::HashMap as FastHashMap;
use std::fmt;
use std::sync::Arc;

use super::{ContextStack, Located};
use crate::position::Position;

/// Decoded query-string parameters.
pub type Query = FastHashMap<String, String>;

/// Request headers, keyed by lower-cased header name.
pub type Headers = FastHashMap<String, String>;

/// Cursor over the input of a single parse.
///
/// A state is never changed in place: every transition returns a new value
/// sharing the source, the request attributes and the context stack with the
/// state it came from.
pub struct ParseState<C> {
    source: Arc<str>,
    position: Position,
    method: Option<Arc<str>>,
    headers: Option<Arc<Headers>>,
    params: Option<Arc<Query>>,
    context: ContextStack<C>,
}

impl<C> ParseState<C> {
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
            position: Position::START,
            method: None,
            headers: None,
            params: None,
            context: ContextStack::new(),
        }
    }

    pub fn with_method(mut self, method: impl Into<Arc<str>>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(Arc::new(headers));
        self
    }

    pub fn with_params(mut self, params: Query) -> Self {
        self.params = Some(Arc::new(params));
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn offset(&self) -> usize {
        self.position.offset
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    /// The unconsumed tail of the source.
    pub fn remaining(&self) -> &str {
        self.source.get(self.position.offset..).unwrap_or_default()
    }

    pub fn is_at_end(&self) -> bool {
        self.position.offset >= self.source.len()
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()
            .and_then(|headers| headers.get(name.to_ascii_lowercase().as_str()))
            .map(String::as_str)
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
    }

    pub fn context(&self) -> &ContextStack<C> {
        &self.context
    }

    /// Same state with the cursor moved to `position`.
    pub fn advance(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    /// Same state with a new context frame entered at the current position.
    pub fn push_context(&self, context: C) -> Self {
        let located = Located::new(self.position.line, self.position.column, context);
        Self {
            context: self.context.push(located),
            ..self.clone()
        }
    }

    /// Same state with the context stack replaced.
    pub fn with_context(&self, context: ContextStack<C>) -> Self {
        Self {
            context,
            ..self.clone()
        }
    }

    /// A state over a different source, starting at its first character but
    /// keeping the request attributes and the context stack.
    pub fn with_source(&self, source: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
            position: Position::START,
            ..self.clone()
        }
    }
}

impl<C> Clone for ParseState<C> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            position: self.position,
            method: self.method.clone(),
            headers: self.headers.clone(),
            params: self.params.clone(),
            context: self.context.clone(),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for ParseState<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseState")
            .field("source", &self.source)
            .field("position", &self.position)
            .field("method", &self.method)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
