use hashbrown::HashSet as FastHashSet;

use super::error::{RouteError, RouteResult};
use super::options::{RouteOptions, validate_method};
use super::syntax::{Boundary, Route};
use crate::position::{is_alpha, is_whitespace};

/// What a parameter captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Text up to the following literal, or to the end when last.
    Text,
    /// The rest of the input.
    Rest { allow_empty: bool },
    Int,
    Float,
    /// One of a fixed set of literals.
    Enum(Vec<String>),
}

impl Matcher {
    /// Bounded matchers know where they stop and need no delimiter after them.
    pub fn is_bounded(&self) -> bool {
        matches!(self, Matcher::Int | Matcher::Float | Matcher::Enum(_))
    }

    /// Where a text capture placed directly before this matcher stops.
    fn boundary(&self) -> Option<Boundary> {
        match self {
            Matcher::Int | Matcher::Float => Some(Boundary::Digit),
            Matcher::Enum(options) => Some(Boundary::AnyOf(options.clone())),
            Matcher::Text | Matcher::Rest { .. } => None,
        }
    }

    fn route(&self) -> Route {
        match self {
            Matcher::Text => Route::rest(),
            Matcher::Rest { allow_empty } => Route::Rest {
                allow_empty: *allow_empty,
            },
            Matcher::Int => Route::int(),
            Matcher::Float => Route::float(),
            Matcher::Enum(options) => Route::enumerate(options.iter().cloned()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Location {
    #[default]
    Path,
    Query,
}

/// A named capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub key: String,
    pub matcher: Matcher,
    pub location: Location,
}

impl Param {
    pub fn new(key: impl Into<String>, matcher: Matcher) -> Self {
        Self {
            key: key.into(),
            matcher,
            location: Location::Path,
        }
    }

    pub fn text(key: impl Into<String>) -> Self {
        Self::new(key, Matcher::Text)
    }

    pub fn rest(key: impl Into<String>) -> Self {
        Self::new(key, Matcher::Rest { allow_empty: false })
    }

    pub fn rest_or_empty(key: impl Into<String>) -> Self {
        Self::new(key, Matcher::Rest { allow_empty: true })
    }

    pub fn int(key: impl Into<String>) -> Self {
        Self::new(key, Matcher::Int)
    }

    pub fn float(key: impl Into<String>) -> Self {
        Self::new(key, Matcher::Float)
    }

    pub fn enumerate<I, S>(key: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(key, Matcher::Enum(options.into_iter().map(Into::into).collect()))
    }

    /// Reads the parameter from the query string instead of the pathname.
    pub fn in_query(mut self) -> Self {
        self.location = Location::Query;
        self
    }
}

/// One piece of a route definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(Param),
}

impl From<&str> for Segment {
    fn from(literal: &str) -> Self {
        Segment::Literal(literal.to_owned())
    }
}

impl From<String> for Segment {
    fn from(literal: String) -> Self {
        Segment::Literal(literal)
    }
}

impl From<Param> for Segment {
    fn from(param: Param) -> Self {
        Segment::Param(param)
    }
}

/// Compiles `segments` with the default [`RouteOptions`].
pub fn compile<I>(segments: I) -> RouteResult<Route>
where
    I: IntoIterator,
    I::Item: Into<Segment>,
{
    compile_with(segments, &RouteOptions::default())
}

/// Compiles a segment list into a route.
///
/// Literals next to each other are merged. A leading `"POST "` style prefix
/// on the first literal becomes a method guard. A text capture followed by a
/// literal captures up to that literal, one followed by a bounded capture
/// stops where that capture can start, and one at the end captures the
/// non-empty rest.
#[tracing::instrument(level = "trace", skip_all)]
pub fn compile_with<I>(segments: I, options: &RouteOptions) -> RouteResult<Route>
where
    I: IntoIterator,
    I::Item: Into<Segment>,
{
    let segments: Vec<Segment> = segments.into_iter().map(Into::into).collect();
    compile_segments(segments, options).inspect_err(|err| {
        tracing::debug!(error = %err, "route definition rejected");
    })
}

fn compile_segments(segments: Vec<Segment>, options: &RouteOptions) -> RouteResult<Route> {
    options.validate()?;

    let (mut path, query) = partition(segments);
    let method = take_method(&mut path, options)?;
    let path_params = path.iter().filter_map(|segment| match segment {
        Segment::Param(param) => Some(param),
        Segment::Literal(_) => None,
    });
    check_keys(path_params.chain(query.iter()))?;
    check_adjacency(&path)?;

    let mut parts = Vec::with_capacity(path.len() + query.len() + 1);
    if options.anchor_root {
        parts.push(Route::Root);
    }
    for (index, item) in path.iter().enumerate() {
        match item {
            Segment::Literal(literal) => parts.push(Route::literal(literal.as_str())),
            Segment::Param(param) => {
                let inner = match (&param.matcher, path.get(index + 1)) {
                    (Matcher::Text, Some(Segment::Literal(next))) => Route::take_until(next.as_str()),
                    (Matcher::Text, Some(Segment::Param(next))) => match next.matcher.boundary() {
                        Some(boundary) => Route::take_before(boundary),
                        None => Route::rest(),
                    },
                    (matcher, _) => matcher.route(),
                };
                parts.push(Route::variable(param.key.as_str(), inner));
            }
        }
    }
    for param in &query {
        parts.push(Route::query(param.key.as_str(), param.matcher.route()));
    }

    let mut route = Route::end_with(options.trailing_slash);
    for part in parts.into_iter().rev() {
        route = Route::join(part, route);
    }
    if let Some(method) = method {
        route = Route::join(Route::method(method), route);
    }
    Ok(route)
}

/// Separates query parameters and merges neighbouring path literals.
fn partition(segments: Vec<Segment>) -> (Vec<Segment>, Vec<Param>) {
    let mut path: Vec<Segment> = Vec::with_capacity(segments.len());
    let mut query = Vec::new();
    for segment in segments {
        match segment {
            Segment::Literal(literal) if literal.is_empty() => {}
            Segment::Literal(literal) => match path.last_mut() {
                Some(Segment::Literal(previous)) => previous.push_str(&literal),
                _ => path.push(Segment::Literal(literal)),
            },
            Segment::Param(param) if param.location == Location::Query => query.push(param),
            Segment::Param(param) => path.push(Segment::Param(param)),
        }
    }
    (path, query)
}

/// Splits a method name off the first literal, e.g. `"POST /ipfs/"`.
fn split_method(literal: &str) -> Option<(&str, &str)> {
    let (method, rest) = literal.split_once(is_whitespace)?;
    if method.is_empty() || !method.chars().all(is_alpha) {
        return None;
    }
    Some((method, rest.trim_start_matches(is_whitespace)))
}

fn take_method(path: &mut Vec<Segment>, options: &RouteOptions) -> RouteResult<Option<String>> {
    let declared = match path.first_mut() {
        Some(Segment::Literal(literal)) => match split_method(literal) {
            Some((method, rest)) => {
                let method = method.to_ascii_uppercase();
                let rest = rest.to_owned();
                *literal = rest;
                Some(method)
            }
            None => None,
        },
        _ => None,
    };
    if matches!(path.first(), Some(Segment::Literal(literal)) if literal.is_empty()) {
        path.remove(0);
    }

    match (declared, &options.method) {
        (Some(declared), Some(configured)) if !declared.eq_ignore_ascii_case(configured) => {
            Err(RouteError::MethodConflict {
                declared,
                configured: configured.clone(),
            })
        }
        (Some(declared), _) => Ok(Some(declared)),
        (None, Some(configured)) => {
            validate_method(configured)?;
            Ok(Some(configured.to_ascii_uppercase()))
        }
        (None, None) => Ok(None),
    }
}

fn check_keys<'a>(params: impl Iterator<Item = &'a Param>) -> RouteResult<()> {
    let mut seen = FastHashSet::new();
    for param in params {
        if param.key.is_empty() {
            return Err(RouteError::EmptyKey);
        }
        if !seen.insert(param.key.as_str()) {
            return Err(RouteError::DuplicateKey {
                key: param.key.clone(),
            });
        }
        if matches!(&param.matcher, Matcher::Enum(options) if options.is_empty()) {
            return Err(RouteError::EmptyVariants {
                key: param.key.clone(),
            });
        }
    }
    Ok(())
}

fn check_adjacency(path: &[Segment]) -> RouteResult<()> {
    let last = path.len().saturating_sub(1);
    for (index, segment) in path.iter().enumerate() {
        let Segment::Param(param) = segment else {
            continue;
        };
        if matches!(param.matcher, Matcher::Rest { .. }) && index != last {
            return Err(RouteError::RestNotLast {
                key: param.key.clone(),
            });
        }
        if let Some(Segment::Param(next)) = path.get(index + 1)
            && !param.matcher.is_bounded()
            && !next.matcher.is_bounded()
        {
            return Err(RouteError::AdjacentCaptures {
                first: param.key.clone(),
                second: next.key.clone(),
            });
        }
    }
    Ok(())
}

/// Incremental construction of a segment list.
#[derive(Debug, Default, Clone)]
pub struct RouteBuilder {
    segments: Vec<Segment>,
    options: RouteOptions,
}

impl RouteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn literal(mut self, literal: impl Into<String>) -> Self {
        self.segments.push(Segment::Literal(literal.into()));
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.segments.push(Segment::Param(param));
        self
    }

    pub fn segment(mut self, segment: impl Into<Segment>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn options(mut self, options: RouteOptions) -> Self {
        self.options = options;
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.options.method = Some(method.into());
        self
    }

    pub fn build(self) -> RouteResult<Route> {
        compile_with(self.segments, &self.options)
    }
}

impl Route {
    pub fn builder() -> RouteBuilder {
        RouteBuilder::new()
    }
}
