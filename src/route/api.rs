use crate::combinator::Parser;
use crate::parse::ParseResult;

use super::error::ParseError;
use super::format::{FormatResult, FormatState, FormattedUrl};
use super::problem::{Problem, RouteContext, RouteState};
use super::request::Request;
use super::syntax::Route;
use super::url;
use super::value::Value;

/// The parse state for a request: its pathname, decoded query and
/// method and headers when present.
pub(crate) fn request_state(source: &str, request: &Request, search: &str) -> RouteState {
    let mut state = RouteState::new(source).with_params(url::parse_query(search));
    if let Some(method) = &request.method {
        state = state.with_method(method.as_str());
    }
    if !request.headers.is_empty() {
        state = state.with_headers(request.headers.clone());
    }
    state
}

impl Route {
    /// Matches the pathname of `request`, with its query, method and headers
    /// available to the route.
    #[tracing::instrument(level = "trace", skip(self, request), fields(url = %request.url))]
    pub fn parse(&self, request: &Request) -> Result<Value, ParseError> {
        let parts = request.parts();
        self.run(&request_state(parts.pathname, request, parts.search))
    }

    pub fn parse_path(&self, pathname: &str) -> Result<Value, ParseError> {
        self.run(&RouteState::new(pathname))
    }

    /// Matches a URL fragment, with or without its leading `#`.
    pub fn parse_hash(&self, hash: &str) -> Result<Value, ParseError> {
        self.run(&RouteState::new(url::fragment(hash)))
    }

    /// Like [`Route::parse`] without the diagnostics.
    pub fn matches(&self, request: &Request) -> Option<Value> {
        self.parse(request).ok()
    }

    pub(crate) fn run(&self, state: &RouteState) -> Result<Value, ParseError> {
        match self.parse_state(state) {
            ParseResult::Good { value, .. } => Ok(value),
            ParseResult::Bad { problems, .. } => {
                tracing::debug!(
                    source = state.source(),
                    problems = problems.len() as u64,
                    "route did not match"
                );
                Err(ParseError::new(problems))
            }
        }
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn format(&self, value: &Value) -> FormatResult<FormattedUrl> {
        let state = self.format_into(value, FormatState::new())?;
        Ok(state.finish())
    }

    /// `pathname + hash + search` of the formatted URL.
    pub fn format_path(&self, value: &Value) -> FormatResult<String> {
        Ok(self.format(value)?.to_string())
    }

    pub fn format_hash(&self, value: &Value) -> FormatResult<String> {
        Ok(format!("#{}", self.format(value)?))
    }

    /// The route as a combinator, for use with the functions of
    /// [`combinator`](crate::combinator).
    pub fn parser(&self) -> Parser<RouteContext, Problem, Value> {
        let route = self.clone();
        Parser::new(move |state| route.parse_state(state))
    }
}
