use crate::route::{ParseError, Request, Route, RouteProblems, Value, request_state};

/// Ordered alternation over routes bound to handlers.
///
/// The first route that matches wins. When none does, the error carries the
/// problems of every route in declaration order.
#[derive(Debug, Clone)]
pub struct Router<H> {
    routes: Vec<(Route, H)>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, route: Route, handler: H) -> Self {
        self.push(route, handler);
        self
    }

    pub fn push(&mut self, route: Route, handler: H) {
        self.routes.push((route, handler));
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn routes(&self) -> impl Iterator<Item = &(Route, H)> {
        self.routes.iter()
    }

    #[tracing::instrument(
        level = "trace",
        skip(self, request),
        fields(url = %request.url, routes = self.routes.len() as u64)
    )]
    pub fn resolve(&self, request: &Request) -> Result<(&H, Value), ParseError> {
        let parts = request.parts();
        let state = request_state(parts.pathname, request, parts.search);

        let mut problems = RouteProblems::new();
        for (route, handler) in &self.routes {
            match route.run(&state) {
                Ok(value) => return Ok((handler, value)),
                Err(err) => problems = problems.append(err.problems),
            }
        }
        tracing::debug!(problems = problems.len() as u64, "no route matched");
        Err(ParseError::new(problems))
    }

    pub fn resolve_path(&self, pathname: &str) -> Result<(&H, Value), ParseError> {
        self.resolve(&Request::new(pathname))
    }
}
