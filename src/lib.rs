pub mod combinator;
pub mod numeric;
pub mod parse;
pub mod position;
pub mod route;
pub mod router;

pub use numeric::{Literal, NumberConfig};
pub use parse::{ContextStack, DeadEnd, Located, ParseResult, ParseState, Problems};
pub use position::Position;
pub use route::{
    FormatError, FormattedUrl, Param, ParseError, Problem, Request, Route, RouteBuilder,
    RouteContext, RouteError, RouteOptions, Segment, Value, compile, compile_with,
};
pub use router::Router;
