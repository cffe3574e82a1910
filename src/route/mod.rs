mod api;
mod builder;
mod error;
mod format;
mod options;
mod problem;
mod request;
mod syntax;
pub mod url;
mod value;

pub use builder::{Location, Matcher, Param, RouteBuilder, Segment, compile, compile_with};
pub use error::{ParseError, RouteError, RouteResult};
pub use format::{FormatError, FormatResult, FormatState, FormattedUrl};
pub use options::{OptionsError, RouteOptions, RouteOptionsBuilder};
pub use problem::{Problem, RouteContext, RouteParse, RouteProblems, RouteState};
pub use request::Request;
pub use syntax::{Boundary, Notation, Route};
pub use value::{Record, Value};

pub(crate) use api::request_state;
