mod context;
mod result;
mod state;

pub use context::{ContextStack, Iter, Located};
pub use result::{DeadEnd, ParseResult, Problems, fail, fail_at};
pub use state::{Headers, ParseState, Query};
