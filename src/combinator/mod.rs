mod context;
mod numbers;
mod parser;
mod sequence;
mod text;

pub use context::in_context;
pub use numbers::{float, int, number};
pub use parser::{Parser, Shared, run};
pub use sequence::{and_then, join, keep, map, one_of, or, problem, skip, succeed};
pub use text::{
    Token, chomp_until, chomp_until_end_or, chomp_while, end, get_chomped_string,
    map_chomped_string, token,
};

pub(crate) use context::within;
pub(crate) use sequence::sequence;
pub(crate) use text::{at_end, chomp_until_literal, parse_token, to_end};
