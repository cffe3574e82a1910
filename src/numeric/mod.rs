mod config;
mod parser;

pub use config::{Handler, Literal, NumberConfig};
pub use parser::parse_number;
