mod chars;
mod scan;

pub use chars::{
    is_alpha, is_alpha_num, is_alpha_num_or_underscore, is_digit, is_hex_digit, is_lower,
    is_upper, is_whitespace,
};
pub use scan::{CharMatch, find_literal, match_char, match_literal, position_at};

use serde::{Deserialize, Serialize};

/// A cursor into a source string.
///
/// `offset` is a byte offset into the UTF-8 source. `line` and `column` are
/// counted like a text editor: both start at 1, the column advances once per
/// character and a `\n` moves to the next line with the column reset to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };

    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}
