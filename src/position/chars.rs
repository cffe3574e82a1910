//! Character predicates for `chomp_while` and friends. All of them are ASCII
//! only, matching the character classes URL paths are written in.

#[inline]
pub fn is_upper(ch: char) -> bool {
    ch.is_ascii_uppercase()
}

#[inline]
pub fn is_lower(ch: char) -> bool {
    ch.is_ascii_lowercase()
}

#[inline]
pub fn is_alpha(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub fn is_alpha_num(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
}

#[inline]
pub fn is_alpha_num_or_underscore(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[inline]
pub fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

#[inline]
pub fn is_whitespace(ch: char) -> bool {
    ch.is_ascii_whitespace()
}
