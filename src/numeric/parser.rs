use super::{Handler, NumberConfig};
use crate::parse::{ParseResult, ParseState, fail, fail_at};
use crate::position::Position;

/// Consumes a numeric literal at the cursor.
///
/// `0x`, `0o` and `0b` prefixes select a base; anything else is read as a
/// decimal run with an optional fraction and exponent. Only the characters
/// that belong to the literal are consumed, so `1.2.3` stops before the
/// second dot. A decimal integer that overflows `i64` is handed to the
/// `float` handler; prefixed literals that overflow are `invalid`.
#[tracing::instrument(level = "trace", skip_all, fields(offset = state.offset() as u64))]
pub fn parse_number<C, X, T>(state: &ParseState<C>, config: &NumberConfig<X, T>) -> ParseResult<C, X, T>
where
    X: Clone,
{
    let bytes = state.source().as_bytes();
    let offset = state.offset();

    if bytes.get(offset) == Some(&b'0') {
        let zero_offset = offset + 1;
        let base_offset = zero_offset + 1;
        match bytes.get(zero_offset) {
            Some(b'x') => {
                let digits = consume_base(16, base_offset, bytes);
                return finalize_int(&config.invalid, &config.hex, base_offset, digits, state);
            }
            Some(b'o') => {
                let digits = consume_base(8, base_offset, bytes);
                return finalize_int(&config.invalid, &config.octal, base_offset, digits, state);
            }
            Some(b'b') => {
                let digits = consume_base(2, base_offset, bytes);
                return finalize_int(&config.invalid, &config.binary, base_offset, digits, state);
            }
            _ => return finalize_float(config, (zero_offset, Some(0)), state),
        }
    }

    finalize_float(config, consume_base(10, offset, bytes), state)
}

/// Reads a run of base-`radix` digits. The value is `None` when it does not
/// fit in an `i64`.
fn consume_base(radix: u32, mut offset: usize, bytes: &[u8]) -> (usize, Option<i64>) {
    let mut total = Some(0i64);
    while let Some(digit) = bytes
        .get(offset)
        .and_then(|b| char::from(*b).to_digit(radix))
    {
        total = total
            .and_then(|t| t.checked_mul(i64::from(radix)))
            .and_then(|t| t.checked_add(i64::from(digit)));
        offset += 1;
    }
    (offset, total)
}

fn finalize_int<C, X, T>(
    invalid: &X,
    handler: &Handler<i64, X, T>,
    start_offset: usize,
    (end_offset, n): (usize, Option<i64>),
    state: &ParseState<C>,
) -> ParseResult<C, X, T>
where
    X: Clone,
{
    if start_offset == end_offset {
        return ParseResult::bad(state.offset() < start_offset, fail(invalid.clone(), state));
    }

    let Some(n) = n else {
        return ParseResult::bad(true, fail(invalid.clone(), state));
    };

    match handler(n) {
        Ok(value) => ParseResult::good(true, value, bump_offset(state, end_offset)),
        Err(problem) => ParseResult::bad(true, fail(problem, state)),
    }
}

fn finalize_float<C, X, T>(
    config: &NumberConfig<X, T>,
    int_pair: (usize, Option<i64>),
    state: &ParseState<C>,
) -> ParseResult<C, X, T>
where
    X: Clone,
{
    let source = state.source();
    let offset = state.offset();
    let (int_offset, _) = int_pair;

    let float_offset = match consume_dot_and_exp(int_offset, source.as_bytes()) {
        Ok(float_offset) => float_offset,
        Err(fail_offset) => {
            let column = state.column() + (fail_offset - offset);
            return ParseResult::bad(
                true,
                fail_at(config.invalid.clone(), state.line(), column, state.context()),
            );
        }
    };

    if float_offset == offset {
        return ParseResult::bad(false, fail(config.expecting.clone(), state));
    }

    // A decimal integer too large for `i64` goes to the float handler.
    if float_offset == int_offset && int_pair.1.is_some() {
        return finalize_int(&config.invalid, &config.int, offset, int_pair, state);
    }

    let Some(n) = to_float(&source[offset..float_offset]) else {
        return ParseResult::bad(true, fail(config.invalid.clone(), state));
    };

    match (config.float)(n) {
        Ok(value) => ParseResult::good(true, value, bump_offset(state, float_offset)),
        Err(problem) => ParseResult::bad(true, fail(problem, state)),
    }
}

fn to_float(input: &str) -> Option<f64> {
    input.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Consumes an optional fraction and exponent after the integer part.
/// `Err` carries the offset of a dangling exponent.
fn consume_dot_and_exp(offset: usize, bytes: &[u8]) -> Result<usize, usize> {
    if bytes.get(offset) == Some(&b'.') {
        consume_exp(chomp_base10(offset + 1, bytes), bytes)
    } else {
        consume_exp(offset, bytes)
    }
}

fn consume_exp(offset: usize, bytes: &[u8]) -> Result<usize, usize> {
    match bytes.get(offset) {
        Some(b'e' | b'E') => {
            let e_offset = offset + 1;
            let exp_offset = match bytes.get(e_offset) {
                Some(b'+' | b'-') => e_offset + 1,
                _ => e_offset,
            };
            let end = chomp_base10(exp_offset, bytes);
            if end == exp_offset { Err(end) } else { Ok(end) }
        }
        _ => Ok(offset),
    }
}

fn chomp_base10(mut offset: usize, bytes: &[u8]) -> usize {
    while bytes.get(offset).is_some_and(u8::is_ascii_digit) {
        offset += 1;
    }
    offset
}

/// Numeric literals are ASCII, so the column moves by the byte count.
fn bump_offset<C>(state: &ParseState<C>, offset: usize) -> ParseState<C> {
    let column = state.column() + (offset - state.offset());
    state.advance(Position::new(offset, state.line(), column))
}
