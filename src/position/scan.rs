use memchr::memmem;

use super::Position;

/// Outcome of testing a single character with [`match_char`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharMatch {
    /// The predicate rejected the character or the source is exhausted.
    Miss,
    /// The character matched and was a `\n`; the caller moves to the next line.
    Newline(usize),
    /// The character matched; the caller advances the column by one.
    Advance(usize),
}

/// Matches `literal` at `position`, advancing line and column per character.
///
/// On a mismatch, or when the source runs out first, `Err` carries the
/// position reached by the characters that did match.
#[tracing::instrument(level = "trace", skip(source), fields(offset = position.offset as u64))]
pub fn match_literal(literal: &str, source: &str, position: Position) -> Result<Position, Position> {
    let Some(rest) = source.get(position.offset..) else {
        return Err(position);
    };

    let Position {
        mut offset,
        mut line,
        mut column,
    } = position;

    let mut actual = rest.chars();
    for expected in literal.chars() {
        match actual.next() {
            Some(ch) if ch == expected => {
                offset += ch.len_utf8();
                if ch == '\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
            }
            _ => return Err(Position::new(offset, line, column)),
        }
    }

    Ok(Position::new(offset, line, column))
}

/// Tests the character starting at `offset` against `predicate`.
#[inline]
pub fn match_char<P>(predicate: P, offset: usize, source: &str) -> CharMatch
where
    P: Fn(char) -> bool,
{
    match source.get(offset..).and_then(|rest| rest.chars().next()) {
        Some(ch) if predicate(ch) => {
            let next = offset + ch.len_utf8();
            if ch == '\n' {
                CharMatch::Newline(next)
            } else {
                CharMatch::Advance(next)
            }
        }
        _ => CharMatch::Miss,
    }
}

/// Finds the next occurrence of `literal` at or after `position`.
///
/// `Ok` points at the first character of the occurrence. When the literal is
/// absent, `Err` points at the end of the source so diagnostics still land
/// somewhere sensible.
#[tracing::instrument(level = "trace", skip(source), fields(offset = position.offset as u64))]
pub fn find_literal(literal: &str, source: &str, position: Position) -> Result<Position, Position> {
    let haystack = source
        .as_bytes()
        .get(position.offset..)
        .unwrap_or_default();

    match memmem::find(haystack, literal.as_bytes()) {
        Some(relative) => Ok(position_at(position.offset + relative, source, position)),
        None => Err(position_at(source.len(), source, position)),
    }
}

/// Advances the line and column bookkeeping of `position` up to `target`.
///
/// `target` is clamped to the source length. A target that falls inside a
/// multi-byte character resolves to the end of that character; a target
/// behind `position` leaves it unchanged.
pub fn position_at(target: usize, source: &str, position: Position) -> Position {
    let target = target.min(source.len());
    let Some(rest) = source.get(position.offset..) else {
        return position;
    };

    let Position {
        mut offset,
        mut line,
        mut column,
    } = position;

    for ch in rest.chars() {
        if offset >= target {
            break;
        }
        offset += ch.len_utf8();
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    Position::new(offset, line, column)
}
