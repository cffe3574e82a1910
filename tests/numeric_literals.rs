use route_parser::combinator::{Parser, number, run};
use route_parser::{Literal, NumberConfig, ParseResult, ParseState, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Expecting,
    Invalid,
    TooLarge,
}

fn literal_parser() -> Parser<(), Tag, Literal> {
    number(NumberConfig::literal(Tag::Expecting, Tag::Invalid))
}

fn parse(input: &str) -> ParseResult<(), Tag, Literal> {
    literal_parser().parse(&ParseState::new(input))
}

fn failure(input: &str) -> (bool, Tag, usize) {
    match parse(input) {
        ParseResult::Bad { progress, problems } => {
            let dead_end = problems.first().expect("one problem");
            (progress, dead_end.problem, dead_end.column)
        }
        ParseResult::Good { value, .. } => panic!("{input} parsed as {value:?}"),
    }
}

#[test]
fn number_classifies_every_literal_form() {
    let parser = literal_parser();
    assert_eq!(run(&parser, "0x1A"), Ok(Literal::Hex(26)));
    assert_eq!(run(&parser, "0o17"), Ok(Literal::Octal(15)));
    assert_eq!(run(&parser, "0b101"), Ok(Literal::Binary(5)));
    assert_eq!(run(&parser, "3.14"), Ok(Literal::Float(3.14)));
    assert_eq!(run(&parser, "42"), Ok(Literal::Int(42)));
    assert_eq!(run(&parser, "0.5"), Ok(Literal::Float(0.5)));
    assert_eq!(run(&parser, "6e2"), Ok(Literal::Float(600.0)));
}

#[test]
fn number_when_exponent_dangles_then_invalid_at_the_failing_column() {
    assert_eq!(failure("1e"), (true, Tag::Invalid, 3));
    assert_eq!(failure("1.5e+"), (true, Tag::Invalid, 6));
}

#[test]
fn number_when_second_dot_follows_then_stops_before_it() {
    match parse("1.2.3") {
        ParseResult::Good {
            progress,
            value,
            state,
        } => {
            assert!(progress);
            assert_eq!(value, Literal::Float(1.2));
            assert_eq!(state.position(), Position::new(3, 1, 4));
            assert_eq!(state.remaining(), ".3");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn number_when_leading_zero_then_consumes_only_the_zero() {
    match parse("012") {
        ParseResult::Good { value, state, .. } => {
            assert_eq!(value, Literal::Int(0));
            assert_eq!(state.offset(), 1);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn number_when_prefix_has_no_digits_then_invalid_with_progress() {
    assert_eq!(failure("0x"), (true, Tag::Invalid, 1));
    assert_eq!(failure("0bz"), (true, Tag::Invalid, 1));
}

#[test]
fn number_when_no_digits_then_expecting_without_progress() {
    assert_eq!(failure("abc"), (false, Tag::Expecting, 1));
    assert_eq!(failure(""), (false, Tag::Expecting, 1));
}

#[test]
fn number_when_prefixed_integer_overflows_then_invalid() {
    assert_eq!(failure("0xffffffffffffffffff").1, Tag::Invalid);
    assert_eq!(failure(&format!("0b{}", "1".repeat(65))).1, Tag::Invalid);
}

#[test]
fn number_when_decimal_integer_overflows_then_reads_it_as_float() {
    assert_eq!(
        run(&literal_parser(), "99999999999999999999"),
        Ok(Literal::Float(99999999999999999999.0))
    );

    let ints: Parser<(), Tag, i64> = number(NumberConfig::int(Tag::Expecting, Tag::Invalid));
    match ints.parse(&ParseState::new("99999999999999999999")) {
        ParseResult::Bad { progress, problems } => {
            assert!(progress);
            assert_eq!(problems.first().map(|d| d.problem), Some(Tag::Invalid));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn number_when_callback_rejects_then_reports_its_tag() {
    let parser: Parser<(), Tag, i64> = number(
        NumberConfig::new(Tag::Expecting, Tag::Invalid)
            .on_int(|n| if n < 100 { Ok(n) } else { Err(Tag::TooLarge) }),
    );
    assert_eq!(run(&parser, "7"), Ok(7));

    let result = parser.parse(&ParseState::new("700"));
    assert!(result.progress());
    match result {
        ParseResult::Bad { problems, .. } => {
            assert_eq!(problems.first().map(|d| d.problem), Some(Tag::TooLarge));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn number_config_map_post_processes_values() {
    let parser: Parser<(), Tag, String> = number(
        NumberConfig::int(Tag::Expecting, Tag::Invalid).map(|n| format!("#{n}")),
    );
    assert_eq!(run(&parser, "12"), Ok("#12".to_string()));
}
