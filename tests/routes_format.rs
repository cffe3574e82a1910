use route_parser::route::{FormatError, Record};
use route_parser::{Param, Request, Route, Segment, Value, compile};

fn car_route() -> Route {
    compile(vec![Segment::from("/car/"), Param::text("cid").into()]).expect("route compiles")
}

fn record(entries: &[(&str, Value)]) -> Value {
    Value::Record(entries.iter().cloned().collect())
}

#[test]
fn format_when_capture_given_then_rebuilds_pathname() {
    let url = car_route()
        .format(&record(&[("cid", Value::text("bafy123"))]))
        .expect("formats");
    assert_eq!(url.pathname, "/car/bafy123");
    assert_eq!(url.search, "");
    assert_eq!(url.hash, "");
    assert_eq!(url.method, None);
    assert_eq!(url.to_string(), "/car/bafy123");
}

#[test]
fn format_when_parsed_value_fed_back_then_round_trips() {
    let route = compile(vec![
        Segment::from("/"),
        Param::enumerate("kind", ["ipfs", "ipns"]).into(),
        Segment::from("/"),
        Param::text("cid").into(),
        Segment::from("/page/"),
        Param::int("page").into(),
    ])
    .expect("route compiles");

    for pathname in ["/ipfs/bafy/page/3", "/ipns/k51/page/10"] {
        let value = route.parse_path(pathname).expect("route matches");
        let url = route.format(&value).expect("formats");
        assert_eq!(url.pathname, pathname);
    }
}

#[test]
fn format_when_query_params_bound_then_writes_encoded_search() {
    let route = compile(vec![
        Segment::from("/search"),
        Param::text("q").in_query().into(),
        Param::int("page").in_query().into(),
    ])
    .expect("route compiles");

    let value = record(&[("q", Value::text("rust lang")), ("page", Value::Int(2))]);
    let url = route.format(&value).expect("formats");
    assert_eq!(url.pathname, "/search");
    assert_eq!(url.search, "?q=rust%20lang&page=2");
    assert_eq!(url.to_string(), "/search?q=rust%20lang&page=2");

    let reparsed = route
        .parse(&Request::new(url.to_string()))
        .expect("formatted url parses");
    assert_eq!(reparsed, value);
}

#[test]
fn format_hash_prefixes_the_url() {
    let value = record(&[("cid", Value::text("bafy"))]);
    assert_eq!(
        car_route().format_hash(&value).expect("formats"),
        "#/car/bafy"
    );
    assert_eq!(car_route().format_path(&value).expect("formats"), "/car/bafy");
}

#[test]
fn format_when_key_missing_then_reports_it() {
    let err = car_route()
        .format(&Value::Record(Record::new()))
        .expect_err("no cid");
    assert_eq!(
        err,
        FormatError::MissingKey {
            key: "cid".to_string()
        }
    );
}

#[test]
fn format_when_value_is_not_a_record_then_reports_kind() {
    match car_route().format(&Value::text("bafy")) {
        Err(FormatError::ExpectedRecord { key, found }) => {
            assert_eq!(key, "cid");
            assert_eq!(found, "text");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn format_when_capture_contains_delimiter_then_rejects_it() {
    let route = compile(vec![
        Segment::from("/car/"),
        Param::text("cid").into(),
        Segment::from("/info"),
    ])
    .expect("route compiles");

    match route.format(&record(&[("cid", Value::text("a/info"))])) {
        Err(FormatError::ContainsDelimiter { delimiter, .. }) => assert_eq!(delimiter, "/info"),
        other => panic!("unexpected result: {other:?}"),
    }

    let err = route
        .format(&record(&[("cid", Value::text(""))]))
        .expect_err("empty capture");
    assert_eq!(err, FormatError::EmptyCapture);
}

#[test]
fn format_when_enum_value_unknown_then_rejects_it() {
    let route = compile(vec![
        Segment::from("/"),
        Param::enumerate("kind", ["ipfs", "ipns"]).into(),
    ])
    .expect("route compiles");

    match route.format(&record(&[("kind", Value::text("dns"))])) {
        Err(FormatError::UnknownVariant { value, options }) => {
            assert_eq!(value, "dns");
            assert_eq!(options, vec!["ipfs".to_string(), "ipns".to_string()]);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn format_when_number_expected_then_rejects_text() {
    let route = compile(vec![Segment::from("/page/"), Param::int("n").into()]).expect("compiles");
    match route.format(&record(&[("n", Value::text("3"))])) {
        Err(FormatError::TypeMismatch { found, .. }) => assert_eq!(found, "text"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn format_when_prefixed_notation_then_round_trips() {
    let route = Route::literal("/id/").then(Route::variable("id", Route::hex()));

    let value = route.parse_path("/id/0x1A").expect("route matches");
    assert_eq!(value.get("id"), Some(&Value::Int(26)));
    assert_eq!(route.format_path(&value).expect("formats"), "/id/0x1a");

    let bits = Route::variable("b", Route::binary());
    assert_eq!(
        bits.format_path(&record(&[("b", Value::Int(5))]))
            .expect("formats"),
        "0b101"
    );
}

#[test]
fn format_when_and_route_then_left_side_still_written() {
    let route = Route::and(Route::literal("/files/"), Route::rest());
    let value = route.parse_path("/files/a/b.txt").expect("route matches");
    assert_eq!(value, Value::text("a/b.txt"));
    assert_eq!(route.format_path(&value).expect("formats"), "/files/a/b.txt");
}

#[test]
fn format_when_float_exceeds_int_range_then_round_trips() {
    let route = compile(vec![Segment::from("/f/"), Param::float("x").into()]).expect("compiles");

    let value = record(&[("x", Value::Float(1e20))]);
    let path = route.format_path(&value).expect("formats");
    assert_eq!(path, "/f/100000000000000000000");
    assert_eq!(route.parse_path(&path).expect("parses back"), value);

    let parsed = route
        .parse_path("/f/10000000000000000000")
        .expect("route matches");
    assert_eq!(parsed.get("x"), Some(&Value::Float(1e19)));
}

#[test]
fn format_when_int_capture_given_value_it_cannot_read_then_rejects() {
    let route = compile(vec![Segment::from("/n/"), Param::int("n").into()]).expect("compiles");

    match route.format(&record(&[("n", Value::Float(2.5))])) {
        Err(FormatError::TypeMismatch { expected, found }) => {
            assert_eq!((expected, found), ("int", "float"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(
        route.format(&record(&[("n", Value::Int(-5))])),
        Err(FormatError::OutOfRange {
            value: "-5".to_string()
        })
    );

    let hex = Route::variable("id", Route::hex());
    assert_eq!(
        hex.format(&record(&[("id", Value::Int(-1))])),
        Err(FormatError::OutOfRange {
            value: "-1".to_string()
        })
    );
}

#[test]
fn format_when_float_not_finite_or_negative_then_rejects() {
    let route = compile(vec![Segment::from("/zoom/"), Param::float("z").into()]).expect("compiles");

    for z in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.5] {
        match route.format(&record(&[("z", Value::Float(z))])) {
            Err(FormatError::OutOfRange { .. }) => {}
            other => panic!("{z} formatted as {other:?}"),
        }
    }
    assert_eq!(
        route
            .format_path(&record(&[("z", Value::Int(3))]))
            .expect("formats"),
        "/zoom/3"
    );
}
