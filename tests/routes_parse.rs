use route_parser::route::{RouteOptions, compile_with};
use route_parser::{
    DeadEnd, Param, ParseError, Problem, Request, Route, RouteContext, Segment, Value, compile,
};

fn car_route() -> Route {
    compile(vec![Segment::from("/car/"), Param::text("cid").into()]).expect("route compiles")
}

fn first_dead_end(err: &ParseError) -> &DeadEnd<RouteContext, Problem> {
    err.problems.first().expect("at least one problem")
}

#[test]
fn route_when_capture_present_then_value_is_keyed() {
    let value = car_route().parse_path("/car/bafy123").expect("route matches");
    assert_eq!(value.get("cid"), Some(&Value::text("bafy123")));
}

#[test]
fn route_when_capture_empty_then_reports_capture_context() {
    let err = car_route().parse_path("/car/").expect_err("empty capture");
    let dead_end = first_dead_end(&err);

    assert_eq!(dead_end.problem, Problem::ExpectingValue);
    assert_eq!((dead_end.line, dead_end.column), (1, 6));

    let frame = dead_end.context.top().expect("capture frame");
    assert_eq!(frame.context, RouteContext::Capture("cid".to_string()));
    assert_eq!(frame.column, 6);

    assert!(err.to_string().contains("capture 'cid'"));
}

#[test]
fn route_when_static_prefix_differs_then_expects_literal() {
    let err = car_route().parse_path("/bus/bafy").expect_err("wrong prefix");
    let dead_end = first_dead_end(&err);
    assert_eq!(
        dead_end.problem,
        Problem::ExpectingLiteral {
            literal: "/car/".to_string()
        }
    );
    assert_eq!(dead_end.column, 1);
}

#[test]
fn route_when_capture_followed_by_literal_then_takes_until_it() {
    let route = compile(vec![
        Segment::from("/car/"),
        Param::text("cid").into(),
        Segment::from("/info"),
    ])
    .expect("route compiles");

    let value = route.parse_path("/car/bafy/info").expect("route matches");
    assert_eq!(value.get("cid"), Some(&Value::text("bafy")));
    assert!(route.parse_path("/car/bafy/info/").is_ok());

    let err = route.parse_path("/car//info").expect_err("empty capture");
    assert_eq!(err.problem(), Some(&Problem::ExpectingValue));

    let err = route.parse_path("/car/bafy").expect_err("missing delimiter");
    let dead_end = first_dead_end(&err);
    assert_eq!(
        dead_end.problem,
        Problem::ExpectingLiteral {
            literal: "/info".to_string()
        }
    );
    assert_eq!(dead_end.column, 10);
}

#[test]
fn route_when_trailing_slash_disabled_then_rejects_it() {
    let options = RouteOptions::builder()
        .trailing_slash(false)
        .build()
        .expect("valid options");
    let route = compile_with(vec!["/about"], &options).expect("route compiles");

    assert!(route.parse_path("/about").is_ok());
    let err = route.parse_path("/about/").expect_err("trailing slash");
    let dead_end = first_dead_end(&err);
    assert_eq!(dead_end.problem, Problem::ExpectingEnd);
    assert_eq!(dead_end.column, 7);

    let lenient = compile(vec!["/about"]).expect("route compiles");
    assert!(lenient.parse_path("/about/").is_ok());
    assert!(lenient.parse_path("/about//").is_err());
}

#[test]
fn route_when_integer_capture_then_rejects_other_numeric_forms() {
    let route = compile(vec![Segment::from("/page/"), Param::int("n").into()]).expect("compiles");

    let value = route.parse_path("/page/12").expect("route matches");
    assert_eq!(value.get("n"), Some(&Value::Int(12)));

    for input in ["/page/0x1A", "/page/1.5"] {
        let err = route.parse_path(input).expect_err("not a decimal integer");
        assert_eq!(err.problem(), Some(&Problem::Invalid), "input {input}");
    }

    let err = route.parse_path("/page/abc").expect_err("no digits");
    assert_eq!(err.problem(), Some(&Problem::ExpectingInt));
}

#[test]
fn route_when_float_capture_then_widens_integers() {
    let route = compile(vec![Segment::from("/zoom/"), Param::float("z").into()]).expect("compiles");
    assert_eq!(
        route.parse_path("/zoom/2").expect("matches").get("z"),
        Some(&Value::Float(2.0))
    );
    assert_eq!(
        route.parse_path("/zoom/1.25").expect("matches").get("z"),
        Some(&Value::Float(1.25))
    );
}

#[test]
fn route_when_enum_capture_then_first_declared_option_wins() {
    let route = compile(vec![
        Segment::from("/"),
        Param::enumerate("kind", ["ipfs", "ipns"]).into(),
        Segment::from("/"),
        Param::text("cid").into(),
    ])
    .expect("route compiles");

    let value = route.parse_path("/ipns/k51").expect("route matches");
    assert_eq!(value.get("kind"), Some(&Value::text("ipns")));
    assert_eq!(value.get("cid"), Some(&Value::text("k51")));

    let err = route.parse_path("/dns/x").expect_err("unknown option");
    assert_eq!(
        err.problem(),
        Some(&Problem::ExpectingVariant {
            options: vec!["ipfs".to_string(), "ipns".to_string()]
        })
    );
}

#[test]
fn route_when_query_params_bound_then_reads_decoded_values() {
    let route = compile(vec![
        Segment::from("/search"),
        Param::text("q").in_query().into(),
        Param::int("page").in_query().into(),
    ])
    .expect("route compiles");

    let value = route
        .parse(&Request::new("/search?q=rust+lang&page=2"))
        .expect("route matches");
    assert_eq!(value.get("q"), Some(&Value::text("rust lang")));
    assert_eq!(value.get("page"), Some(&Value::Int(2)));

    let err = route
        .parse(&Request::new("/search?q=rust"))
        .expect_err("page missing");
    assert_eq!(
        err.problem(),
        Some(&Problem::ExpectingQueryParam {
            key: "page".to_string()
        })
    );
}

#[test]
fn route_when_query_value_malformed_then_reports_query_context() {
    let route = compile(vec![Segment::from("/list"), Param::int("page").in_query().into()])
        .expect("route compiles");

    let err = route
        .parse(&Request::new("/list?page=two"))
        .expect_err("not a number");
    let dead_end = first_dead_end(&err);
    assert_eq!(dead_end.problem, Problem::ExpectingInt);
    assert_eq!(
        dead_end.context.top().map(|frame| &frame.context),
        Some(&RouteContext::Query("page".to_string()))
    );

    let err = route
        .parse(&Request::new("/list?page=2x"))
        .expect_err("trailing garbage");
    let dead_end = first_dead_end(&err);
    assert_eq!(dead_end.problem, Problem::ExpectingEnd);
    assert_eq!(dead_end.column, 2);
}

#[test]
fn route_when_given_absolute_url_then_matches_its_pathname() {
    let value = car_route()
        .parse(&Request::new("https://gateway.example/car/bafy?x=1#top"))
        .expect("route matches");
    assert_eq!(value.get("cid"), Some(&Value::text("bafy")));
}

#[test]
fn route_when_parsing_hash_then_uses_the_fragment() {
    let value = car_route().parse_hash("#/car/bafy").expect("route matches");
    assert_eq!(value.get("cid"), Some(&Value::text("bafy")));
    assert!(car_route().parse_hash("/car/bafy").is_ok());
}

#[test]
fn route_matches_is_the_non_failing_flavor() {
    let route = car_route();
    assert!(route.matches(&Request::new("/car/x")).is_some());
    assert!(route.matches(&Request::new("/car/")).is_none());
}

#[test]
fn route_when_root_not_at_start_then_expects_start() {
    let route = Route::literal("/a").then(Route::root());
    let err = route.parse_path("/a").expect_err("root after a literal");
    assert_eq!(err.problem(), Some(&Problem::ExpectingStart));
}
