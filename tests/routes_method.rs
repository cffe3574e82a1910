use route_parser::route::OptionsError;
use route_parser::{
    Param, Problem, Request, Route, RouteError, RouteOptions, Segment, Value, compile,
    compile_with,
};

fn pin_route() -> Route {
    compile(vec![Segment::from("POST /ipfs/"), Param::text("cid").into()]).expect("route compiles")
}

#[test]
fn method_guard_when_method_differs_then_rejects() {
    let err = pin_route()
        .parse(&Request::new("/ipfs/bafy").with_method("GET"))
        .expect_err("GET is not POST");
    assert_eq!(
        err.problem(),
        Some(&Problem::ExpectingMethod {
            method: "POST".to_string()
        })
    );
}

#[test]
fn method_guard_ignores_case() {
    let route = pin_route();
    for method in ["post", "POST", "Post"] {
        let value = route
            .parse(&Request::new("/ipfs/bafy").with_method(method))
            .unwrap_or_else(|err| panic!("{method} should match: {err}"));
        assert_eq!(value.get("cid"), Some(&Value::text("bafy")));
    }
}

#[test]
fn method_guard_when_request_has_no_method_then_rejects() {
    assert!(pin_route().parse(&Request::new("/ipfs/bafy")).is_err());
    assert!(pin_route().parse_path("/ipfs/bafy").is_err());
}

#[test]
fn method_guard_is_written_when_formatting() {
    let value = Value::Record([("cid", "bafy")].into_iter().collect());
    let url = pin_route().format(&value).expect("formats");
    assert_eq!(url.method.as_deref(), Some("POST"));
    assert_eq!(url.pathname, "/ipfs/bafy");
}

#[test]
fn builder_method_adds_a_guard() {
    let route = Route::builder()
        .method("put")
        .literal("/items/")
        .param(Param::int("id"))
        .build()
        .expect("route compiles");

    let value = route
        .parse(&Request::new("/items/7").with_method("PUT"))
        .expect("route matches");
    assert_eq!(value.get("id"), Some(&Value::Int(7)));
    assert!(
        route
            .parse(&Request::new("/items/7").with_method("DELETE"))
            .is_err()
    );
}

#[test]
fn method_prefix_when_options_disagree_then_conflicts() {
    let options = RouteOptions::builder()
        .method("GET")
        .build()
        .expect("valid options");
    match compile_with(vec!["POST /x"], &options) {
        Err(RouteError::MethodConflict {
            declared,
            configured,
        }) => {
            assert_eq!(declared, "POST");
            assert_eq!(configured, "GET");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let agreeing = RouteOptions::builder()
        .method("post")
        .build()
        .expect("valid options");
    assert!(compile_with(vec!["POST /x"], &agreeing).is_ok());
}

#[test]
fn options_when_method_invalid_then_compile_fails() {
    let options = RouteOptions {
        method: Some("G T".to_string()),
        ..RouteOptions::default()
    };
    match compile_with(vec!["/x"], &options) {
        Err(RouteError::Options(OptionsError::InvalidMethodCharacter { invalid, .. })) => {
            assert_eq!(invalid, ' ')
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
