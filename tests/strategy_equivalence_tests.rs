//! Instance-bound and type-only dispatchers must be observably identical for
//! the same handler and request.

use brrtdispatch::binding::{Json, ParameterInfo};
use brrtdispatch::dispatcher::{
    dispatch, FuncDispatcher2, RequestDispatcher, TypeOnlyFuncDispatcher2,
};
use brrtdispatch::server::{BindingFailure, HttpContext, RequestContext};
use http::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Patch {
    name: String,
}

#[derive(Debug, PartialEq)]
struct Observed {
    status: u16,
    body: Option<Vec<u8>>,
    failures: Vec<BindingFailure>,
}

async fn observe(dispatcher: &dyn RequestDispatcher, request: impl Fn() -> HttpContext) -> Observed {
    let mut ctx = request();
    dispatch(dispatcher, &mut ctx).await.unwrap();
    Observed {
        status: ctx.status(),
        body: ctx.response().map(|r| r.body.clone()),
        failures: ctx.binding_failures().to_vec(),
    }
}

fn rename(id: i64, patch: Json<Patch>) -> Json<String> {
    Json(format!("{id}:{}", patch.name))
}

fn scale(factor: Option<f64>, value: u32) -> String {
    (f64::from(value) * factor.unwrap_or(1.0)).to_string()
}

fn params(names: &[&str]) -> Vec<ParameterInfo> {
    names.iter().map(|n| ParameterInfo::new(*n)).collect()
}

#[tokio::test]
async fn test_body_handler_equivalence() {
    let instance = FuncDispatcher2::new(rename, &params(&["id", "patch"])).unwrap();
    let type_only = TypeOnlyFuncDispatcher2::new(rename, &params(&["id", "patch"])).unwrap();
    assert_eq!(instance.has_body(), type_only.has_body());

    let requests: Vec<Box<dyn Fn() -> HttpContext>> = vec![
        Box::new(|| {
            HttpContext::new(Method::PUT, "/todos/4")
                .with_route_value("id", "4")
                .with_body(r#"{"name":"renamed"}"#)
        }),
        Box::new(|| HttpContext::new(Method::PUT, "/todos/x").with_route_value("id", "x")),
        Box::new(|| {
            HttpContext::new(Method::PUT, "/todos?id=8").with_body(r#"{"name":"from query"}"#)
        }),
        Box::new(|| {
            HttpContext::new(Method::PUT, "/todos/4")
                .with_route_value("id", "4")
                .with_body("[]")
        }),
        Box::new(|| HttpContext::new(Method::PUT, "/todos")),
    ];

    for request in &requests {
        let a = observe(&instance, request).await;
        let b = observe(&type_only, request).await;
        assert_eq!(a, b);
    }
}

#[tokio::test]
async fn test_value_handler_equivalence() {
    let instance = FuncDispatcher2::new(scale, &params(&["factor", "value"])).unwrap();
    let type_only = TypeOnlyFuncDispatcher2::new(scale, &params(&["factor", "value"])).unwrap();
    assert!(!instance.has_body());
    assert!(!type_only.has_body());

    for target in [
        "/scale?value=3",
        "/scale?factor=2.5&value=4",
        "/scale?factor=abc&value=4",
        "/scale?factor=2",
        "/scale?value=-1",
    ] {
        let request = || HttpContext::new(Method::GET, target);
        let a = observe(&instance, request).await;
        let b = observe(&type_only, request).await;
        assert_eq!(a, b, "{target}");
    }
}
