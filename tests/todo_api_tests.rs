//! A small Todo API wired through the endpoint registry.
//!
//! Routes:
//! - `GET /todos` lists every todo (async handler)
//! - `GET /todos/{id}` returns one todo or 404
//! - `POST /todos` creates a todo from a JSON body
//! - `DELETE /todos/{id}` removes a todo, 200 or 404

use brrtdispatch::binding::{Json, ParameterInfo};
use brrtdispatch::dispatcher::{ActionDispatcher1, FuncDispatcher0, TypeOnlyFuncDispatcher1};
use brrtdispatch::registry::EndpointRegistry;
use brrtdispatch::response::Results;
use brrtdispatch::server::{HttpContext, RequestContext};
use futures::future::BoxFuture;
use futures::FutureExt;
use http::Method;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Todo {
    id: i32,
    name: String,
    #[serde(default)]
    is_complete: bool,
}

type Store = Arc<Mutex<BTreeMap<i32, Todo>>>;

fn map_routes(registry: &mut EndpointRegistry, store: &Store) {
    let db = Arc::clone(store);
    registry.map_get(
        "/todos",
        FuncDispatcher0::new(
            move || -> BoxFuture<'static, Json<Vec<Todo>>> {
                let db = Arc::clone(&db);
                async move {
                    tokio::task::yield_now().await;
                    let todos = db.lock().unwrap().values().cloned().collect();
                    Json(todos)
                }
                .boxed()
            },
            &[],
        )
        .unwrap(),
    );

    let db = Arc::clone(store);
    registry.map_get(
        "/todos/{id}",
        TypeOnlyFuncDispatcher1::new(
            move |id: i32| db.lock().unwrap().get(&id).cloned().map(Json),
            &[ParameterInfo::new("id")],
        )
        .unwrap(),
    );

    let db = Arc::clone(store);
    registry.map_post(
        "/todos",
        ActionDispatcher1::new(
            move |todo: Json<Todo>| {
                let todo = todo.into_inner();
                db.lock().unwrap().insert(todo.id, todo);
            },
            &[ParameterInfo::new("todo")],
        )
        .unwrap(),
    );

    let db = Arc::clone(store);
    registry.map_delete(
        "/todos/{id}",
        brrtdispatch::dispatcher::FuncDispatcher1::new(
            move |id: i32| -> Results<()> {
                match db.lock().unwrap().remove(&id) {
                    Some(_) => Results::status(http::StatusCode::OK),
                    None => Results::not_found(),
                }
            },
            &[ParameterInfo::new("id")],
        )
        .unwrap(),
    );
}

fn setup() -> (EndpointRegistry, Store) {
    let store = Store::default();
    let mut registry = EndpointRegistry::new();
    map_routes(&mut registry, &store);
    (registry, store)
}

async fn send(registry: &EndpointRegistry, ctx: HttpContext) -> HttpContext {
    let mut ctx = ctx;
    registry.handle(&mut ctx).await.unwrap();
    ctx
}

#[tokio::test]
async fn test_create_then_list_and_get() {
    let (registry, store) = setup();

    let todo = Todo {
        id: 1,
        name: "Buy milk".into(),
        is_complete: false,
    };
    let ctx = send(
        &registry,
        HttpContext::new(Method::POST, "/todos").with_json(&todo).unwrap(),
    )
    .await;
    assert_eq!(ctx.status(), 200);
    assert_eq!(store.lock().unwrap().len(), 1);

    let ctx = send(&registry, HttpContext::new(Method::GET, "/todos")).await;
    assert_eq!(ctx.response_json().unwrap(), serde_json::json!([todo]));

    let ctx = send(&registry, HttpContext::new(Method::GET, "/todos/1")).await;
    assert_eq!(ctx.status(), 200);
    assert_eq!(ctx.response_json().unwrap()["name"], "Buy milk");
}

#[tokio::test]
async fn test_get_missing_is_404() {
    let (registry, _store) = setup();
    let ctx = send(&registry, HttpContext::new(Method::GET, "/todos/99")).await;
    assert_eq!(ctx.status(), 404);
    assert!(ctx.response().is_none());
}

#[tokio::test]
async fn test_non_numeric_id_is_400() {
    let (registry, _store) = setup();
    let ctx = send(&registry, HttpContext::new(Method::GET, "/todos/abc")).await;
    assert_eq!(ctx.status(), 400);
    assert_eq!(ctx.binding_failures()[0].parameter_name, "id");
}

#[tokio::test]
async fn test_invalid_body_does_not_reach_store() {
    let (registry, store) = setup();
    let ctx = send(
        &registry,
        HttpContext::new(Method::POST, "/todos").with_body(r#"{"name":"no id"}"#),
    )
    .await;
    assert_eq!(ctx.status(), 400);
    assert!(store.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete() {
    let (registry, store) = setup();
    store.lock().unwrap().insert(
        7,
        Todo {
            id: 7,
            name: "Walk the dog".into(),
            is_complete: true,
        },
    );

    let ctx = send(&registry, HttpContext::new(Method::DELETE, "/todos/7")).await;
    assert_eq!(ctx.status(), 200);
    assert!(store.lock().unwrap().is_empty());

    let ctx = send(&registry, HttpContext::new(Method::DELETE, "/todos/7")).await;
    assert_eq!(ctx.status(), 404);
}

#[tokio::test]
async fn test_unknown_route() {
    let (registry, _store) = setup();
    let ctx = send(&registry, HttpContext::new(Method::GET, "/users")).await;
    assert_eq!(ctx.status(), 404);
    let ctx = send(&registry, HttpContext::new(Method::PATCH, "/todos")).await;
    assert_eq!(ctx.status(), 405);
}

#[tokio::test]
async fn test_concurrent_requests_share_registry() {
    let (registry, store) = setup();
    let registry = Arc::new(registry);

    let mut tasks = Vec::new();
    for id in 0..16 {
        let registry = Arc::clone(&registry);
        tasks.push(tokio::spawn(async move {
            let todo = Todo {
                id,
                name: format!("task {id}"),
                is_complete: false,
            };
            let mut ctx = HttpContext::new(Method::POST, "/todos").with_json(&todo).unwrap();
            registry.handle(&mut ctx).await.unwrap();
            ctx.status()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), 200);
    }
    assert_eq!(store.lock().unwrap().len(), 16);
}
