mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use quizdeck::{names, router};
use tower::ServiceExt;

async fn register(app: &axum::Router, email: &str) -> String {
    let req = Request::builder()
        .method(Method::POST)
        .uri(names::REGISTER_URL)
        .header("content-type", "application/json")
        .body(Body::from(format!(
            r#"{{"email":"{email}","password":"pw"}}"#
        )))
        .expect("request build should succeed");

    let resp = app
        .clone()
        .oneshot(req)
        .await
        .expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);

    let set_cookie = resp
        .headers()
        .get("set-cookie")
        .expect("registration should set a session cookie")
        .to_str()
        .expect("cookie should be ascii");
    set_cookie
        .split(';')
        .next()
        .expect("cookie should have a value")
        .to_string()
}

#[tokio::test]
async fn protected_routes_reject_requests_without_a_session_cookie() {
    let db = common::create_test_db().await;
    let app = router(common::test_state(db));

    let cases = [
        (Method::GET, names::RESULTS_URL),
        (Method::PUT, names::PROFILE_URL),
        (Method::POST, names::PROFILE_IMAGE_URL),
        (Method::POST, names::ADMIN_QUESTIONS_URL),
        (Method::POST, names::ADMIN_SUBJECTS_URL),
        (Method::GET, names::ADMIN_USERS_URL),
        (Method::PUT, "/api/admin/users/1/role"),
        (Method::DELETE, "/api/admin/questions/1"),
    ];

    for (method, uri) in cases {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .expect("request build should succeed");

        let resp = app
            .clone()
            .oneshot(req)
            .await
            .expect("router should respond");

        assert_eq!(
            resp.status(),
            StatusCode::UNAUTHORIZED,
            "expected UNAUTHORIZED for {uri}",
        );
    }
}

#[tokio::test]
async fn admin_routes_reject_ordinary_users_with_forbidden() {
    let db = common::create_test_db().await;
    let app = router(common::test_state(db));

    // First registration takes the admin seat, the second is a plain user.
    register(&app, "root@example.com").await;
    let cookie = register(&app, "pleb@example.com").await;

    let cases = [
        (Method::GET, names::ADMIN_USERS_URL),
        (Method::POST, names::ADMIN_SUBJECTS_URL),
        (Method::POST, names::ADMIN_QUESTIONS_URL),
        (Method::PUT, "/api/admin/users/1/role"),
    ];

    for (method, uri) in cases {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("cookie", &cookie)
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .expect("request build should succeed");

        let resp = app
            .clone()
            .oneshot(req)
            .await
            .expect("router should respond");

        assert_eq!(
            resp.status(),
            StatusCode::FORBIDDEN,
            "expected FORBIDDEN for {uri}",
        );
    }
}

#[tokio::test]
async fn session_cookie_grants_access_to_protected_routes() {
    let db = common::create_test_db().await;
    let app = router(common::test_state(db));

    let cookie = register(&app, "user@example.com").await;

    let req = Request::builder()
        .method(Method::GET)
        .uri(names::RESULTS_URL)
        .header("cookie", &cookie)
        .body(Body::empty())
        .expect("request build should succeed");

    let resp = app.oneshot(req).await.expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn garbage_session_cookie_is_unauthenticated() {
    let db = common::create_test_db().await;
    let app = router(common::test_state(db));

    let req = Request::builder()
        .method(Method::GET)
        .uri(names::RESULTS_URL)
        .header("cookie", format!("{}=deadbeef", names::SESSION_COOKIE_NAME))
        .body(Body::empty())
        .expect("request build should succeed");

    let resp = app.oneshot(req).await.expect("router should respond");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
