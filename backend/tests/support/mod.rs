//! Shared HTTP harness for end-to-end flows over the in-memory backend.

use actix_http::Request;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use portfolio::Trace;
use portfolio::inbound::http;
use portfolio::inbound::http::error::json_config;
use portfolio::test_support::{ADMIN_PASSWORD, ADMIN_USERNAME, InMemoryBackend};
use serde_json::json;

/// Initialise an app serving every `/api/v1` route over `backend`.
pub async fn init_app(
    backend: &InMemoryBackend,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(backend.state.clone()))
            .wrap(Trace)
            .service(
                web::scope("/api/v1")
                    .wrap(
                        SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                            .cookie_name("session".to_owned())
                            .cookie_secure(false)
                            .build(),
                    )
                    .app_data(json_config())
                    .configure(http::configure),
            ),
    )
    .await
}

/// Log in as the fixture administrator and return the session cookie.
pub async fn login<S>(app: &S) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
        .to_request();
    let res = actix_test::call_service(app, req).await;
    assert!(res.status().is_success(), "fixture login failed");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
