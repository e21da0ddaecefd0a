//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test as actix_test;

use crate::domain::ports::{ContactSubmissionCommand, InboxCommand, InboxQuery, LoginService};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::state::HttpState;
use crate::test_support::{ADMIN_PASSWORD, ADMIN_USERNAME, InMemoryBackend};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Port overrides layered over the in-memory backend.
#[derive(Default)]
pub struct TestPorts {
    pub login: Option<Arc<dyn LoginService>>,
    pub contact: Option<Arc<dyn ContactSubmissionCommand>>,
    pub inbox_query: Option<Arc<dyn InboxQuery>>,
    pub inbox: Option<Arc<dyn InboxCommand>>,
}

/// In-memory HTTP state with selected ports replaced.
pub fn test_state(overrides: TestPorts) -> HttpState {
    let mut state = InMemoryBackend::default().state;
    if let Some(login) = overrides.login {
        state.login = login;
    }
    if let Some(contact) = overrides.contact {
        state.contact = contact;
    }
    if let Some(inbox_query) = overrides.inbox_query {
        state.inbox_query = inbox_query;
    }
    if let Some(inbox) = overrides.inbox {
        state.inbox = inbox;
    }
    state
}

/// Log in with the fixture administrator and return the session cookie.
pub async fn login_and_get_cookie<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let login_req = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            username: ADMIN_USERNAME.into(),
            password: ADMIN_PASSWORD.into(),
        })
        .to_request();
    let login_res = actix_test::call_service(app, login_req).await;
    assert!(login_res.status().is_success(), "fixture login failed");
    login_res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
