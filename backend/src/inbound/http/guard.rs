//! Authentication guard for administrator endpoints.
//!
//! Handlers take [`AdminGuard`] as an argument so the session is checked
//! before the handler body runs. Any failure to establish a signed-in
//! administrator, including an unreadable session, is rejected with
//! `401 unauthorized`.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use crate::domain::{AdminId, Error};
use crate::inbound::http::session::SessionContext;

/// Extractor proving the request carries an administrator session.
#[derive(Debug, Clone)]
pub struct AdminGuard(AdminId);

impl AdminGuard {
    /// The signed-in administrator.
    pub fn admin(&self) -> &AdminId {
        &self.0
    }

    fn resolve(session: SessionContext) -> Result<Self, Error> {
        match session.admin_id() {
            Ok(Some(admin)) => Ok(Self(admin)),
            Ok(None) => {
                debug!("admin endpoint called without a session");
                Err(Error::unauthorized("login required"))
            }
            Err(error) => {
                warn!(error = %error, "unreadable session on admin endpoint");
                Err(Error::unauthorized("login required"))
            }
        }
    }
}

impl FromRequest for AdminGuard {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move {
            let session = match fut.await {
                Ok(session) => session,
                Err(error) => {
                    warn!(error = %error, "session unavailable on admin endpoint");
                    return Err(Error::unauthorized("login required").into());
                }
            };
            Self::resolve(SessionContext::new(session)).map_err(Into::into)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    #[actix_web::test]
    async fn rejects_request_without_session() {
        let app = test::init_service(
            App::new()
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .route(
                    "/admin",
                    web::get().to(|_: AdminGuard| async { HttpResponse::Ok() }),
                ),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/admin").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Error = test::read_body_json(res).await;
        assert_eq!(body.code(), ErrorCode::Unauthorized);
    }

    #[actix_web::test]
    async fn admits_signed_in_admin() {
        let app = test::init_service(
            App::new()
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .route(
                    "/login",
                    web::get().to(|session: SessionContext| async move {
                        session.persist_admin(&AdminId::new("owner").expect("admin id"))?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/admin",
                    web::get().to(|guard: AdminGuard| async move {
                        HttpResponse::Ok().body(guard.admin().to_string())
                    }),
                ),
        )
        .await;

        let login =
            test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
        let cookie = login
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(|cookie| cookie.into_owned())
            .expect("session cookie");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/admin")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "owner");
    }
}
