//! Request metrics middleware used when the `metrics` feature is enabled.
//!
//! The Prometheus middleware changes the response body type, so both the
//! instrumented and the pass-through paths are boxed into one service type.
//! That keeps the `App` type identical whether or not a registry was
//! configured at startup.

use std::sync::Arc;

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::PrometheusMetrics;
use futures_util::future::LocalBoxFuture;

type BoxedService = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;

/// Wraps the app in Prometheus request metrics when a registry is present.
#[derive(Clone)]
pub(crate) struct RequestMetrics {
    prometheus: Option<Arc<PrometheusMetrics>>,
}

impl From<Option<PrometheusMetrics>> for RequestMetrics {
    fn from(prometheus: Option<PrometheusMetrics>) -> Self {
        Self {
            prometheus: prometheus.map(Arc::new),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestMetrics
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxedService;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let Some(prometheus) = self.prometheus.clone() else {
            let passthrough = service.map(ServiceResponse::map_into_boxed_body);
            return Box::pin(async move { Ok(boxed::service(passthrough)) });
        };

        let instrumented = Compat::new((*prometheus).clone()).new_transform(service);
        Box::pin(async move { Ok(boxed::service(instrumented.await?)) })
    }
}

#[cfg(test)]
mod tests {
    //! Both middleware paths serve requests; only the instrumented one
    //! exposes the scrape endpoint.
    use super::*;
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};
    use actix_web_prom::PrometheusMetricsBuilder;
    use rstest::rstest;

    fn prometheus() -> PrometheusMetrics {
        PrometheusMetricsBuilder::new("portfolio_test")
            .endpoint("/metrics")
            .build()
            .expect("prometheus middleware")
    }

    #[rstest]
    #[case(false, StatusCode::NOT_FOUND)]
    #[case(true, StatusCode::OK)]
    #[actix_web::test]
    async fn scrape_endpoint_follows_configuration(
        #[case] enabled: bool,
        #[case] expected: StatusCode,
    ) {
        let layer = RequestMetrics::from(enabled.then(prometheus));
        let app = test::init_service(
            App::new()
                .wrap(layer)
                .route("/ping", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let ping = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request())
            .await;
        assert_eq!(ping.status(), StatusCode::OK);

        let scrape =
            test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request())
                .await;
        assert_eq!(scrape.status(), expected);
    }
}
