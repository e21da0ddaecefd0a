//! Public contact-form endpoint.
//!
//! ```text
//! POST /api/v1/contact {"name":"Ada","email":"ada@example.com",...}
//! ```
//!
//! Responses always use the form envelope `{success, message, errors?}` so
//! the page can render field errors inline, including bodies the JSON
//! extractor rejects. A submission dropped by the honeypot is
//! indistinguishable from a stored one.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{
    CONTACT_SUCCESS_MESSAGE, ContactForm, Error, ErrorCode, SUBMISSION_FAILED_MESSAGE,
    SubmissionOutcome, TRACE_ID_HEADER,
};
use crate::inbound::http::client_key::client_key;
use crate::inbound::http::error::payload_error;
use crate::inbound::http::schemas::ContactFormSchema;
use crate::inbound::http::state::HttpState;

/// Envelope returned by `POST /api/v1/contact`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    /// Whether the submission was accepted.
    pub success: bool,
    /// Message to show the visitor.
    #[schema(example = "Thank you for your message! I'll get back to you soon.")]
    pub message: String,
    /// Per-field validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<Value>,
}

impl ContactResponse {
    fn accepted() -> Self {
        Self {
            success: true,
            message: CONTACT_SUCCESS_MESSAGE.to_owned(),
            errors: None,
        }
    }

    fn rejected(error: &Error) -> Self {
        let message = match error.code() {
            ErrorCode::InternalError | ErrorCode::ServiceUnavailable => {
                SUBMISSION_FAILED_MESSAGE.to_owned()
            }
            _ => error.message().to_owned(),
        };
        let errors = error
            .details()
            .and_then(|details| details.get("errors"))
            .cloned();
        Self {
            success: false,
            message,
            errors,
        }
    }
}

fn render_rejection(error: &Error) -> HttpResponse {
    let status = actix_web::ResponseError::status_code(error);
    let mut builder = HttpResponse::build(status);
    if let Some(id) = error.trace_id() {
        builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
    }
    builder.json(ContactResponse::rejected(error))
}

fn contact_payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = render_rejection(&payload_error(&err));
    InternalError::from_response(err, response).into()
}

/// Register `POST /contact`.
///
/// The route carries its own JSON configuration so unreadable or mistyped
/// bodies are answered in the form envelope rather than the API error shape.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/contact")
            .app_data(web::JsonConfig::default().error_handler(contact_payload_error))
            .route(web::post().to(submit_contact)),
    );
}

/// Submit the public contact form.
#[utoipa::path(
    post,
    path = "/api/v1/contact",
    request_body = ContactFormSchema,
    responses(
        (status = 200, description = "Submission accepted", body = ContactResponse),
        (status = 400, description = "Validation failed", body = ContactResponse),
        (status = 429, description = "Too many submissions", body = ContactResponse),
        (status = 500, description = "Submission could not be stored", body = ContactResponse),
        (status = 503, description = "Store unavailable", body = ContactResponse)
    ),
    tags = ["contact"],
    operation_id = "submitContact",
    security([])
)]
pub async fn submit_contact(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<ContactForm>,
) -> HttpResponse {
    let client = client_key(&request);
    match state.contact.submit(&client, &payload).await {
        Ok(SubmissionOutcome::Stored(_) | SubmissionOutcome::Discarded) => {
            HttpResponse::build(StatusCode::OK).json(ContactResponse::accepted())
        }
        Err(error) => render_rejection(&error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{INVALID_FORM_MESSAGE, MessageId, RATE_LIMITED_MESSAGE};
    use crate::inbound::http::test_utils::{TestPorts, test_state};
    use crate::domain::ports::ContactSubmissionCommand;
    use crate::domain::ClientKey;
    use actix_web::{App, test as actix_test};
    use async_trait::async_trait;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    struct StubContact(Result<SubmissionOutcome, Error>);

    #[async_trait]
    impl ContactSubmissionCommand for StubContact {
        async fn submit(
            &self,
            _client: &ClientKey,
            _form: &ContactForm,
        ) -> Result<SubmissionOutcome, Error> {
            self.0.clone()
        }
    }

    async fn post_payload(
        outcome: Result<SubmissionOutcome, Error>,
        payload: Value,
    ) -> (StatusCode, Value) {
        let state = test_state(TestPorts {
            contact: Some(Arc::new(StubContact(outcome))),
            ..TestPorts::default()
        });
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(
                    web::scope("/api/v1")
                        .app_data(crate::inbound::http::error::json_config())
                        .configure(configure),
                ),
        )
        .await;
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/contact")
            .set_json(payload)
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        let status = res.status();
        let body: Value = actix_test::read_body_json(res).await;
        (status, body)
    }

    async fn post_contact(outcome: Result<SubmissionOutcome, Error>) -> (StatusCode, Value) {
        post_payload(
            outcome,
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "category": "Other",
                "message": "Hello",
            }),
        )
        .await
    }

    #[rstest]
    #[case(SubmissionOutcome::Stored(MessageId::random()))]
    #[case(SubmissionOutcome::Discarded)]
    #[actix_web::test]
    async fn stored_and_discarded_render_identically(#[case] outcome: SubmissionOutcome) {
        let (status, body) = post_contact(Ok(outcome)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": true, "message": CONTACT_SUCCESS_MESSAGE})
        );
    }

    #[actix_web::test]
    async fn validation_errors_are_listed_per_field() {
        let mut errors = crate::domain::FieldErrors::default();
        errors.push("email", "Please enter a valid email address");
        let (status, body) = post_contact(Err(errors.into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], INVALID_FORM_MESSAGE);
        assert_eq!(
            body["errors"]["email"][0],
            "Please enter a valid email address"
        );
    }

    #[actix_web::test]
    async fn rate_limited_submission_is_429() {
        let (status, body) =
            post_contact(Err(Error::too_many_requests(RATE_LIMITED_MESSAGE))).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            body,
            json!({"success": false, "message": RATE_LIMITED_MESSAGE})
        );
    }

    #[rstest]
    #[case(Error::internal("constraint violated"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(Error::service_unavailable("pool timed out"), StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn store_failures_use_generic_message(#[case] error: Error, #[case] status: StatusCode) {
        let (observed, body) = post_contact(Err(error)).await;
        assert_eq!(observed, status);
        assert_eq!(body["message"], SUBMISSION_FAILED_MESSAGE);
        assert!(body.get("errors").is_none());
    }

    #[rstest]
    #[case(json!({"name": 123, "email": "ada@example.com", "message": "Hello"}))]
    #[case(json!("not an object"))]
    #[case(json!({"name": "Ada", "budget": {"min": 1000}}))]
    #[actix_web::test]
    async fn unreadable_bodies_use_the_form_envelope(#[case] payload: Value) {
        let (status, body) =
            post_payload(Ok(SubmissionOutcome::Discarded), payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Request body is not valid JSON");
        assert!(body.get("code").is_none());
    }
}
