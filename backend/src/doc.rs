//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the contact, session, inbox and health endpoints
//! - **Schemas**: Domain type wrappers ([`ErrorSchema`], [`ContactFormSchema`],
//!   [`ContactMessageSchema`]) that provide OpenAPI definitions without
//!   coupling domain types to the utoipa framework
//! - **Security**: Session cookie authentication scheme
//!
//! Content collection routes are generic over the entry type and registered
//! at runtime, so they are not part of the document.

use crate::inbound::http::admin_messages::{InboxResponse, MutationResponse};
use crate::inbound::http::auth::{LoginRequest, SessionResponse};
use crate::inbound::http::contact::ContactResponse;
use crate::inbound::http::schemas::{
    ContactFormSchema, ContactMessageSchema, ErrorCodeSchema, ErrorSchema, MessageStatusSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Portfolio backend API",
        description = "Contact form intake, administrator inbox and portfolio content.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::contact::submit_contact,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::admin_messages::list_messages,
        crate::inbound::http::admin_messages::mark_message_read,
        crate::inbound::http::admin_messages::delete_message,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ContactFormSchema,
        ContactMessageSchema,
        MessageStatusSchema,
        ContactResponse,
        LoginRequest,
        SessionResponse,
        InboxResponse,
        MutationResponse
    )),
    tags(
        (name = "contact", description = "Public contact form"),
        (name = "auth", description = "Administrator session"),
        (name = "admin", description = "Administrator inbox"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
