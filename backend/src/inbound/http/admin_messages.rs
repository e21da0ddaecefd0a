//! Administrator inbox handlers.
//!
//! ```text
//! GET /api/v1/admin/messages
//! POST /api/v1/admin/messages/{id}/read
//! DELETE /api/v1/admin/messages/{id}
//! ```
//!
//! Every handler takes [`AdminGuard`], so requests without an administrator
//! session are rejected with `401` before the inbox is touched.

use actix_web::{delete, get, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ContactMessage, unread_count};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guard::AdminGuard;
use crate::inbound::http::schemas::{ContactMessageSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_message_id;

/// Inbox listing returned to the dashboard.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InboxResponse {
    /// Messages, newest first.
    #[schema(value_type = Vec<ContactMessageSchema>)]
    pub messages: Vec<ContactMessage>,
    /// Messages still pending review.
    pub unread_count: usize,
}

/// Acknowledgement returned by inbox mutations.
#[derive(Debug, Serialize, ToSchema)]
pub struct MutationResponse {
    /// Always `true`; failures are reported as errors instead.
    pub success: bool,
}

impl MutationResponse {
    pub(crate) fn ok() -> web::Json<Self> {
        web::Json(Self { success: true })
    }
}

/// List every contact message.
#[utoipa::path(
    get,
    path = "/api/v1/admin/messages",
    responses(
        (status = 200, description = "Inbox", body = InboxResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listMessages"
)]
#[get("/admin/messages")]
pub async fn list_messages(
    state: web::Data<HttpState>,
    guard: AdminGuard,
) -> ApiResult<web::Json<InboxResponse>> {
    let messages = state.inbox_query.list_messages(guard.admin()).await?;
    let unread_count = unread_count(&messages);
    Ok(web::Json(InboxResponse {
        messages,
        unread_count,
    }))
}

/// Mark a message as read.
#[utoipa::path(
    post,
    path = "/api/v1/admin/messages/{id}/read",
    params(("id" = String, Path, description = "Message identifier")),
    responses(
        (status = 200, description = "Marked read", body = MutationResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown message", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "markMessageRead"
)]
#[post("/admin/messages/{id}/read")]
pub async fn mark_message_read(
    state: web::Data<HttpState>,
    guard: AdminGuard,
    path: web::Path<String>,
) -> ApiResult<web::Json<MutationResponse>> {
    let id = parse_message_id(&path)?;
    state.inbox.mark_read(guard.admin(), &id).await?;
    Ok(MutationResponse::ok())
}

/// Permanently delete a message.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/messages/{id}",
    params(("id" = String, Path, description = "Message identifier")),
    responses(
        (status = 200, description = "Deleted", body = MutationResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown message", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "deleteMessage"
)]
#[delete("/admin/messages/{id}")]
pub async fn delete_message(
    state: web::Data<HttpState>,
    guard: AdminGuard,
    path: web::Path<String>,
) -> ApiResult<web::Json<MutationResponse>> {
    let id = parse_message_id(&path)?;
    state.inbox.delete_message(guard.admin(), &id).await?;
    Ok(MutationResponse::ok())
}
