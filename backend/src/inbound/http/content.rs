//! Portfolio content handlers shared by every collection.
//!
//! ```text
//! GET /api/v1/{kind}
//! POST /api/v1/admin/{kind}
//! PUT /api/v1/admin/{kind}/{id}
//! DELETE /api/v1/admin/{kind}/{id}
//! ```
//!
//! `{kind}` is one of `projects`, `skills`, `experiences` or `certificates`.
//! Handlers are generic over [`ContentCollection`] and registered once per
//! collection by [`configure_collection`].

use actix_web::{HttpResponse, web};

use crate::domain::portfolio::{Certificate, Entry, Experience, PortfolioEntry, Project, Skill};
use crate::inbound::http::ApiResult;
use crate::inbound::http::admin_messages::MutationResponse;
use crate::inbound::http::guard::AdminGuard;
use crate::inbound::http::state::{ContentCollection, HttpState};
use crate::inbound::http::validation::parse_entry_id;

/// Public listing in display order.
pub async fn list_entries<T: ContentCollection>(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Entry<T>>>> {
    let entries = T::ports(&state).query.list().await?;
    Ok(web::Json(entries))
}

/// Validate a draft and store it as a new entry.
pub async fn create_entry<T: ContentCollection>(
    state: web::Data<HttpState>,
    guard: AdminGuard,
    payload: web::Json<<T as PortfolioEntry>::Form>,
) -> ApiResult<HttpResponse> {
    let entry = T::ports(&state)
        .command
        .create(guard.admin(), &payload)
        .await?;
    Ok(HttpResponse::Created().json(entry))
}

/// Validate a draft and replace an existing entry.
pub async fn update_entry<T: ContentCollection>(
    state: web::Data<HttpState>,
    guard: AdminGuard,
    path: web::Path<String>,
    payload: web::Json<<T as PortfolioEntry>::Form>,
) -> ApiResult<web::Json<Entry<T>>> {
    let id = parse_entry_id(&path)?;
    let entry = T::ports(&state)
        .command
        .update(guard.admin(), &id, &payload)
        .await?;
    Ok(web::Json(entry))
}

/// Remove an entry.
pub async fn delete_entry<T: ContentCollection>(
    state: web::Data<HttpState>,
    guard: AdminGuard,
    path: web::Path<String>,
) -> ApiResult<web::Json<MutationResponse>> {
    let id = parse_entry_id(&path)?;
    T::ports(&state).command.delete(guard.admin(), &id).await?;
    Ok(MutationResponse::ok())
}

/// Register the public and admin routes of one collection.
pub fn configure_collection<T: ContentCollection>(cfg: &mut web::ServiceConfig) {
    let kind = T::KIND.as_str();
    cfg.service(web::resource(format!("/{kind}")).route(web::get().to(list_entries::<T>)))
        .service(
            web::resource(format!("/admin/{kind}")).route(web::post().to(create_entry::<T>)),
        )
        .service(
            web::resource(format!("/admin/{kind}/{{id}}"))
                .route(web::put().to(update_entry::<T>))
                .route(web::delete().to(delete_entry::<T>)),
        );
}

/// Register every content collection.
pub fn configure(cfg: &mut web::ServiceConfig) {
    configure_collection::<Project>(cfg);
    configure_collection::<Skill>(cfg);
    configure_collection::<Experience>(cfg);
    configure_collection::<Certificate>(cfg);
}
