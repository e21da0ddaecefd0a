//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod admin_messages;
pub mod auth;
pub mod client_key;
pub mod contact;
pub mod content;
pub mod error;
pub mod guard;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api/v1` endpoint on the enclosing scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(contact::configure)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::current_session)
        .service(admin_messages::list_messages)
        .service(admin_messages::mark_message_read)
        .service(admin_messages::delete_message)
        .configure(content::configure);
}
