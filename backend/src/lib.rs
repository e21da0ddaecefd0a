//! Portfolio backend library modules.
//!
//! The crate is organised as a hexagon: [`domain`] holds entities, validation,
//! services and ports; [`inbound`] adapts HTTP requests onto domain ports; and
//! [`outbound`] provides persistence, caching and metrics adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
