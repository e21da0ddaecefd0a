//! Request middleware.
//!
//! Request correlation lives here; session handling is configured in the
//! server module.

pub mod trace;

pub use trace::Trace;
