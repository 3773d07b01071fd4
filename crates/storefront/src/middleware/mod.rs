//! HTTP middleware for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, one hub per request)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with the memory store)
//!
//! Admin authentication is not a layer: admin handlers take the
//! [`RequireAdmin`] extractor.

pub mod auth;
pub mod session;

pub use auth::{OptionalAdmin, RequireAdmin, clear_current_admin, set_current_admin};
pub use session::create_session_layer;
