//! HTTP middleware stack for the reader.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (propagate or mint `x-request-id`)
//! 4. Security headers (CSP, framing, sniffing)
//! 5. Session layer (tower-sessions with `SQLite` store)
//! 6. Rate limiting on form posts (governor)
//!
//! Identity is resolved per handler by the extractors in [`auth`].

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{OptionalAuth, RequireAdmin, clear_current_user, set_current_user};
pub use rate_limit::form_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{create_session_layer, create_session_store};
