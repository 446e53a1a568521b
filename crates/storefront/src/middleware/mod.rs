//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (record in span, echo in response)
//! 4. Security headers (CSP, framing, sniffing)
//!
//! The cart cookie is read per handler through the [`CartCookie`] extractor.

pub mod cart_cookie;
pub mod request_id;
pub mod security_headers;

pub use cart_cookie::{CartCookie, cart_set_cookie};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
