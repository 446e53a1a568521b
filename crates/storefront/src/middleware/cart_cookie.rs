//! Cart cookie extractor and writer.
//!
//! The cart lives entirely in the browser as the `cart` cookie. This module is
//! the HTTP edge of the cookie adapter in [`shopfront_core::Cart`]: it pulls
//! the raw value out of the `Cookie` header and formats `Set-Cookie`.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{
        HeaderValue,
        header::{COOKIE, InvalidHeaderValue},
        request::Parts,
    },
};
use shopfront_core::{CART_COOKIE_NAME, Cart};

/// The cart stored in the request's cookies.
///
/// A missing or unreadable cookie yields an empty cart; extraction never
/// rejects.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CartCookie(cart): CartCookie) -> impl IntoResponse {
///     format!("{} items", cart.len())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CartCookie(pub Cart);

impl<S> FromRequestParts<S> for CartCookie
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cart = find_cookie(parts, CART_COOKIE_NAME)
            .map(Cart::from_cookie_value)
            .unwrap_or_default();

        Ok(Self(cart))
    }
}

/// Find a cookie value by name across all `Cookie` headers.
fn find_cookie<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"'))
}

/// Build the `Set-Cookie` value that stores `cart`.
///
/// # Errors
///
/// Returns an error if the encoded cart is not a valid header value.
pub fn cart_set_cookie(cart: &Cart) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{CART_COOKIE_NAME}={}; Path=/; SameSite=Lax",
        cart.to_cookie_value()
    ))
}
