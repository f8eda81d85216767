//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (hero + featured products)
//! GET  /health                 - Health check
//!
//! # Shop
//! GET  /shop                   - Product listing with filter sidebar
//! GET  /shop/products          - Filtered product grid (HTMX fragment)
//! GET  /products/{handle}      - Product detail
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart menu (panel body + badge)
//! POST /cart/add               - Add to cart (returns cart menu, triggers cart-updated)
//!
//! # Checkout
//! GET  /checkout               - Checkout page, or redirect to /shop when the cart is empty
//! POST /checkout               - Submit order (returns result fragment)
//! ```

pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;
pub mod shop;

use axum::{
    Router,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};

use crate::state::AppState;

/// The shop listing page.
pub const SHOP_PATH: &str = "/shop";

/// Create the shop routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shop::index))
        .route("/products", get(shop::products))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/shop", shop_routes())
        .route("/products/{handle}", get(products::show))
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show).post(checkout::submit))
}

/// Whether the request was issued by HTMX.
pub(crate) fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

/// Send the shopper to `path`, using `HX-Redirect` for HTMX requests so the
/// whole page navigates instead of swapping a fragment.
pub(crate) fn redirect(headers: &HeaderMap, path: &'static str) -> Response {
    if is_htmx(headers) {
        let mut response = StatusCode::OK.into_response();
        response
            .headers_mut()
            .insert("hx-redirect", HeaderValue::from_static(path));
        response
    } else {
        Redirect::to(path).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header::LOCATION;

    use super::*;

    #[test]
    fn test_redirect_plain_request() {
        let response = redirect(&HeaderMap::new(), SHOP_PATH);
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/shop");
    }

    #[test]
    fn test_redirect_htmx_request() {
        let mut headers = HeaderMap::new();
        headers.insert("hx-request", HeaderValue::from_static("true"));
        let response = redirect(&headers, SHOP_PATH);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["hx-redirect"], "/shop");
    }
}
