//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the visitor's session; every response re-renders
//! the cart menu from it so the panel and badge never drift apart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use harbor_core::controller::CartController;
use harbor_core::menu::CartMenu;
use harbor_core::{CartItem, Size};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::services::SessionCartStore;
use crate::state::AppState;

/// Event fired on the page whenever the cart changes.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Add to cart form data.
///
/// Only the product handle and the chosen size are read; name, price and
/// image always come from the catalog.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub handle: String,
    pub size: String,
}

/// Cart menu fragment template (for HTMX).
///
/// Renders the panel body plus an out-of-band badge update.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_menu.html")]
pub struct CartMenuTemplate {
    pub menu: CartMenu,
}

/// Display the cart menu (HTMX).
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let controller = CartController::load(SessionCartStore::new(session)).await;

    CartMenuTemplate {
        menu: CartMenu::from(controller.cart()),
    }
}

/// Add item to cart (HTMX).
///
/// Appends one line for the chosen product and size, then returns the fresh
/// cart menu with an HTMX trigger so the page can open the panel.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .get(&form.handle)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.handle)))?;

    let size: Size = form
        .size
        .parse()
        .map_err(|e: harbor_core::SizeError| AppError::BadRequest(e.to_string()))?;
    if !product.offers_size(size) {
        return Err(AppError::BadRequest(format!(
            "{} is not available in size {}",
            product.name,
            size.label()
        )));
    }

    let item = CartItem::new(&product.name, product.price, size, &product.image)
        .map_err(|e| AppError::Internal(format!("catalog product {}: {e}", product.handle)))?;

    let mut controller = CartController::load(SessionCartStore::new(session)).await;
    let cart = controller.add_item(item).await?;

    add_breadcrumb(
        "cart",
        "Added item to cart",
        &[("handle", product.handle.as_str()), ("size", size.as_str())],
    );
    tracing::info!(
        handle = %product.handle,
        size = %size,
        items = cart.len(),
        "Item added to cart"
    );

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartMenuTemplate {
            menu: CartMenu::from(cart),
        },
    )
        .into_response())
}
