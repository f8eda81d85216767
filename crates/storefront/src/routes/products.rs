//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use harbor_core::{CurrencyCode, Price};
use tracing::instrument;

use crate::catalog::Product;
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Size choice display data for templates.
#[derive(Clone, Debug)]
pub struct SizeOptionView {
    pub value: &'static str,
    pub label: &'static str,
}

/// Product display data for templates.
#[derive(Clone, Debug)]
pub struct ProductView {
    pub handle: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: Option<String>,
    pub category: String,
    pub collection: String,
    pub sizes: Vec<SizeOptionView>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            handle: product.handle.clone(),
            name: product.name.clone(),
            price: Price::new(product.price, CurrencyCode::default()).display(),
            image: product.image.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            collection: product.collection.clone(),
            sizes: product
                .sizes
                .iter()
                .map(|size| SizeOptionView {
                    value: size.as_str(),
                    label: size.label(),
                })
                .collect(),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse> {
    let product = state
        .catalog()
        .get(&handle)
        .ok_or_else(|| AppError::NotFound(format!("product {handle}")))?;

    Ok(ProductShowTemplate {
        product: ProductView::from(product),
    })
}
