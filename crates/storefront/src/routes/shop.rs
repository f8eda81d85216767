//! Shop listing and product filter handlers.
//!
//! Every product card is always rendered in catalog order; the filter only
//! toggles the `hidden` attribute. Filter checkboxes submit with HTMX on
//! every change and the grid fragment is swapped in place.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{RawQuery, State},
    response::IntoResponse,
};
use harbor_core::filter::{FilterDimension, FilterSelection};
use harbor_core::{CurrencyCode, Price};
use tracing::instrument;

use crate::catalog::{Catalog, Product};
use crate::filters;
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone, Debug)]
pub struct ProductCardView {
    pub handle: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub collection: String,
    pub visible: bool,
}

impl ProductCardView {
    #[must_use]
    pub fn new(product: &Product, visible: bool) -> Self {
        Self {
            handle: product.handle.clone(),
            name: product.name.clone(),
            price: Price::new(product.price, CurrencyCode::default()).display(),
            image: product.image.clone(),
            category: product.category.clone(),
            collection: product.collection.clone(),
            visible,
        }
    }
}

/// One checkbox in the filter sidebar.
#[derive(Clone, Debug)]
pub struct FilterOptionView {
    pub name: &'static str,
    pub value: String,
    pub checked: bool,
}

/// Shop listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/index.html")]
pub struct ShopTemplate {
    pub categories: Vec<FilterOptionView>,
    pub collections: Vec<FilterOptionView>,
    pub products: Vec<ProductCardView>,
    pub visible_count: usize,
}

/// Product grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub products: Vec<ProductCardView>,
    pub visible_count: usize,
}

/// Parse the filter selection from a raw query string.
fn selection_from_query(query: Option<&str>) -> FilterSelection {
    query.map_or_else(FilterSelection::new, |q| {
        FilterSelection::from_pairs(url::form_urlencoded::parse(q.as_bytes()))
    })
}

/// Every catalog product with its visibility under `selection`.
#[must_use]
pub fn product_cards(catalog: &Catalog, selection: &FilterSelection) -> Vec<ProductCardView> {
    catalog
        .products()
        .iter()
        .map(|product| ProductCardView::new(product, selection.matches(product)))
        .collect()
}

fn filter_options(
    values: Vec<&str>,
    dimension: FilterDimension,
    selection: &FilterSelection,
) -> Vec<FilterOptionView> {
    values
        .into_iter()
        .map(|value| FilterOptionView {
            name: dimension.as_str(),
            value: value.to_string(),
            checked: selection.is_selected(dimension, value),
        })
        .collect()
}

fn visible_count(cards: &[ProductCardView]) -> usize {
    cards.iter().filter(|card| card.visible).count()
}

/// Display the shop listing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, RawQuery(query): RawQuery) -> impl IntoResponse {
    let selection = selection_from_query(query.as_deref());
    let catalog = state.catalog();
    let products = product_cards(catalog, &selection);

    ShopTemplate {
        categories: filter_options(catalog.categories(), FilterDimension::Category, &selection),
        collections: filter_options(
            catalog.collections(),
            FilterDimension::Collection,
            &selection,
        ),
        visible_count: visible_count(&products),
        products,
    }
}

/// Filtered product grid (HTMX).
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let selection = selection_from_query(query.as_deref());
    let products = product_cards(state.catalog(), &selection);

    ProductGridTemplate {
        visible_count: visible_count(&products),
        products,
    }
}
