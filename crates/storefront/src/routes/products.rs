//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use sportsgear_core::{LineItem, Product, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use super::cart::cart_count;
use crate::error::Result;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub weight: String,
    pub image: String,
    pub in_stock: bool,
    pub stock: u32,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            category: product.category.label().to_string(),
            description: product.description.clone(),
            price: product.price.display(),
            weight: product.weight.to_string(),
            image: product.image_ref.clone(),
            in_stock: product.in_stock(),
            stock: product.stock,
        }
    }
}

/// Line item display data, shared by cart, checkout and confirmation pages.
#[derive(Clone)]
pub struct LineItemView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub weight: String,
    pub image: String,
}

impl From<&LineItem> for LineItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.as_i32(),
            name: item.name.clone(),
            price: item.unit_price.display(),
            weight: item.weight.to_string(),
            image: item.image_ref.clone(),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductView>,
    pub cart_count: usize,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub cart_count: usize,
}

/// Display product listing page.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let products = state
        .catalog()
        .fetch_products()?
        .iter()
        .map(ProductView::from)
        .collect();

    Ok(ProductsIndexTemplate {
        products,
        cart_count: cart_count(&session).await,
    })
}

/// Display product detail page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let product = state.catalog().fetch_product(ProductId::new(id))?;

    Ok(ProductShowTemplate {
        product: ProductView::from(&product),
        cart_count: cart_count(&session).await,
    })
}
