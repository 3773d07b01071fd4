//! Admin panel route handlers.
//!
//! Every handler takes [`RequireAdmin`], so anonymous visitors are sent to
//! `/admin/login` before any catalog data is read.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use sportsgear_core::{AdminOrder, OrderId, OrderStatus, Price, ProductId};
use tracing::instrument;

use super::products::{LineItemView, ProductView};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Products at or below this stock level are flagged on the dashboard.
const LOW_STOCK_THRESHOLD: u32 = 5;

/// Orders shown in the dashboard's recent list.
const RECENT_ORDER_COUNT: usize = 5;

/// Order row display data.
pub struct OrderView {
    pub id: i32,
    pub customer_name: String,
    pub email: String,
    pub status: String,
    pub status_label: String,
    pub placed_at: String,
    pub item_count: usize,
    pub total: String,
    pub items: Vec<LineItemView>,
}

impl From<&AdminOrder> for OrderView {
    fn from(order: &AdminOrder) -> Self {
        Self {
            id: order.id.as_i32(),
            customer_name: order.customer_name.clone(),
            email: order.email.clone(),
            status: order.status.to_string(),
            status_label: order.status.label().to_string(),
            placed_at: order.placed_at.format("%Y-%m-%d %H:%M").to_string(),
            item_count: order.item_count(),
            total: order.total.display(),
            items: order.items.iter().map(LineItemView::from).collect(),
        }
    }
}

/// Status filter tab.
pub struct StatusFilter {
    pub value: String,
    pub label: String,
    pub active: bool,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub admin_name: String,
    pub product_count: usize,
    pub order_count: usize,
    pub open_order_count: usize,
    pub revenue: String,
    pub low_stock: Vec<ProductView>,
    /// Most recent orders only.
    pub orders: Vec<OrderView>,
}

/// Admin product list template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/products/index.html")]
pub struct ProductsIndexTemplate {
    pub admin_name: String,
    pub products: Vec<ProductView>,
}

/// Admin product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/products/show.html")]
pub struct ProductShowTemplate {
    pub admin_name: String,
    pub product: ProductView,
}

/// Admin order list template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/orders/index.html")]
pub struct OrdersIndexTemplate {
    pub admin_name: String,
    pub orders: Vec<OrderView>,
    pub filters: Vec<StatusFilter>,
}

/// Admin order detail template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/orders/show.html")]
pub struct OrderShowTemplate {
    pub admin_name: String,
    pub order: OrderView,
}

/// Order list query parameters.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
}

/// Admin dashboard.
#[instrument(skip(admin, state))]
pub async fn dashboard(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let products = state.catalog().fetch_products()?;
    let orders = state.catalog().fetch_orders()?;

    let revenue: Price = orders
        .iter()
        .filter(|order| order.status != OrderStatus::Cancelled)
        .map(|order| order.total)
        .sum();

    Ok(DashboardTemplate {
        admin_name: admin.name,
        product_count: products.len(),
        order_count: orders.len(),
        open_order_count: orders.iter().filter(|o| !o.status.is_closed()).count(),
        revenue: revenue.display(),
        low_stock: products
            .iter()
            .filter(|p| p.stock <= LOW_STOCK_THRESHOLD)
            .map(ProductView::from)
            .collect(),
        orders: orders
            .iter()
            .take(RECENT_ORDER_COUNT)
            .map(OrderView::from)
            .collect(),
    })
}

/// Product list.
#[instrument(skip(admin, state))]
pub async fn products(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let products = state.catalog().fetch_products()?;

    Ok(ProductsIndexTemplate {
        admin_name: admin.name,
        products: products.iter().map(ProductView::from).collect(),
    })
}

/// Product detail.
#[instrument(skip(admin, state))]
pub async fn product(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let product = state.catalog().fetch_product(ProductId::new(id))?;

    Ok(ProductShowTemplate {
        admin_name: admin.name,
        product: ProductView::from(&product),
    })
}

/// Order list, optionally filtered by `?status=`.
#[instrument(skip(admin, state))]
pub async fn orders(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<impl IntoResponse> {
    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(raw.parse::<OrderStatus>().map_err(AppError::BadRequest)?),
        None => None,
    };

    let orders = state
        .catalog()
        .fetch_orders()?
        .iter()
        .filter(|order| status.is_none_or(|wanted| order.status == wanted))
        .map(OrderView::from)
        .collect();

    let filters = std::iter::once(StatusFilter {
        value: String::new(),
        label: "All".to_string(),
        active: status.is_none(),
    })
    .chain(OrderStatus::ALL.into_iter().map(|s| StatusFilter {
        value: s.to_string(),
        label: s.label().to_string(),
        active: status == Some(s),
    }))
    .collect();

    Ok(OrdersIndexTemplate {
        admin_name: admin.name,
        orders,
        filters,
    })
}

/// Order detail.
#[instrument(skip(admin, state))]
pub async fn order(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let order = state.catalog().fetch_order(OrderId::new(id))?;

    Ok(OrderShowTemplate {
        admin_name: admin.name,
        order: OrderView::from(&order),
    })
}
