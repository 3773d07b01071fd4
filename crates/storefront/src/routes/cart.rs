//! Cart route handlers.
//!
//! The cart is a list of product IDs held in the session. Adding returns the
//! count badge fragment for HTMX; removing redirects back to the cart page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use sportsgear_core::{LineItem, ProductId, line_item};
use tower_sessions::Session;
use tracing::instrument;

use super::products::LineItemView;
use crate::error::{Result, add_breadcrumb};
use crate::models::{Cart, session_keys};
use crate::state::AppState;

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub items: Vec<LineItemView>,
    pub subtotal: String,
    pub cart_count: usize,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: usize,
}

/// Add to / remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub product_id: i32,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart from the session, empty if none.
pub async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Number of items in the session cart.
pub async fn cart_count(session: &Session) -> usize {
    load_cart(session).await.len()
}

/// Resolve the cart's product IDs against the catalog.
///
/// # Errors
///
/// Returns an error if a product in the cart is no longer in the catalog.
pub fn cart_items(state: &AppState, cart: &Cart) -> Result<Vec<LineItem>> {
    cart.product_ids()
        .iter()
        .map(|id| {
            state
                .catalog()
                .fetch_product(*id)
                .map(|product| LineItem::from(&product))
                .map_err(Into::into)
        })
        .collect()
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await;
    let items = cart_items(&state, &cart)?;

    Ok(CartShowTemplate {
        subtotal: line_item::subtotal(&items).display(),
        items: items.iter().map(LineItemView::from).collect(),
        cart_count: cart.len(),
    })
}

/// Add a product to the cart (HTMX).
///
/// Returns the updated count badge with a `cart-updated` trigger.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartItemForm>,
) -> Result<Response> {
    let product = state.catalog().fetch_product(ProductId::new(form.product_id))?;

    let mut cart = load_cart(&session).await;
    cart.add(product.id);
    session.insert(session_keys::CART, &cart).await?;

    let product_id = product.id.to_string();
    add_breadcrumb("cart", "Added product", Some(&[("product_id", product_id.as_str())]));

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate { count: cart.len() },
    )
        .into_response())
}

/// Remove one unit of a product from the cart.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<CartItemForm>) -> Result<Redirect> {
    let mut cart = load_cart(&session).await;
    if cart.remove_one(ProductId::new(form.product_id)) {
        session.insert(session_keys::CART, &cart).await?;
    }

    Ok(Redirect::to("/cart"))
}
