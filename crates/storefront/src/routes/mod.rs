//! HTTP route handlers for the storefront and admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                            - Redirect to /products
//! GET  /health                      - Health check
//!
//! # Products
//! GET  /products                    - Product listing
//! GET  /products/{id}               - Product detail
//!
//! # Cart
//! GET  /cart                        - Cart page
//! POST /cart/add                    - Add product (returns count fragment, triggers cart-updated)
//! POST /cart/remove                 - Remove one product, back to /cart
//!
//! # Checkout
//! POST /checkout                    - Start checkout from the cart
//! POST /api/checkout                - Start checkout from JSON { products }
//! GET  /checkout                    - Current step
//! POST /checkout/continue           - Merge fields, advance or place order
//! POST /checkout/back               - Merge fields, go back
//! POST /checkout/shipping-method    - Switch method (returns summary fragment)
//! GET  /order-confirmation          - Placed order, shown once
//!
//! # Signup
//! GET  /signup                      - Current step
//! POST /signup/continue             - Merge fields, advance or submit
//! POST /signup/back                 - Merge fields, go back
//! POST /signup/password-strength    - Strength meter fragment
//! GET  /login                       - Shopper sign-in page
//!
//! # Admin (requires admin session)
//! GET  /admin/login, POST /admin/login, POST /admin/logout
//! GET  /admin                       - Dashboard
//! GET  /admin/products              - Product list
//! GET  /admin/products/{id}         - Product detail
//! GET  /admin/orders                - Order list (?status=)
//! GET  /admin/orders/{id}           - Order detail
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod products;
pub mod signup;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::create_session_layer;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show).post(checkout::start))
        .route("/continue", post(checkout::advance))
        .route("/back", post(checkout::back))
        .route("/shipping-method", post(checkout::shipping_method))
}

/// Create the signup routes router.
pub fn signup_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(signup::show))
        .route("/continue", post(signup::advance))
        .route("/back", post(signup::back))
        .route("/password-strength", post(signup::password_strength))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/products", get(admin::products))
        .route("/products/{id}", get(admin::product))
        .route("/orders", get(admin::orders))
        .route("/orders/{id}", get(admin::order))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/products") }))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .route("/api/checkout", post(checkout::start_api))
        .route("/order-confirmation", get(checkout::confirmation))
        .nest("/signup", signup_routes())
        .route("/login", get(auth::sign_in_page))
        .nest("/admin", admin_routes())
}

/// Build the complete application router.
///
/// Includes the health check, static files, sessions and request tracing.
/// Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service(
            "/static",
            ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        )
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}
