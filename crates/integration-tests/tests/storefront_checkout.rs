//! Integration tests for the cart and checkout flow.

use axum::http::StatusCode;
use serde_json::json;
use sportsgear_core::Price;
use sportsgear_integration_tests::TestApp;

const SHIPPING_FIELDS: &[(&str, &str)] = &[
    ("first_name", "Ada"),
    ("last_name", "Lovelace"),
    ("email", "ada@example.com"),
    ("address", "12 Analytical Way"),
    ("city", "London"),
    ("postal_code", "N1 9GU"),
    ("phone", "555-0100"),
    ("shipping_method", "standard"),
];

const PAYMENT_FIELDS: &[(&str, &str)] = &[
    ("card_holder", "Ada L"),
    ("card_number", "4242 4242 4242 4242"),
    ("expiry", "12/29"),
    ("cvc", "123"),
];

/// Dumbbells (24 kg) and a kettlebell (16 kg): 40 kg, the $30 standard tier.
async fn app_with_heavy_cart() -> TestApp {
    let mut app = TestApp::new();
    for id in ["5", "6"] {
        let resp = app.post_form("/cart/add", &[("product_id", id)]).await;
        assert_eq!(resp.status, StatusCode::OK);
    }
    app
}

fn price(value: &serde_json::Value) -> Price {
    serde_json::from_value(value.clone()).expect("price should deserialize")
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_add_to_cart_returns_count_fragment() {
    let mut app = TestApp::new();

    let resp = app.post_form("/cart/add", &[("product_id", "1")]).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.headers.get("HX-Trigger").and_then(|v| v.to_str().ok()),
        Some("cart-updated")
    );
    assert!(resp.body.contains(r#"id="cart-count""#));
    assert!(resp.body.contains(">1<"));

    let resp = app.post_form("/cart/add", &[("product_id", "1")]).await;
    assert!(resp.body.contains(">2<"));
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let mut app = TestApp::new();
    let resp = app.post_form("/cart/add", &[("product_id", "999")]).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cart_page_lists_items_and_subtotal() {
    let mut app = app_with_heavy_cart().await;

    let resp = app.get("/cart").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Adjustable Dumbbell Set"));
    assert!(resp.body.contains("Competition Kettlebell 16 kg"));
    assert!(resp.body.contains("$279.98"));
}

#[tokio::test]
async fn test_remove_from_cart() {
    let mut app = app_with_heavy_cart().await;

    let resp = app.post_form("/cart/remove", &[("product_id", "5")]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/cart"));

    let resp = app.get("/cart").await;
    assert!(!resp.body.contains("Adjustable Dumbbell Set"));
    assert!(resp.body.contains("$79.99"));
}

// =============================================================================
// Checkout Steps
// =============================================================================

#[tokio::test]
async fn test_checkout_with_empty_cart_goes_back_to_cart() {
    let mut app = TestApp::new();

    let resp = app.post_form("/checkout", &[]).await;
    assert_eq!(resp.location(), Some("/cart"));

    let resp = app.get("/checkout").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/cart"));
}

#[tokio::test]
async fn test_full_checkout_flow() {
    let mut app = app_with_heavy_cart().await;

    let resp = app.post_form("/checkout", &[]).await;
    assert_eq!(resp.location(), Some("/checkout"));

    // Shipping
    let resp = app.get("/checkout").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Shipping information"));
    assert!(resp.body.contains("$30.00"));
    assert!(resp.body.contains("$309.98"));
    assert!(!resp.body.contains(">Back<"));

    let resp = app.post_form("/checkout/continue", SHIPPING_FIELDS).await;
    assert_eq!(resp.location(), Some("/checkout"));

    // Payment
    let resp = app.get("/checkout").await;
    assert!(resp.body.contains("Payment details"));
    assert!(resp.body.contains(">Back<"));

    let resp = app.post_form("/checkout/continue", PAYMENT_FIELDS).await;
    assert_eq!(resp.location(), Some("/checkout"));

    // Review
    let resp = app.get("/checkout").await;
    assert!(resp.body.contains("Review your order"));
    assert!(resp.body.contains("Card ending in 4242"));
    assert!(resp.body.contains("12 Analytical Way"));
    assert!(resp.body.contains("Place Order"));

    let resp = app.post_form("/checkout/continue", &[]).await;
    assert_eq!(resp.location(), Some("/order-confirmation"));

    // Confirmation
    let resp = app.get("/order-confirmation").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Thank you for your order!"));
    assert!(resp.body.contains("Order SG-"));
    assert!(resp.body.contains("Ada Lovelace"));
    assert!(resp.body.contains("Standard shipping"));
    assert!(resp.body.contains("$309.98"));
    assert!(!resp.body.contains("4242"));

    // Reload
    let resp = app.get("/order-confirmation").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.body.contains("Order not found"));

    // The checkout and the cart are gone.
    let resp = app.get("/checkout").await;
    assert_eq!(resp.location(), Some("/cart"));
    let resp = app.get("/cart").await;
    assert!(resp.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_back_keeps_entered_details() {
    let mut app = app_with_heavy_cart().await;
    app.post_form("/checkout", &[]).await;
    app.post_form("/checkout/continue", SHIPPING_FIELDS).await;

    let resp = app.post_form("/checkout/back", PAYMENT_FIELDS).await;
    assert_eq!(resp.location(), Some("/checkout"));

    let resp = app.get("/checkout").await;
    assert!(resp.body.contains("Shipping information"));
    assert!(resp.body.contains(r#"value="Ada""#));
    assert!(resp.body.contains(r#"value="London""#));

    app.post_form("/checkout/continue", SHIPPING_FIELDS).await;
    let resp = app.get("/checkout").await;
    assert!(resp.body.contains(r#"value="Ada L""#));
    assert!(resp.body.contains(r#"value="12/29""#));
}

#[tokio::test]
async fn test_back_on_first_step_stays() {
    let mut app = app_with_heavy_cart().await;
    app.post_form("/checkout", &[]).await;

    let resp = app.post_form("/checkout/back", SHIPPING_FIELDS).await;
    assert_eq!(resp.location(), Some("/checkout"));

    let resp = app.get("/checkout").await;
    assert!(resp.body.contains("Shipping information"));
    assert!(resp.body.contains(r#"value="Lovelace""#));
}

#[tokio::test]
async fn test_continue_without_fields_still_advances() {
    let mut app = app_with_heavy_cart().await;
    app.post_form("/checkout", &[]).await;

    app.post_form("/checkout/continue", &[]).await;
    app.post_form("/checkout/continue", &[]).await;
    let resp = app.post_form("/checkout/continue", &[]).await;
    assert_eq!(resp.location(), Some("/order-confirmation"));
}

#[tokio::test]
async fn test_shipping_method_fragment() {
    let mut app = app_with_heavy_cart().await;
    app.post_form("/checkout", &[]).await;

    let resp = app
        .post_form("/checkout/shipping-method", &[("shipping_method", "express")])
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"id="order-summary""#));
    assert!(resp.body.contains("Express"));
    assert!(resp.body.contains("$25.00"));
    assert!(resp.body.contains("$304.98"));

    // The choice persists into the step page.
    let resp = app.get("/checkout").await;
    assert!(resp.body.contains("$304.98"));
}

#[tokio::test]
async fn test_shipping_method_without_checkout() {
    let mut app = TestApp::new();
    let resp = app
        .post_form("/checkout/shipping-method", &[("shipping_method", "express")])
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// JSON Payloads
// =============================================================================

#[tokio::test]
async fn test_api_checkout_and_json_confirmation() {
    let mut app = TestApp::new();

    let payload = json!({
        "products": [
            {"id": 1, "name": "Squat Rack", "unitPrice": "20.00", "weight": "80", "imageRef": "rack.jpg"}
        ]
    });
    let resp = app.post_json("/api/checkout", &payload).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.location(), Some("/checkout"));

    let summary = resp.json();
    assert_eq!(summary["step"], "shipping");
    assert_eq!(price(&summary["shippingCost"]), Price::dollars(45));
    assert_eq!(price(&summary["total"]), Price::dollars(65));

    app.post_form("/checkout/continue", SHIPPING_FIELDS).await;
    app.post_form("/checkout/continue", PAYMENT_FIELDS).await;
    app.post_form("/checkout/continue", &[]).await;

    let resp = app.get_json("/order-confirmation").await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    let order = &body["orderDetails"];
    assert_eq!(order["shippingMethod"], "standard");
    assert_eq!(order["customer"]["firstName"], "Ada");
    assert_eq!(order["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(price(&order["total"]), Price::dollars(65));
    assert!(
        order["reference"]
            .as_str()
            .is_some_and(|r| r.starts_with("SG-"))
    );
    assert!(order.get("payment").is_none());

    let resp = app.get_json("/order-confirmation").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.json()["error"], "Order not found");
}

#[tokio::test]
async fn test_api_checkout_unparseable_weight_uses_base_rate() {
    let mut app = TestApp::new();

    let payload = json!({
        "products": [
            {"id": 1, "name": "Anvil", "unitPrice": "100", "weight": "80", "imageRef": ""},
            {"id": 2, "name": "Mystery Box", "unitPrice": "10", "weight": "heavy", "imageRef": ""}
        ]
    });
    let resp = app.post_json("/api/checkout", &payload).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(price(&resp.json()["shippingCost"]), Price::dollars(15));
}

#[tokio::test]
async fn test_api_checkout_reads_unit_suffixed_weights() {
    let mut app = TestApp::new();

    let plate = json!({"id": 1, "name": "Bumper Plate", "unitPrice": "40", "weight": "20kg", "imageRef": ""});
    let payload = json!({ "products": [plate.clone(), plate.clone(), plate.clone(), plate] });
    let resp = app.post_json("/api/checkout", &payload).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(price(&resp.json()["shippingCost"]), Price::dollars(45));
    assert_eq!(price(&resp.json()["total"]), Price::dollars(205));
}

#[tokio::test]
async fn test_api_checkout_rejects_malformed_payload() {
    let mut app = TestApp::new();
    let resp = app.post_json("/api/checkout", &json!({"items": 3})).await;
    assert!(resp.status.is_client_error());
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let mut shopper = app_with_heavy_cart().await;
    shopper.post_form("/checkout", &[]).await;

    let mut other = shopper.new_visitor();
    let resp = other.get("/checkout").await;
    assert_eq!(resp.location(), Some("/cart"));
}
