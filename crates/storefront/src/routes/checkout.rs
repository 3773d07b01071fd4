//! Checkout route handlers.
//!
//! The in-progress [`CheckoutWizard`] lives in the session. Every form post
//! first merges the current step's fields, then moves the wizard. Placing
//! the order swaps the wizard for a one-shot [`OrderConfirmation`] that the
//! confirmation page takes out of the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use sportsgear_core::line_item::total_weight;
use sportsgear_core::shipping::cost_for_weight;
use sportsgear_core::wizard::{StepMarker, step_markers};
use sportsgear_core::{
    CheckoutAdvance, CheckoutPayload, CheckoutStep, CheckoutWizard, CustomerDetails, Order,
    OrderConfirmation, PaymentDetails, Price, ShippingMethod, StepEntry, WizardStep,
};
use tower_sessions::Session;
use tracing::instrument;

use super::cart::{cart_items, load_cart};
use super::products::LineItemView;
use crate::error::{Result, add_breadcrumb};
use crate::models::{Cart, session_keys};
use crate::state::AppState;

// =============================================================================
// View Models
// =============================================================================

/// Shipping method radio option.
pub struct MethodOption {
    pub value: String,
    pub label: String,
    pub price: String,
    pub selected: bool,
}

/// Order summary shown beside every checkout step.
pub struct SummaryView {
    pub items: Vec<LineItemView>,
    pub total_weight: String,
    pub method: String,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
}

impl From<&CheckoutWizard> for SummaryView {
    fn from(wizard: &CheckoutWizard) -> Self {
        Self {
            items: wizard.items().iter().map(LineItemView::from).collect(),
            total_weight: total_weight(wizard.items()).to_string(),
            method: wizard.shipping_method().label().to_string(),
            subtotal: wizard.subtotal().display(),
            shipping: wizard.shipping_cost().display(),
            total: wizard.total().display(),
        }
    }
}

/// Card fields echoed back into the Payment form.
pub struct PaymentView {
    pub card_holder: String,
    pub card_number: String,
    pub expiry: String,
    pub cvc: String,
    pub last_four: String,
}

impl From<&PaymentDetails> for PaymentView {
    fn from(payment: &PaymentDetails) -> Self {
        Self {
            card_holder: payment.card_holder.clone(),
            card_number: payment.card_number.clone(),
            expiry: payment.expiry.clone(),
            cvc: payment.cvc.clone(),
            last_four: payment.last_four().unwrap_or_default(),
        }
    }
}

/// Placed order display data.
pub struct OrderView {
    pub reference: String,
    pub items: Vec<LineItemView>,
    pub customer_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub method: String,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            reference: order.reference.clone(),
            items: order.items.iter().map(LineItemView::from).collect(),
            customer_name: order.customer.full_name(),
            email: order.customer.email.clone(),
            address: order.customer.address.clone(),
            city: order.customer.city.clone(),
            postal_code: order.customer.postal_code.clone(),
            method: order.shipping_method.label().to_string(),
            subtotal: order.subtotal.display(),
            shipping: order.shipping_cost.display(),
            total: order.total.display(),
        }
    }
}

/// Checkout step page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/step.html")]
pub struct CheckoutTemplate {
    pub markers: Vec<StepMarker>,
    pub step_title: String,
    pub is_shipping: bool,
    pub is_payment: bool,
    pub is_review: bool,
    pub can_go_back: bool,
    pub continue_label: String,
    pub customer: CustomerDetails,
    pub payment: PaymentView,
    pub methods: Vec<MethodOption>,
    pub summary: SummaryView,
    pub cart_count: usize,
}

/// Order summary fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/order_summary.html")]
pub struct OrderSummaryTemplate {
    pub summary: SummaryView,
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate {
    pub order: Option<OrderView>,
    pub cart_count: usize,
}

/// JSON response for a checkout started through the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub step: CheckoutStep,
    pub shipping_method: ShippingMethod,
    pub subtotal: Price,
    pub shipping_cost: Price,
    pub total: Price,
}

impl From<&CheckoutWizard> for CheckoutSummary {
    fn from(wizard: &CheckoutWizard) -> Self {
        Self {
            step: wizard.step(),
            shipping_method: wizard.shipping_method(),
            subtotal: wizard.subtotal(),
            shipping_cost: wizard.shipping_cost(),
            total: wizard.total(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Fields posted by any checkout step. Absent fields are empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub phone: String,
    pub shipping_method: Option<ShippingMethod>,
    pub card_holder: String,
    pub card_number: String,
    pub expiry: String,
    pub cvc: String,
}

impl CheckoutForm {
    /// Interpret the posted fields as an entry for `wizard`'s current step.
    fn into_entry(self, wizard: &CheckoutWizard) -> StepEntry {
        match wizard.step() {
            CheckoutStep::Shipping => StepEntry::Shipping {
                customer: CustomerDetails {
                    first_name: self.first_name,
                    last_name: self.last_name,
                    email: self.email,
                    address: self.address,
                    city: self.city,
                    postal_code: self.postal_code,
                    phone: self.phone,
                },
                method: self
                    .shipping_method
                    .unwrap_or_else(|| wizard.shipping_method()),
            },
            CheckoutStep::Payment => StepEntry::Payment(PaymentDetails {
                card_holder: self.card_holder,
                card_number: self.card_number,
                expiry: self.expiry,
                cvc: self.cvc,
            }),
            CheckoutStep::Review => StepEntry::Review,
        }
    }
}

/// Shipping method switch form data.
#[derive(Debug, Deserialize)]
pub struct ShippingMethodForm {
    pub shipping_method: ShippingMethod,
}

// =============================================================================
// Session Helpers
// =============================================================================

async fn load_checkout(session: &Session) -> Result<Option<CheckoutWizard>> {
    Ok(session.get::<CheckoutWizard>(session_keys::CHECKOUT).await?)
}

async fn save_checkout(session: &Session, wizard: &CheckoutWizard) -> Result<()> {
    Ok(session.insert(session_keys::CHECKOUT, wizard).await?)
}

fn method_options(wizard: &CheckoutWizard) -> Vec<MethodOption> {
    let weight = total_weight(wizard.items());
    [ShippingMethod::Standard, ShippingMethod::Express]
        .into_iter()
        .map(|method| MethodOption {
            value: method.to_string(),
            label: method.label().to_string(),
            price: cost_for_weight(weight, method).display(),
            selected: method == wizard.shipping_method(),
        })
        .collect()
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}

// =============================================================================
// Handlers
// =============================================================================

/// Start a checkout from the session cart.
#[instrument(skip(state, session))]
pub async fn start(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let cart = load_cart(&session).await;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart"));
    }

    let products = cart_items(&state, &cart)?;
    let wizard = CheckoutWizard::start(CheckoutPayload { products });
    save_checkout(&session, &wizard).await?;

    add_breadcrumb("checkout", "Started checkout", None);
    Ok(Redirect::to("/checkout"))
}

/// Start a checkout from a JSON `{ "products": [...] }` payload.
#[instrument(skip(session, payload))]
pub async fn start_api(session: Session, Json(payload): Json<CheckoutPayload>) -> Result<Response> {
    let wizard = CheckoutWizard::start(payload);
    save_checkout(&session, &wizard).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, "/checkout")],
        Json(CheckoutSummary::from(&wizard)),
    )
        .into_response())
}

/// Display the current checkout step.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Response> {
    let Some(wizard) = load_checkout(&session).await? else {
        return Ok(Redirect::to("/cart").into_response());
    };

    let step = wizard.step();
    Ok(CheckoutTemplate {
        markers: step_markers(step),
        step_title: step.title().to_string(),
        is_shipping: step == CheckoutStep::Shipping,
        is_payment: step == CheckoutStep::Payment,
        is_review: step == CheckoutStep::Review,
        can_go_back: step.previous().is_some(),
        continue_label: if step.is_last() {
            "Place Order".to_string()
        } else {
            "Continue".to_string()
        },
        customer: wizard.customer().clone(),
        payment: PaymentView::from(wizard.payment()),
        methods: method_options(&wizard),
        summary: SummaryView::from(&wizard),
        cart_count: load_cart(&session).await.len(),
    }
    .into_response())
}

/// Merge the posted fields and continue; from Review this places the order.
#[instrument(skip(session, form))]
pub async fn advance(session: Session, Form(form): Form<CheckoutForm>) -> Result<Redirect> {
    let Some(mut wizard) = load_checkout(&session).await? else {
        return Ok(Redirect::to("/cart"));
    };

    let entry = form.into_entry(&wizard);
    wizard.record(entry);

    match wizard.advance() {
        CheckoutAdvance::Moved(wizard) => {
            save_checkout(&session, &wizard).await?;
            Ok(Redirect::to("/checkout"))
        }
        CheckoutAdvance::Placed(order) => {
            session
                .remove::<CheckoutWizard>(session_keys::CHECKOUT)
                .await?;
            session.remove::<Cart>(session_keys::CART).await?;

            tracing::info!(
                reference = %order.reference,
                total = %order.total,
                shipping_method = %order.shipping_method,
                "Order placed"
            );
            add_breadcrumb(
                "checkout",
                "Placed order",
                Some(&[("reference", order.reference.as_str())]),
            );

            session
                .insert(
                    session_keys::PLACED_ORDER,
                    OrderConfirmation {
                        order_details: order,
                    },
                )
                .await?;
            Ok(Redirect::to("/order-confirmation"))
        }
    }
}

/// Merge the posted fields and go back one step.
#[instrument(skip(session, form))]
pub async fn back(session: Session, Form(form): Form<CheckoutForm>) -> Result<Redirect> {
    let Some(mut wizard) = load_checkout(&session).await? else {
        return Ok(Redirect::to("/cart"));
    };

    let entry = form.into_entry(&wizard);
    wizard.record(entry);
    wizard.back();
    save_checkout(&session, &wizard).await?;

    Ok(Redirect::to("/checkout"))
}

/// Switch the shipping method and return the refreshed summary (HTMX).
#[instrument(skip(session))]
pub async fn shipping_method(
    session: Session,
    Form(form): Form<ShippingMethodForm>,
) -> Result<Response> {
    let Some(mut wizard) = load_checkout(&session).await? else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    wizard.set_shipping_method(form.shipping_method);
    save_checkout(&session, &wizard).await?;

    Ok(OrderSummaryTemplate {
        summary: SummaryView::from(&wizard),
    }
    .into_response())
}

/// Show the placed order once.
///
/// The confirmation is taken out of the session, so a reload renders
/// "Order not found". Clients sending `Accept: application/json` get the
/// `{ "orderDetails": ... }` payload instead of HTML.
#[instrument(skip(session, headers))]
pub async fn confirmation(session: Session, headers: HeaderMap) -> Result<Response> {
    let placed = session
        .remove::<OrderConfirmation>(session_keys::PLACED_ORDER)
        .await?;

    if wants_json(&headers) {
        return Ok(match placed {
            Some(confirmation) => Json(confirmation).into_response(),
            None => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "Order not found" })),
            )
                .into_response(),
        });
    }

    let status = if placed.is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    let template = ConfirmationTemplate {
        order: placed.as_ref().map(|c| OrderView::from(&c.order_details)),
        cart_count: load_cart(&session).await.len(),
    };

    Ok((status, template).into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sportsgear_core::{LineItem, ProductId, Weight};

    use super::*;

    fn wizard() -> CheckoutWizard {
        CheckoutWizard::start(CheckoutPayload {
            products: vec![LineItem {
                id: ProductId::new(1),
                name: "Kettlebell".to_string(),
                unit_price: Price::dollars(80),
                weight: Weight::parse("40"),
                image_ref: String::new(),
            }],
        })
    }

    #[test]
    fn test_shipping_form_keeps_method_when_absent() {
        let mut wizard = wizard();
        wizard.set_shipping_method(ShippingMethod::Express);
        let form = CheckoutForm {
            first_name: "Ada".to_string(),
            ..CheckoutForm::default()
        };

        match form.into_entry(&wizard) {
            StepEntry::Shipping { customer, method } => {
                assert_eq!(customer.first_name, "Ada");
                assert_eq!(method, ShippingMethod::Express);
            }
            other => panic!("unexpected entry {other:?}"),
        }
    }

    #[test]
    fn test_method_options_price_each_method() {
        let options = method_options(&wizard());
        let prices: Vec<&str> = options.iter().map(|o| o.price.as_str()).collect();
        assert_eq!(prices, ["$30.00", "$25.00"]);
        assert!(options.iter().any(|o| o.selected && o.value == "standard"));
    }

    #[test]
    fn test_wants_json() {
        let mut headers = HeaderMap::new();
        assert!(!wants_json(&headers));
        headers.insert(header::ACCEPT, "application/json".parse().unwrap());
        assert!(wants_json(&headers));
    }
}
