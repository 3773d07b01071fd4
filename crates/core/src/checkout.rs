//! Checkout step machine.
//!
//! A checkout walks Shipping -> Payment -> Review. Continuing from Review
//! places the order: the wizard is consumed and an [`Order`] snapshot comes
//! out, so a placed checkout cannot be advanced again.
//!
//! No field is validated before advancing. Going back never discards data.
//! Prices are derived from the current items and shipping method on every
//! call and never stored on the wizard.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::line_item::{self, CheckoutPayload, LineItem};
use crate::order::Order;
use crate::shipping::{self, ShippingMethod};
use crate::types::Price;
use crate::wizard::WizardStep;

/// A checkout step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    Shipping,
    Payment,
    Review,
}

impl WizardStep for CheckoutStep {
    const ORDER: &'static [Self] = &[Self::Shipping, Self::Payment, Self::Review];
    const FIRST: Self = Self::Shipping;

    fn title(self) -> &'static str {
        match self {
            Self::Shipping => "Shipping",
            Self::Payment => "Payment",
            Self::Review => "Review",
        }
    }
}

/// Contact and delivery details entered on the Shipping step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub phone: String,
}

impl CustomerDetails {
    /// First and last name joined by a space, trimmed.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_owned()
    }
}

/// Card details entered on the Payment step.
///
/// Kept only while the checkout is in progress; never copied into the
/// placed order. `Debug` output redacts the number and security code.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub card_holder: String,
    pub card_number: String,
    pub expiry: String,
    pub cvc: String,
}

impl PaymentDetails {
    /// Last four digits of the card number, if at least four were entered.
    #[must_use]
    pub fn last_four(&self) -> Option<String> {
        let digits: Vec<char> = self
            .card_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        digits
            .len()
            .checked_sub(4)
            .and_then(|start| digits.get(start..))
            .map(|tail| tail.iter().collect())
    }
}

impl fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("card_holder", &self.card_holder)
            .field("card_number", &"[REDACTED]")
            .field("expiry", &self.expiry)
            .field("cvc", &"[REDACTED]")
            .finish()
    }
}

/// Fields submitted from one step's form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepEntry {
    Shipping {
        customer: CustomerDetails,
        method: ShippingMethod,
    },
    Payment(PaymentDetails),
    Review,
}

/// Outcome of continuing a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutAdvance {
    /// The wizard moved to its next step.
    Moved(CheckoutWizard),
    /// The order was placed from the Review step.
    Placed(Order),
}

/// An in-progress checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutWizard {
    step: CheckoutStep,
    items: Vec<LineItem>,
    shipping_method: ShippingMethod,
    customer: CustomerDetails,
    payment: PaymentDetails,
}

impl CheckoutWizard {
    /// Start a checkout on the Shipping step from a navigation payload.
    #[must_use]
    pub fn start(payload: CheckoutPayload) -> Self {
        Self {
            step: CheckoutStep::FIRST,
            items: payload.products,
            shipping_method: ShippingMethod::default(),
            customer: CustomerDetails::default(),
            payment: PaymentDetails::default(),
        }
    }

    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub const fn shipping_method(&self) -> ShippingMethod {
        self.shipping_method
    }

    #[must_use]
    pub const fn customer(&self) -> &CustomerDetails {
        &self.customer
    }

    #[must_use]
    pub const fn payment(&self) -> &PaymentDetails {
        &self.payment
    }

    /// Change the shipping method. Totals follow on the next read.
    pub fn set_shipping_method(&mut self, method: ShippingMethod) {
        self.shipping_method = method;
    }

    /// Store the fields submitted from a step's form.
    pub fn record(&mut self, entry: StepEntry) {
        match entry {
            StepEntry::Shipping { customer, method } => {
                self.customer = customer;
                self.shipping_method = method;
            }
            StepEntry::Payment(payment) => self.payment = payment,
            StepEntry::Review => {}
        }
    }

    #[must_use]
    pub fn subtotal(&self) -> Price {
        line_item::subtotal(&self.items)
    }

    #[must_use]
    pub fn shipping_cost(&self) -> Price {
        shipping::shipping_cost(&self.items, self.shipping_method)
    }

    /// Subtotal plus shipping.
    #[must_use]
    pub fn total(&self) -> Price {
        self.subtotal() + self.shipping_cost()
    }

    /// Go back one step. Does nothing on the first step.
    ///
    /// Returns whether the step changed.
    pub fn back(&mut self) -> bool {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    /// Continue to the next step, or place the order from Review.
    #[must_use]
    pub fn advance(mut self) -> CheckoutAdvance {
        match self.step.next() {
            Some(next) => {
                self.step = next;
                CheckoutAdvance::Moved(self)
            }
            None => CheckoutAdvance::Placed(self.place_order()),
        }
    }

    fn place_order(self) -> Order {
        let subtotal = self.subtotal();
        let shipping_cost = self.shipping_cost();
        Order::new(
            self.items,
            self.shipping_method,
            self.customer,
            subtotal,
            shipping_cost,
        )
    }
}
