//! Sportsgear Core - Domain types and checkout rules.
//!
//! This crate provides the types and pure business rules shared by all
//! Sportsgear components:
//! - `storefront` - Public shop and admin panel (axum)
//! - `cli` - Offline tooling for quotes and catalog inspection
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure functions - no I/O,
//! no HTTP, no clocks. Every rule here can be unit tested without a runtime.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, weights, emails, and statuses
//! - [`catalog`] - Catalog records (products and admin-side orders)
//! - [`line_item`] - Line items and the checkout navigation payload
//! - [`shipping`] - Shipping cost calculation
//! - [`wizard`] - Shared shape of the multi-step forms
//! - [`checkout`] - Checkout step machine (Shipping, Payment, Review)
//! - [`order`] - Placed order snapshot handed to the confirmation view
//! - [`signup`] - Signup step machine (Account, Personal, Preferences)
//! - [`password`] - Advisory password strength classification

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod line_item;
pub mod order;
pub mod password;
pub mod shipping;
pub mod signup;
pub mod types;
pub mod wizard;

pub use catalog::{AdminOrder, Product};
pub use checkout::{
    CheckoutAdvance, CheckoutStep, CheckoutWizard, CustomerDetails, PaymentDetails, StepEntry,
};
pub use line_item::{CheckoutPayload, LineItem};
pub use order::{Order, OrderConfirmation};
pub use password::PasswordStrength;
pub use shipping::{ShippingMethod, shipping_cost};
pub use signup::{Registration, SignupAdvance, SignupEntry, SignupStep, SignupWizard};
pub use types::*;
pub use wizard::WizardStep;
