//! Session-held models for the storefront.
//!
//! Nothing here is persisted beyond the session: the cart, in-progress
//! wizards, the last placed order and the signed-in admin all live in the
//! server-side session store.

pub mod cart;
pub mod session;

pub use cart::Cart;
pub use session::{CurrentAdmin, keys as session_keys};
