//! Session-related types.
//!
//! Types stored in the session for admin authentication and the shopping flow.

use serde::{Deserialize, Serialize};

use sportsgear_core::{AdminUserId, Email};

/// Session-stored admin identity.
///
/// Route guards read this from the session; there is no global signed-in
/// flag anywhere in the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's ID.
    pub id: AdminUserId,
    /// Admin's email address.
    pub email: Email,
    /// Admin's display name.
    pub name: String,
}

/// Session keys.
pub mod keys {
    /// Key for storing the signed-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for the shopping cart.
    pub const CART: &str = "cart";

    /// Key for the in-progress checkout wizard.
    pub const CHECKOUT: &str = "checkout";

    /// Key for the order handed to the confirmation view.
    pub const PLACED_ORDER: &str = "placed_order";

    /// Key for the in-progress signup wizard.
    pub const SIGNUP: &str = "signup";
}
