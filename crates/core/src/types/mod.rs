//! Core types for Sportsgear.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod status;
pub mod weight;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use status::*;
pub use weight::{TotalWeight, Weight};
