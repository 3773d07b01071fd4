//! Sportsgear Storefront library.
//!
//! This crate provides the storefront and admin panel as a library,
//! allowing the router to be tested end to end and reused by the binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

pub use routes::app;
