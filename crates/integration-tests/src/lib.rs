//! Integration tests for Sportsgear.
//!
//! Tests drive the full storefront router in-process with
//! `tower::ServiceExt::oneshot`; no server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sportsgear-integration-tests
//! ```
//!
//! [`TestApp`] carries the session cookie between requests the way a
//! browser would, so multi-step flows (cart, checkout, signup, admin login)
//! run against one session.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use secrecy::SecretString;
use sportsgear_core::Email;
use sportsgear_storefront::catalog::{CatalogProvider, InMemoryCatalog};
use sportsgear_storefront::config::{AdminConfig, StorefrontConfig};
use sportsgear_storefront::state::AppState;
use tower::ServiceExt;

/// Admin email used by [`test_config`].
pub const ADMIN_EMAIL: &str = "boss@sportsgear.test";

/// Admin password used by [`test_config`].
pub const ADMIN_PASSWORD: &str = "kT9#vQ2!mZ7@pL4$";

/// Largest response body the helpers will buffer.
const BODY_LIMIT: usize = 1024 * 1024;

/// Configuration for tests: plain HTTP, no signup delay, no Sentry.
///
/// # Panics
///
/// Panics if the built-in admin email fails to parse.
#[must_use]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        admin: AdminConfig {
            email: Email::parse(ADMIN_EMAIL).unwrap(),
            name: "Morgan Admin".to_string(),
            password: SecretString::from(ADMIN_PASSWORD),
        },
        signup_delay: Duration::ZERO,
        catalog_path: None,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// The storefront router plus one browser session.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// App over the seeded mock catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(Arc::new(InMemoryCatalog::seeded()))
    }

    /// App over a given catalog.
    #[must_use]
    pub fn with_catalog(catalog: Arc<dyn CatalogProvider>) -> Self {
        let state = AppState::new(test_config(), catalog);
        Self {
            router: sportsgear_storefront::app(state),
            cookie: None,
        }
    }

    /// A second visitor on the same app, with no session.
    #[must_use]
    pub fn new_visitor(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// Send a request with the session cookie and remember any new cookie.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be read.
    #[allow(clippy::unwrap_used)]
    pub async fn send(&mut self, mut request: Request<Body>) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }

        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(pair) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|set_cookie| set_cookie.split(';').next())
        {
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// `GET uri`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built.
    #[allow(clippy::unwrap_used)]
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// `GET uri` asking for JSON.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built.
    #[allow(clippy::unwrap_used)]
    pub async fn get_json(&mut self, uri: &str) -> TestResponse {
        let request = Request::get(uri)
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// `POST uri` with a urlencoded form.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built.
    #[allow(clippy::unwrap_used)]
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// `POST uri` with a JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built.
    #[allow(clippy::unwrap_used)]
    pub async fn post_json(&mut self, uri: &str, json: &serde_json::Value) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap();
        self.send(request).await
    }
}
