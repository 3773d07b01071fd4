//! Authentication route handlers.
//!
//! The admin panel has a single account configured through the environment.
//! Shopper sign-in is not implemented; `/login` is the page signup lands on.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use sportsgear_core::{AdminUserId, Email};
use tower_sessions::Session;
use tracing::instrument;

use super::cart::cart_count;
use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAdmin, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// ID of the configured admin account.
const ADMIN_ID: AdminUserId = AdminUserId::new(1);

// =============================================================================
// Form & Query Types
// =============================================================================

/// Admin login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query parameters for error display on the admin login page.
#[derive(Debug, Deserialize)]
pub struct ErrorQuery {
    pub error: Option<String>,
}

/// Query parameters for the shopper sign-in page.
#[derive(Debug, Deserialize)]
pub struct SignInQuery {
    #[serde(default)]
    pub registered: bool,
}

// =============================================================================
// Templates
// =============================================================================

/// Shopper sign-in page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct SignInTemplate {
    pub registered: bool,
    pub cart_count: usize,
}

/// Admin login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct AdminLoginTemplate {
    pub error: Option<String>,
}

fn error_message(code: &str) -> String {
    match code {
        "credentials" => "Invalid email or password.".to_string(),
        "session" => "Could not start a session. Please try again.".to_string(),
        _ => "Something went wrong. Please try again.".to_string(),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the shopper sign-in page.
#[instrument(skip(session))]
pub async fn sign_in_page(session: Session, Query(query): Query<SignInQuery>) -> impl IntoResponse {
    SignInTemplate {
        registered: query.registered,
        cart_count: cart_count(&session).await,
    }
}

/// Display the admin login page, or go to the dashboard if signed in.
pub async fn login_page(
    OptionalAdmin(admin): OptionalAdmin,
    Query(query): Query<ErrorQuery>,
) -> axum::response::Response {
    if admin.is_some() {
        return Redirect::to("/admin").into_response();
    }

    AdminLoginTemplate {
        error: query.error.as_deref().map(error_message),
    }
    .into_response()
}

/// Handle admin login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Redirect {
    let admin_config = &state.config().admin;

    let authenticated = Email::parse(&form.email)
        .is_ok_and(|email| admin_config.matches(&email, &form.password));
    if !authenticated {
        tracing::warn!("Admin login failed");
        return Redirect::to("/admin/login?error=credentials");
    }

    let admin = CurrentAdmin {
        id: ADMIN_ID,
        email: admin_config.email.clone(),
        name: admin_config.name.clone(),
    };

    if let Err(e) = set_current_admin(&session, &admin).await {
        tracing::error!("Failed to set session: {e}");
        return Redirect::to("/admin/login?error=session");
    }

    set_sentry_user(&admin.id, Some(admin.email.as_str()));
    tracing::info!(admin = %admin.email, "Admin signed in");
    Redirect::to("/admin")
}

/// Sign the admin out.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_admin(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/admin/login"))
}
