//! Signup route handlers.
//!
//! Account -> Personal -> Preferences, with the in-progress [`SignupWizard`]
//! in the session. Nothing is validated before moving on; the password
//! meter and the confirmation mismatch notice are advisory only.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use sportsgear_core::password::satisfied_checks;
use sportsgear_core::signup::{AccountDetails, ExperienceLevel, PersonalDetails, Preferences};
use sportsgear_core::wizard::{StepMarker, step_markers};
use sportsgear_core::{
    PasswordStrength, SignupAdvance, SignupEntry, SignupStep, SignupWizard, WizardStep,
};
use tower_sessions::Session;
use tracing::instrument;

use super::cart::cart_count;
use crate::error::{Result, add_breadcrumb};
use crate::models::session_keys;
use crate::state::AppState;

/// Password meter display data.
pub struct StrengthView {
    pub label: &'static str,
    pub level: &'static str,
    /// CSS class of each of the five meter segments, one per check.
    pub segments: Vec<&'static str>,
    pub visible: bool,
}

impl StrengthView {
    fn of(password: &str) -> Self {
        let strength = PasswordStrength::of(password);
        let checks = satisfied_checks(password);
        Self {
            label: strength.label(),
            level: strength.level(),
            segments: (1..=5)
                .map(|n| if n <= checks { "lit" } else { "dim" })
                .collect(),
            visible: strength.is_visible(),
        }
    }
}

/// Experience level select option.
pub struct ExperienceOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Signup step page template.
#[derive(Template, WebTemplate)]
#[template(path = "signup/step.html")]
pub struct SignupTemplate {
    pub markers: Vec<StepMarker>,
    pub step_title: String,
    pub is_account: bool,
    pub is_personal: bool,
    pub is_preferences: bool,
    pub can_go_back: bool,
    pub continue_label: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub mismatch: bool,
    pub strength: StrengthView,
    pub personal: PersonalDetails,
    pub favorite_sport: String,
    pub experiences: Vec<ExperienceOption>,
    pub newsletter: bool,
    pub cart_count: usize,
}

/// Password meter fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/password_strength.html")]
pub struct PasswordStrengthTemplate {
    pub strength: StrengthView,
    pub mismatch: bool,
}

/// Fields posted by any signup step. Absent fields are empty.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub date_of_birth: String,
    pub favorite_sport: String,
    pub experience: Option<ExperienceLevel>,
    /// Checkbox: present only when ticked.
    pub newsletter: Option<String>,
}

impl SignupForm {
    fn into_entry(self, step: SignupStep) -> SignupEntry {
        match step {
            SignupStep::Account => SignupEntry::Account(AccountDetails {
                email: self.email,
                password: self.password,
                confirm_password: self.confirm_password,
            }),
            SignupStep::Personal => SignupEntry::Personal(PersonalDetails {
                first_name: self.first_name,
                last_name: self.last_name,
                phone: self.phone,
                date_of_birth: self.date_of_birth,
            }),
            SignupStep::Preferences => SignupEntry::Preferences(Preferences {
                favorite_sport: self.favorite_sport,
                experience: self.experience.unwrap_or_default(),
                newsletter: self.newsletter.is_some(),
            }),
        }
    }
}

/// Password meter form data.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct PasswordForm {
    pub password: String,
    pub confirm_password: String,
}

async fn load_signup(session: &Session) -> Result<SignupWizard> {
    Ok(session
        .get::<SignupWizard>(session_keys::SIGNUP)
        .await?
        .unwrap_or_default())
}

/// Display the current signup step.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<impl IntoResponse> {
    let wizard = load_signup(&session).await?;
    let step = wizard.step();
    let account = wizard.account();
    let preferences = wizard.preferences();

    Ok(SignupTemplate {
        markers: step_markers(step),
        step_title: step.title().to_string(),
        is_account: step == SignupStep::Account,
        is_personal: step == SignupStep::Personal,
        is_preferences: step == SignupStep::Preferences,
        can_go_back: step.previous().is_some(),
        continue_label: if step.is_last() {
            "Create Account".to_string()
        } else {
            "Continue".to_string()
        },
        email: account.email.clone(),
        password: account.password.clone(),
        confirm_password: account.confirm_password.clone(),
        mismatch: wizard.password_mismatch(),
        strength: StrengthView::of(&account.password),
        personal: wizard.personal().clone(),
        favorite_sport: preferences.favorite_sport.clone(),
        experiences: ExperienceLevel::ALL
            .into_iter()
            .map(|level| ExperienceOption {
                value: level.value().to_string(),
                label: level.label().to_string(),
                selected: level == preferences.experience,
            })
            .collect(),
        newsletter: preferences.newsletter,
        cart_count: cart_count(&session).await,
    })
}

/// Merge the posted fields and continue.
///
/// From Preferences this submits: after the configured delay the visitor is
/// sent to the sign-in page.
#[instrument(skip(state, session, form))]
pub async fn advance(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Redirect> {
    let mut wizard = load_signup(&session).await?;
    wizard.record(form.into_entry(wizard.step()));

    match wizard.advance() {
        SignupAdvance::Moved(wizard) => {
            session.insert(session_keys::SIGNUP, &wizard).await?;
            Ok(Redirect::to("/signup"))
        }
        SignupAdvance::Submitted(registration) => {
            session.remove::<SignupWizard>(session_keys::SIGNUP).await?;

            tracing::info!(
                email = %registration.account.email,
                newsletter = registration.preferences.newsletter,
                "Signup submitted"
            );
            add_breadcrumb("signup", "Submitted signup", None);

            tokio::time::sleep(state.config().signup_delay).await;
            Ok(Redirect::to("/"))
        }
    }
}

/// Merge the posted fields and go back one step.
#[instrument(skip(session, form))]
pub async fn back(session: Session, Form(form): Form<SignupForm>) -> Result<Redirect> {
    let mut wizard = load_signup(&session).await?;
    wizard.record(form.into_entry(wizard.step()));
    wizard.back();
    session.insert(session_keys::SIGNUP, &wizard).await?;

    Ok(Redirect::to("/signup"))
}

/// Render the password meter for the typed password (HTMX).
pub async fn password_strength(Form(form): Form<PasswordForm>) -> impl IntoResponse {
    PasswordStrengthTemplate {
        strength: StrengthView::of(&form.password),
        mismatch: !form.confirm_password.is_empty() && form.confirm_password != form.password,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_view_segments() {
        let view = StrengthView::of("Abcdef1!");
        assert_eq!(view.label, "Strong password");
        assert_eq!(view.segments, ["lit", "lit", "lit", "lit", "lit"]);

        let view = StrengthView::of("abc");
        assert_eq!(view.level, "weak");
        assert_eq!(view.segments, ["lit", "dim", "dim", "dim", "dim"]);
        assert!(view.visible);

        let view = StrengthView::of("sneakers9");
        assert_eq!(view.label, "Good password");
        assert_eq!(view.segments, ["lit", "lit", "lit", "dim", "dim"]);

        let view = StrengthView::of("");
        assert!(!view.visible);
        assert_eq!(view.level, "empty");
    }

    #[test]
    fn test_unticked_newsletter_is_false() {
        let form = SignupForm {
            favorite_sport: "Climbing".to_string(),
            ..SignupForm::default()
        };
        let SignupEntry::Preferences(prefs) = form.into_entry(SignupStep::Preferences) else {
            panic!("expected preferences entry");
        };
        assert!(!prefs.newsletter);
        assert_eq!(prefs.experience, ExperienceLevel::Beginner);
    }
}
