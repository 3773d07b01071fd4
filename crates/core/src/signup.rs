//! Signup step machine.
//!
//! Account -> Personal -> Preferences, with the same linear shape as the
//! checkout. Inputs carry browser-side `required` hints only; nothing here
//! validates a field or refuses to advance. Continuing from Preferences
//! submits the form and consumes the wizard.

use serde::{Deserialize, Serialize};

use crate::password::PasswordStrength;
use crate::wizard::WizardStep;

/// A signup step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignupStep {
    Account,
    Personal,
    Preferences,
}

impl WizardStep for SignupStep {
    const ORDER: &'static [Self] = &[Self::Account, Self::Personal, Self::Preferences];
    const FIRST: Self = Self::Account;

    fn title(self) -> &'static str {
        match self {
            Self::Account => "Account",
            Self::Personal => "Personal",
            Self::Preferences => "Preferences",
        }
    }
}

/// Credentials entered on the Account step.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetails {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl std::fmt::Debug for AccountDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountDetails")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

/// Details entered on the Personal step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub date_of_birth: String,
}

/// How often the customer plays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Professional,
}

impl ExperienceLevel {
    pub const ALL: [Self; 4] = [
        Self::Beginner,
        Self::Intermediate,
        Self::Advanced,
        Self::Professional,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Professional => "Professional",
        }
    }

    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Professional => "professional",
        }
    }
}

/// Choices made on the Preferences step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub favorite_sport: String,
    pub experience: ExperienceLevel,
    pub newsletter: bool,
}

/// Fields submitted from one step's form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupEntry {
    Account(AccountDetails),
    Personal(PersonalDetails),
    Preferences(Preferences),
}

/// Everything collected by a submitted signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub account: AccountDetails,
    pub personal: PersonalDetails,
    pub preferences: Preferences,
}

/// Outcome of continuing a signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupAdvance {
    Moved(SignupWizard),
    Submitted(Registration),
}

/// An in-progress signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupWizard {
    step: SignupStep,
    account: AccountDetails,
    personal: PersonalDetails,
    preferences: Preferences,
}

impl Default for SignupWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl SignupWizard {
    /// A fresh signup on the Account step.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: SignupStep::FIRST,
            account: AccountDetails::default(),
            personal: PersonalDetails::default(),
            preferences: Preferences::default(),
        }
    }

    #[must_use]
    pub const fn step(&self) -> SignupStep {
        self.step
    }

    #[must_use]
    pub const fn account(&self) -> &AccountDetails {
        &self.account
    }

    #[must_use]
    pub const fn personal(&self) -> &PersonalDetails {
        &self.personal
    }

    #[must_use]
    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Store the fields submitted from a step's form.
    pub fn record(&mut self, entry: SignupEntry) {
        match entry {
            SignupEntry::Account(account) => self.account = account,
            SignupEntry::Personal(personal) => self.personal = personal,
            SignupEntry::Preferences(preferences) => self.preferences = preferences,
        }
    }

    /// Whether the confirmation differs from the password.
    ///
    /// Shown as an inline warning; it does not stop the form.
    #[must_use]
    pub fn password_mismatch(&self) -> bool {
        !self.account.confirm_password.is_empty()
            && self.account.password != self.account.confirm_password
    }

    /// Strength of the password entered so far.
    #[must_use]
    pub fn password_strength(&self) -> PasswordStrength {
        PasswordStrength::of(&self.account.password)
    }

    /// Go back one step. Does nothing on the first step.
    pub fn back(&mut self) -> bool {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    /// Continue to the next step, or submit from Preferences.
    #[must_use]
    pub fn advance(mut self) -> SignupAdvance {
        match self.step.next() {
            Some(next) => {
                self.step = next;
                SignupAdvance::Moved(self)
            }
            None => SignupAdvance::Submitted(Registration {
                account: self.account,
                personal: self.personal,
                preferences: self.preferences,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(advance: SignupAdvance) -> SignupWizard {
        match advance {
            SignupAdvance::Moved(wizard) => wizard,
            SignupAdvance::Submitted(_) => panic!("signup submitted early"),
        }
    }

    fn account(password: &str, confirm: &str) -> AccountDetails {
        AccountDetails {
            email: "sam@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_linear_progression() {
        let w = SignupWizard::new();
        assert_eq!(w.step(), SignupStep::Account);
        let w = moved(w.advance());
        assert_eq!(w.step(), SignupStep::Personal);
        let w = moved(w.advance());
        assert_eq!(w.step(), SignupStep::Preferences);
        assert!(matches!(w.advance(), SignupAdvance::Submitted(_)));
    }

    #[test]
    fn test_back_keeps_entries() {
        let mut w = SignupWizard::new();
        w.record(SignupEntry::Account(account("Goal!2024", "Goal!2024")));
        let mut w = moved(w.advance());
        w.record(SignupEntry::Personal(PersonalDetails {
            first_name: "Sam".to_string(),
            ..PersonalDetails::default()
        }));
        let before = w.clone();

        assert!(w.back());
        assert_eq!(w.account().email, "sam@example.com");
        let w = moved(w.advance());
        assert_eq!(w, before);
    }

    #[test]
    fn test_back_on_account_is_noop() {
        let mut w = SignupWizard::new();
        assert!(!w.back());
        assert_eq!(w.step(), SignupStep::Account);
    }

    #[test]
    fn test_mismatch_warns_but_does_not_block() {
        let mut w = SignupWizard::new();
        w.record(SignupEntry::Account(account("Goal!2024", "Goal!2025")));
        assert!(w.password_mismatch());
        let w = moved(w.advance());
        assert_eq!(w.step(), SignupStep::Personal);
    }

    #[test]
    fn test_empty_confirmation_is_not_a_mismatch() {
        let mut w = SignupWizard::new();
        w.record(SignupEntry::Account(account("Goal!2024", "")));
        assert!(!w.password_mismatch());
    }

    #[test]
    fn test_weak_password_does_not_block() {
        let mut w = SignupWizard::new();
        w.record(SignupEntry::Account(account("abc", "abc")));
        assert_eq!(w.password_strength(), PasswordStrength::Weak);
        let w = moved(moved(w.advance()).advance());

        let SignupAdvance::Submitted(registration) = w.advance() else {
            panic!("preferences should submit");
        };
        assert_eq!(registration.account.password, "abc");
    }

    #[test]
    fn test_account_debug_redacts_passwords() {
        let debug = format!("{:?}", account("Secret#123", "Secret#123"));
        assert!(debug.contains("sam@example.com"));
        assert!(!debug.contains("Secret#123"));
    }
}
