//! Advisory password strength.
//!
//! The signup form shows a strength meter under the password field. The
//! classification counts how many of five character-class checks a password
//! satisfies. It is display-only and never blocks submission.

use serde::{Deserialize, Serialize};

/// Minimum character count for the length check.
pub const MIN_LENGTH: usize = 8;

/// Characters that satisfy the symbol check.
pub const SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Strength bucket shown by the meter.
///
/// `Empty` means nothing has been typed and the meter is hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStrength {
    Empty,
    Weak,
    Good,
    Strong,
}

impl PasswordStrength {
    /// Classify a password.
    ///
    /// | checks passed | strength |
    /// |---------------|----------|
    /// | (empty)       | Empty    |
    /// | 0-2           | Weak     |
    /// | 3-4           | Good     |
    /// | 5             | Strong   |
    #[must_use]
    pub fn of(password: &str) -> Self {
        if password.is_empty() {
            return Self::Empty;
        }
        match satisfied_checks(password) {
            0..=2 => Self::Weak,
            3 | 4 => Self::Good,
            _ => Self::Strong,
        }
    }

    /// Human-readable label, empty for [`PasswordStrength::Empty`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Weak => "Weak password",
            Self::Good => "Good password",
            Self::Strong => "Strong password",
        }
    }

    /// CSS modifier for the meter.
    #[must_use]
    pub const fn level(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Weak => "weak",
            Self::Good => "good",
            Self::Strong => "strong",
        }
    }

    /// Whether the meter is shown at all.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Empty)
    }
}

/// Count of satisfied checks: length, uppercase, lowercase, digit, symbol.
#[must_use]
pub fn satisfied_checks(password: &str) -> usize {
    let checks = [
        password.chars().count() >= MIN_LENGTH,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| SYMBOLS.contains(c)),
    ];
    checks.into_iter().filter(|passed| *passed).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_hides_meter() {
        assert_eq!(satisfied_checks(""), 0);
        assert_eq!(PasswordStrength::of(""), PasswordStrength::Empty);
        assert!(!PasswordStrength::Empty.is_visible());
        assert_eq!(PasswordStrength::Empty.label(), "");
    }

    #[test]
    fn test_buckets() {
        // lowercase only
        assert_eq!(PasswordStrength::of("abc"), PasswordStrength::Weak);
        // lowercase + length
        assert_eq!(PasswordStrength::of("sneakers"), PasswordStrength::Weak);
        // lowercase + length + digit
        assert_eq!(PasswordStrength::of("sneakers9"), PasswordStrength::Good);
        // upper + lower + length + digit
        assert_eq!(PasswordStrength::of("Sneakers9"), PasswordStrength::Good);
        // everything
        assert_eq!(PasswordStrength::of("Sneakers9!"), PasswordStrength::Strong);
    }

    #[test]
    fn test_short_password_can_still_be_good() {
        assert_eq!(satisfied_checks("Ab1!"), 4);
        assert_eq!(PasswordStrength::of("Ab1!"), PasswordStrength::Good);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Seven characters, more than eight bytes.
        assert_eq!(satisfied_checks("ééééééé"), 0);
        assert_eq!(satisfied_checks("éééééééé"), 1);
    }

    #[test]
    fn test_only_listed_symbols_count() {
        assert_eq!(satisfied_checks("Sneakers9_"), 4);
        assert_eq!(PasswordStrength::of("Sneakers9_"), PasswordStrength::Good);
        assert_eq!(satisfied_checks("a b-c"), 1);
        for symbol in SYMBOLS.chars() {
            assert_eq!(satisfied_checks(&symbol.to_string()), 1, "{symbol}");
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(PasswordStrength::Weak.label(), "Weak password");
        assert_eq!(PasswordStrength::Good.level(), "good");
        assert!(PasswordStrength::Strong.is_visible());
    }
}
