//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SPORTSGEAR_ADMIN_EMAIL` - Email address of the admin panel account
//! - `SPORTSGEAR_ADMIN_PASSWORD` - Admin panel password (high entropy, not a placeholder)
//!
//! ## Optional
//! - `SPORTSGEAR_HOST` - Bind address (default: 127.0.0.1)
//! - `SPORTSGEAR_PORT` - Listen port (default: 3000)
//! - `SPORTSGEAR_BASE_URL` - Public URL (default: `http://localhost:3000`)
//! - `SPORTSGEAR_ADMIN_NAME` - Display name of the admin (default: Store Admin)
//! - `SPORTSGEAR_SIGNUP_DELAY_MS` - Simulated signup submit delay (default: 1500)
//! - `SPORTSGEAR_CATALOG_PATH` - JSON file replacing the built-in mock catalog
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sportsgear_core::Email;
use thiserror::Error;

const DEFAULT_SIGNUP_DELAY_MS: u64 = 1500;
const MIN_ADMIN_PASSWORD_LENGTH: usize = 12;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "password",
    "admin",
    "xxx",
    "todo",
    "letmein",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Admin panel account
    pub admin: AdminConfig,
    /// How long a signup submission pretends to talk to a server
    pub signup_delay: Duration,
    /// Optional JSON catalog file
    pub catalog_path: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
}

/// The single admin panel account.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminConfig {
    pub email: Email,
    pub name: String,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl AdminConfig {
    /// Whether the submitted credentials match this account.
    #[must_use]
    pub fn matches(&self, email: &Email, password: &str) -> bool {
        let expected = self.password.expose_secret().as_bytes();
        let given = password.as_bytes();
        // Compare every byte so timing does not reveal the matching prefix.
        let same_password = expected.len() == given.len()
            && expected
                .iter()
                .zip(given)
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0;
        same_password && *email == self.email
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the admin password fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("SPORTSGEAR_HOST", "127.0.0.1")?;
        let port = parse_env("SPORTSGEAR_PORT", "3000")?;
        let base_url = get_env_or_default("SPORTSGEAR_BASE_URL", "http://localhost:3000");
        let admin = AdminConfig::from_env()?;
        let delay_ms: u64 =
            parse_env("SPORTSGEAR_SIGNUP_DELAY_MS", &DEFAULT_SIGNUP_DELAY_MS.to_string())?;
        let catalog_path = get_optional_env("SPORTSGEAR_CATALOG_PATH").map(PathBuf::from);

        Ok(Self {
            host,
            port,
            base_url,
            admin,
            signup_delay: Duration::from_millis(delay_ms),
            catalog_path,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl AdminConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_email = get_required_env("SPORTSGEAR_ADMIN_EMAIL")?;
        let email = Email::parse(&raw_email).map_err(|e| {
            ConfigError::InvalidEnvVar("SPORTSGEAR_ADMIN_EMAIL".to_string(), e.to_string())
        })?;
        let password = get_required_env("SPORTSGEAR_ADMIN_PASSWORD")?;
        validate_admin_password(&password, "SPORTSGEAR_ADMIN_PASSWORD")?;

        Ok(Self {
            email,
            name: get_env_or_default("SPORTSGEAR_ADMIN_NAME", "Store Admin"),
            password: SecretString::from(password),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // Password length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that the admin password is long, not a placeholder, and not repetitive.
fn validate_admin_password(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.chars().count() < MIN_ADMIN_PASSWORD_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("must be at least {MIN_ADMIN_PASSWORD_LENGTH} characters"),
        ));
    }

    let lower = secret.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated password."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn admin() -> AdminConfig {
        AdminConfig {
            email: Email::parse("boss@sportsgear.test").unwrap(),
            name: "Boss".to_string(),
            password: SecretString::from("kT9#vQ2!mZ7@pL4$"),
        }
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        assert!((shannon_entropy("zzzzzzz") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_admin_password_too_short() {
        let result = validate_admin_password("aB3$xY9!", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_admin_password_placeholder() {
        let result = validate_admin_password("changeme-please-now", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_admin_password_low_entropy() {
        let result = validate_admin_password("abababababababab", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_admin_password_valid() {
        assert!(validate_admin_password("kT9#vQ2!mZ7@pL4$", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_admin_matches() {
        let admin = admin();
        let email = Email::parse("Boss@Sportsgear.test").unwrap();
        assert!(admin.matches(&email, "kT9#vQ2!mZ7@pL4$"));
        assert!(!admin.matches(&email, "kT9#vQ2!mZ7@pL4"));
        assert!(!admin.matches(&Email::parse("other@sportsgear.test").unwrap(), "kT9#vQ2!mZ7@pL4$"));
    }

    #[test]
    fn test_admin_debug_redacts_password() {
        let debug_output = format!("{:?}", admin());
        assert!(debug_output.contains("boss@sportsgear.test"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("kT9#vQ2!mZ7@pL4$"));
    }

    #[test]
    fn test_socket_addr_and_secure_flag() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "https://shop.sportsgear.test".to_string(),
            admin: admin(),
            signup_delay: Duration::from_millis(10),
            catalog_path: None,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert!(config.is_secure());
    }
}
