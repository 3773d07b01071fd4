//! Password strength command.

use sportsgear_core::PasswordStrength;
use sportsgear_core::password::{MIN_LENGTH, satisfied_checks};

/// Print the strength rating for `password`.
#[allow(clippy::print_stdout)]
pub fn run(password: &str) {
    let strength = PasswordStrength::of(password);
    if !strength.is_visible() {
        println!("No password given");
        return;
    }
    println!("{} ({}/5 checks)", strength.label(), satisfied_checks(password));
    if password.chars().count() < MIN_LENGTH {
        println!("Hint: use at least {MIN_LENGTH} characters");
    }
}
