// ✅ Form Validation - login, amounts, cards
// Every failure carries the exact message shown under the offending form.
// Nothing here is fatal: a failed check only blocks the transition.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Minimum password length accepted by the login form
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 6;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Veuillez remplir tous les champs")]
    MissingFields,

    #[error("Email invalide")]
    InvalidEmail,

    #[error("Le mot de passe doit contenir au moins {min} caractères")]
    PasswordTooShort { min: usize },

    #[error("Veuillez saisir un montant")]
    MissingAmount,

    #[error("Montant invalide")]
    InvalidAmount,

    #[error("Le montant doit être supérieur à zéro")]
    NonPositiveAmount,

    #[error("Veuillez nommer la carte")]
    MissingCardName,

    #[error("Limite de dépense invalide")]
    InvalidLimit,

    #[error("Veuillez saisir le nom du commerçant")]
    MissingMerchantName,

    #[error("Catégorie inconnue: {0}")]
    UnknownCategory(String),
}

// ============================================================================
// LOGIN
// ============================================================================

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"))
}

/// Loose email check: something@something.something, no whitespace around the parts
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Check a login form in the order the user sees the messages:
/// missing fields, then email shape, then password length.
pub fn validate_login(email: &str, password: &str, min_password_len: usize) -> Result<(), ValidationError> {
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    // Length in chars, so an astral-plane character counts once
    if password.chars().count() < min_password_len {
        return Err(ValidationError::PasswordTooShort { min: min_password_len });
    }

    Ok(())
}

// ============================================================================
// AMOUNTS
// ============================================================================

fn parse_decimal(input: &str) -> Option<Decimal> {
    // Accept the French decimal comma as well as the dot
    let normalized = input.trim().replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// Parse a transfer/payment amount. Must be a strictly positive number.
pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::MissingAmount);
    }

    let amount = parse_decimal(input).ok_or(ValidationError::InvalidAmount)?;

    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }

    Ok(amount)
}

/// Parse a card spending limit. Zero is allowed, negatives are not.
pub fn parse_limit(input: &str) -> Result<Decimal, ValidationError> {
    match parse_decimal(input) {
        Some(limit) if limit >= Decimal::ZERO => Ok(limit),
        _ => Err(ValidationError::InvalidLimit),
    }
}

/// Validate the card creation form (name + limit)
pub fn validate_card_form(name: &str, limit: &str) -> Result<(String, Decimal), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingCardName);
    }

    let limit = parse_limit(limit)?;
    Ok((name.to_string(), limit))
}
