//! Athlete input validation
//!
//! Values are stored exactly as submitted; the only rule is that a name or
//! identity number carries some content.

use super::ValidationError;

/// Validated athlete name (non-blank, kept as given)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AthleteName(String);

impl AthleteName {
    /// Create a new athlete name.
    ///
    /// # Rules
    /// - Must contain something other than whitespace
    /// - Surrounding whitespace is kept
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "nome" });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased form stored alongside the name for case-insensitive search.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }
}

/// Validated identity number (CPF), any non-empty string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityNumber(String);

impl IdentityNumber {
    /// Create a new identity number.
    ///
    /// # Example
    /// ```
    /// use workout_server::models::IdentityNumber;
    ///
    /// assert!(IdentityNumber::new("12345678900").is_ok());
    /// assert!(IdentityNumber::new("123.456.789-00").is_ok());
    /// assert!(IdentityNumber::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "cpf" });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A fully validated create request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAthlete {
    pub name: AthleteName,
    pub identity_number: IdentityNumber,
    pub training_center_id: i64,
    pub category_id: i64,
}
