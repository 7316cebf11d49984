//! Form validation.
//!
//! [`Validator`] collects named string fields, each with an ordered list of
//! rules, and reports the first failing rule of every field. The user form
//! rules and the password-strength meter are built on top of it.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{FieldValidationError, MockError};
use crate::model::{CreateUserInput, Role};

/// Characters counted as special in passwords.
pub const PASSWORD_SPECIALS: &str = "@$!%*?&";

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("name pattern is valid"));

type Rule = Box<dyn Fn(&str) -> bool + Send + Sync>;

struct RuleEntry {
    check: Rule,
    code: &'static str,
    message: String,
}

struct FieldEntry {
    name: String,
    value: String,
    rules: Vec<RuleEntry>,
}

// =============================================================================
// Result
// =============================================================================

/// Result of validating one or more fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    /// All fields passed validation.
    #[default]
    Valid,
    /// One or more fields failed validation.
    Invalid(Vec<FieldValidationError>),
}

impl ValidationResult {
    /// Check if all fields passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Get all validation errors.
    pub fn errors(&self) -> &[FieldValidationError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Error for a named field, if it failed.
    pub fn error_for(&self, field: &str) -> Option<&FieldValidationError> {
        self.errors().iter().find(|e| e.field == field)
    }

    /// `Ok(())` when valid, otherwise [`MockError::Validation`].
    pub fn into_result(self) -> Result<(), MockError> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(errors) => Err(MockError::Validation(errors)),
        }
    }
}

// =============================================================================
// Validator
// =============================================================================

/// Builder for validating multiple fields.
///
/// # Example
///
/// ```
/// use testhub_mock::validation::Validator;
///
/// let result = Validator::new()
///     .field("name", "J")
///     .required("Name is required")
///     .min_length(2, "Name must be at least 2 characters")
///     .field("email", "jo@example.com")
///     .email("Please enter a valid email address")
///     .validate();
///
/// assert_eq!(result.errors().len(), 1);
/// assert_eq!(result.errors()[0].field, "name");
/// ```
#[derive(Default)]
pub struct Validator {
    fields: Vec<FieldEntry>,
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field to validate. Rules added next apply to it.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(FieldEntry {
            name: name.into(),
            value: value.into(),
            rules: Vec::new(),
        });
        self
    }

    /// Add a custom rule to the current field.
    pub fn rule<F>(mut self, code: &'static str, check: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        if let Some(field) = self.fields.last_mut() {
            field.rules.push(RuleEntry {
                check: Box::new(check),
                code,
                message: msg.into(),
            });
        }
        self
    }

    /// Require the field to be non-blank.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule("required", |v| !v.trim().is_empty(), msg)
    }

    /// Require minimum length (in characters).
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule("min_length", move |v| v.chars().count() >= min, msg)
    }

    /// Require maximum length (in characters).
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule("max_length", move |v| v.chars().count() <= max, msg)
    }

    /// Require the value to match a pattern.
    pub fn pattern(self, pattern: &'static LazyLock<Regex>, msg: impl Into<String>) -> Self {
        self.rule("pattern", move |v| pattern.is_match(v), msg)
    }

    /// Require a valid email address. Empty values pass; use `required`.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.rule(
            "email",
            |v| v.is_empty() || email_address::EmailAddress::is_valid(v),
            msg,
        )
    }

    /// Require at least one character matching `pred`.
    pub fn contains_char<P>(self, pred: P, msg: impl Into<String>) -> Self
    where
        P: Fn(char) -> bool + Send + Sync + 'static,
    {
        self.rule("contains", move |v| v.chars().any(&pred), msg)
    }

    /// Require the value to equal another value.
    pub fn equals(self, other: impl Into<String>, msg: impl Into<String>) -> Self {
        let other = other.into();
        self.rule("equals", move |v| v == other, msg)
    }

    /// Require the value to be one of `allowed`.
    pub fn one_of(self, allowed: &'static [&'static str], msg: impl Into<String>) -> Self {
        self.rule("one_of", move |v| allowed.iter().any(|a| *a == v), msg)
    }

    /// Run every field's rules. Each field reports its first failure only.
    pub fn validate(self) -> ValidationResult {
        let errors: Vec<FieldValidationError> = self
            .fields
            .iter()
            .filter_map(|field| {
                field
                    .rules
                    .iter()
                    .find(|rule| !(rule.check)(&field.value))
                    .map(|rule| {
                        FieldValidationError::with_code(&field.name, &rule.message, rule.code)
                    })
            })
            .collect();

        if errors.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(errors)
        }
    }
}

// =============================================================================
// User form
// =============================================================================

/// Raw user form input, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
}

impl UserForm {
    /// Validate, then convert to service input.
    pub fn into_input(self) -> Result<CreateUserInput, MockError> {
        validate_create_user(&self).into_result()?;
        Ok(CreateUserInput {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            role: self.role.parse::<Role>().ok(),
            password: self.password,
        })
    }
}

/// Check a user form against the sign-up rules.
pub fn validate_create_user(form: &UserForm) -> ValidationResult {
    Validator::new()
        .field("name", form.name.as_str())
        .required("Name is required")
        .min_length(2, "Name must be at least 2 characters")
        .max_length(50, "Name must be less than 50 characters")
        .pattern(
            &NAME_PATTERN,
            "Name can only contain letters, spaces, hyphens, and apostrophes",
        )
        .field("email", form.email.as_str())
        .required("Email is required")
        .email("Please enter a valid email address")
        .field("password", form.password.as_str())
        .rule("required", |v| !v.is_empty(), "Password is required")
        .min_length(8, "Password must be at least 8 characters")
        .max_length(128, "Password must be less than 128 characters")
        .contains_char(
            |c| c.is_ascii_lowercase(),
            "Password must contain at least one lowercase letter",
        )
        .contains_char(
            |c| c.is_ascii_uppercase(),
            "Password must contain at least one uppercase letter",
        )
        .contains_char(
            |c| c.is_ascii_digit(),
            "Password must contain at least one number",
        )
        .contains_char(
            |c| PASSWORD_SPECIALS.contains(c),
            "Password must contain at least one special character",
        )
        .field("confirmPassword", form.confirm_password.as_str())
        .rule("required", |v| !v.is_empty(), "Please confirm your password")
        .equals(form.password.as_str(), "Passwords do not match")
        .field("role", form.role.as_str())
        .rule("required", |v| !v.is_empty(), "Please select a role")
        .one_of(&["user", "admin"], "Invalid role selected")
        .validate()
}

// =============================================================================
// Password strength
// =============================================================================

/// Password strength rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PasswordStrength {
    /// Nothing typed yet.
    Empty,
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
}

impl PasswordStrength {
    /// Score from 0 to 5.
    pub fn score(&self) -> u8 {
        match self {
            Self::Empty | Self::VeryWeak => 0,
            Self::Weak => 1,
            Self::Fair => 2,
            Self::Good => 3,
            Self::Strong => 4,
            Self::VeryStrong => 5,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Empty => "Enter password",
            Self::VeryWeak => "Very Weak",
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        }
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rate a password. One point each for length ≥ 8, length ≥ 12, mixed case,
/// a digit and a special character.
pub fn password_strength(password: &str) -> PasswordStrength {
    if password.is_empty() {
        return PasswordStrength::Empty;
    }

    let len = password.chars().count();
    let has = |pred: fn(char) -> bool| password.chars().any(pred);
    let score = [
        len >= 8,
        len >= 12,
        has(|c| c.is_ascii_lowercase()) && has(|c| c.is_ascii_uppercase()),
        has(|c| c.is_ascii_digit()),
        password.chars().any(|c| PASSWORD_SPECIALS.contains(c)),
    ]
    .into_iter()
    .filter(|&point| point)
    .count();

    match score {
        0 => PasswordStrength::VeryWeak,
        1 => PasswordStrength::Weak,
        2 => PasswordStrength::Fair,
        3 => PasswordStrength::Good,
        4 => PasswordStrength::Strong,
        _ => PasswordStrength::VeryStrong,
    }
}
