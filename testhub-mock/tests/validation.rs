use testhub_mock::validation::Validator;
use testhub_mock::{
    MockError, PasswordStrength, Role, UserForm, password_strength, validate_create_user,
};

fn valid_form() -> UserForm {
    UserForm {
        name: "Mary-Jane O'Neil".to_string(),
        email: "Mary@Example.com".to_string(),
        password: "Passw0rd!".to_string(),
        confirm_password: "Passw0rd!".to_string(),
        role: "admin".to_string(),
    }
}

fn message_for(form: &UserForm, field: &str) -> Option<String> {
    validate_create_user(form)
        .error_for(field)
        .map(|e| e.message.clone())
}

// ============================================================================
// User form
// ============================================================================

#[test]
fn test_valid_form_passes() {
    assert!(validate_create_user(&valid_form()).is_valid());
}

#[test]
fn test_empty_form_reports_every_field_once() {
    let result = validate_create_user(&UserForm::default());
    let fields: Vec<_> = result.errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(
        fields,
        vec!["name", "email", "password", "confirmPassword", "role"]
    );
    assert_eq!(result.errors()[0].message, "Name is required");
    assert_eq!(result.errors()[0].code.as_deref(), Some("required"));
}

#[test]
fn test_name_rules() {
    let mut form = valid_form();

    form.name = "J".to_string();
    assert_eq!(
        message_for(&form, "name").as_deref(),
        Some("Name must be at least 2 characters")
    );

    form.name = "x".repeat(51);
    assert_eq!(
        message_for(&form, "name").as_deref(),
        Some("Name must be less than 50 characters")
    );

    form.name = "R2-D2".to_string();
    assert_eq!(
        message_for(&form, "name").as_deref(),
        Some("Name can only contain letters, spaces, hyphens, and apostrophes")
    );
}

#[test]
fn test_email_rules() {
    let mut form = valid_form();
    form.email = "   ".to_string();
    assert_eq!(message_for(&form, "email").as_deref(), Some("Email is required"));

    form.email = "not-an-email".to_string();
    assert_eq!(
        message_for(&form, "email").as_deref(),
        Some("Please enter a valid email address")
    );
}

#[test]
fn test_password_rules_in_order() {
    let cases = [
        ("Ab1!", "Password must be at least 8 characters"),
        ("ABCDEFG1!", "Password must contain at least one lowercase letter"),
        ("abcdefg1!", "Password must contain at least one uppercase letter"),
        ("Abcdefgh!", "Password must contain at least one number"),
        ("Abcdefgh1", "Password must contain at least one special character"),
    ];

    for (password, expected) in cases {
        let form = UserForm {
            password: password.to_string(),
            confirm_password: password.to_string(),
            ..valid_form()
        };
        assert_eq!(message_for(&form, "password").as_deref(), Some(expected));
    }

    let long = format!("Aa1!{}", "x".repeat(125));
    let form = UserForm {
        password: long.clone(),
        confirm_password: long,
        ..valid_form()
    };
    assert_eq!(
        message_for(&form, "password").as_deref(),
        Some("Password must be less than 128 characters")
    );
}

#[test]
fn test_confirm_password_and_role() {
    let form = UserForm {
        confirm_password: "Passw0rd?".to_string(),
        role: "owner".to_string(),
        ..valid_form()
    };
    assert_eq!(
        message_for(&form, "confirmPassword").as_deref(),
        Some("Passwords do not match")
    );
    assert_eq!(message_for(&form, "role").as_deref(), Some("Invalid role selected"));
}

#[test]
fn test_into_input_normalizes() {
    let input = valid_form().into_input().unwrap();
    assert_eq!(input.email, "mary@example.com");
    assert_eq!(input.role, Some(Role::Admin));

    let err = UserForm::default().into_input().unwrap_err();
    match err {
        MockError::Validation(errors) => assert_eq!(errors.len(), 5),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_custom_validator() {
    let result = Validator::new()
        .field("code", "abc")
        .rule("digits", |v| v.chars().all(|c| c.is_ascii_digit()), "Digits only")
        .field("untouched", "")
        .validate();

    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].to_string(), "code: Digits only (digits)");
    assert!(result.into_result().is_err());
}

// ============================================================================
// Password strength
// ============================================================================

#[test]
fn test_password_strength_levels() {
    assert_eq!(password_strength(""), PasswordStrength::Empty);
    assert_eq!(password_strength("abc"), PasswordStrength::VeryWeak);
    assert_eq!(password_strength("abcdefgh"), PasswordStrength::Weak);
    assert_eq!(password_strength("abcdefgh1"), PasswordStrength::Fair);
    assert_eq!(password_strength("Abcdefgh1"), PasswordStrength::Good);
    assert_eq!(password_strength("Abcdefgh1!"), PasswordStrength::Strong);
    assert_eq!(password_strength("Abcdefghijk1!"), PasswordStrength::VeryStrong);
}

#[test]
fn test_password_strength_labels() {
    assert_eq!(PasswordStrength::VeryWeak.label(), "Very Weak");
    assert_eq!(PasswordStrength::VeryStrong.to_string(), "Very Strong");
    assert_eq!(PasswordStrength::Good.score(), 3);
    assert!(PasswordStrength::Strong > PasswordStrength::Fair);
}
