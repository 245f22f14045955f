use regex::Regex;
use validator::{ValidationError, ValidationErrors};

use crate::error::AppError;
use storefront_platform_shared::*;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email_regex = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .map_err(|_| ValidationError::new("invalid_email_format"))?;

    if email.len() > 254 {
        return Err(ValidationError::new("email_too_long"));
    }

    if !email_regex.is_match(email) {
        return Err(ValidationError::new("invalid_email_format"));
    }

    Ok(())
}

/// Resolve pagination parameters to (page, limit, offset)
pub fn resolve_pagination(page: Option<i64>, limit: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (page, limit, (page - 1) * limit)
}

/// Convert validation errors to AppError
pub fn validation_errors_to_app_error(errors: ValidationErrors) -> AppError {
    let mut error_messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = match error.code.as_ref() {
                "email" => "Invalid email format",
                "length" => "Invalid length",
                "range" => "Value out of range",
                "required" => "Field is required",
                "email_too_long" => "Email address is too long",
                "invalid_email_format" => "Invalid email format",
                "invalid_phone_format" => "Invalid phone number format",
                "invalid_pincode_format" => "Pincode must be 6 digits",
                "invalid_coupon_code" => "Coupon code must be 3-20 letters and digits",
                "negative_amount" => "Amount cannot be negative",
                "invalid_discount_percent" => "Discount must be between 0 and 100",
                _ => "Validation error",
            };

            error_messages.push(format!("{}: {}", field, message));
        }
    }

    AppError::Validation(error_messages.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("user.name+tag@domain.co.uk").is_ok());

        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("@domain.com").is_err());
        assert!(validate_email("user@").is_err());
    }

    #[test]
    fn test_pagination_defaults_and_clamping() {
        assert_eq!(resolve_pagination(None, None), (1, DEFAULT_PAGE_SIZE, 0));
        assert_eq!(resolve_pagination(Some(3), Some(10)), (3, 10, 20));
        assert_eq!(
            resolve_pagination(Some(0), Some(1000)),
            (1, MAX_PAGE_SIZE, 0)
        );
    }

    #[test]
    fn test_validation_errors_render_field_names() {
        let mut errors = ValidationErrors::new();
        errors.add("email", ValidationError::new("invalid_email_format"));
        let app_error = validation_errors_to_app_error(errors);
        match app_error {
            AppError::Validation(msg) => assert!(msg.contains("email")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
