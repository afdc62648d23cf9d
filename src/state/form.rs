/// Local validation for the contact form
///
/// All rules are checked synchronously before anything is sent to the
/// service; a failing field blocks the submit and is reported inline.
use thiserror::Error;

use super::data::ContactDetails;

/// A contact field failing its format rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name must be at least 2 characters.")]
    NameTooShort,
    #[error("Please enter a valid WhatsApp number.")]
    InvalidWhatsapp,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Validate the name field (at least 2 characters)
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < 2 {
        return Err(ValidationError::NameTooShort);
    }
    Ok(())
}

/// Validate the WhatsApp number (at least 10 digits, separators allowed)
pub fn validate_whatsapp(whatsapp: &str) -> Result<(), ValidationError> {
    let digits: String = whatsapp
        .chars()
        .filter(|c| !matches!(c, ' ' | '+' | '-' | '(' | ')'))
        .collect();
    if digits.len() < 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidWhatsapp);
    }
    Ok(())
}

/// Validate the email field (a plausible user@host.tld shape)
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    let Some((local, host)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    if local.is_empty() || host.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    let Some((name, tld)) = host.rsplit_once('.') else {
        return Err(ValidationError::InvalidEmail);
    };
    if name.is_empty() || tld.is_empty() {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validate all contact fields, collecting every failure
pub fn validate(details: &ContactDetails) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = [
        validate_name(&details.name),
        validate_whatsapp(&details.whatsapp),
        validate_email(&details.email),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, whatsapp: &str, email: &str) -> ContactDetails {
        ContactDetails {
            name: name.to_string(),
            whatsapp: whatsapp.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_valid_contact_passes() {
        let details = contact("Asha Rao", "+91 98765 43210", "asha@example.com");
        assert!(validate(&details).is_ok());
    }

    #[test]
    fn test_short_name_rejected() {
        assert_eq!(validate_name("A"), Err(ValidationError::NameTooShort));
        assert_eq!(validate_name("  "), Err(ValidationError::NameTooShort));
        assert!(validate_name("Al").is_ok());
    }

    #[test]
    fn test_whatsapp_separators_allowed() {
        assert!(validate_whatsapp("+91 (987) 654-3210").is_ok());
        assert!(validate_whatsapp("9876543210").is_ok());
    }

    #[test]
    fn test_whatsapp_too_short_or_lettered_rejected() {
        assert_eq!(
            validate_whatsapp("12345"),
            Err(ValidationError::InvalidWhatsapp)
        );
        assert_eq!(
            validate_whatsapp("98765abcde"),
            Err(ValidationError::InvalidWhatsapp)
        );
    }

    #[test]
    fn test_email_shapes() {
        assert!(validate_email("you@example.com").is_ok());
        assert_eq!(validate_email("you"), Err(ValidationError::InvalidEmail));
        assert_eq!(
            validate_email("you@example"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(validate_email("@x.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("you@.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("you@host."), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_validate_collects_all_failures() {
        let details = contact("A", "123", "nope");
        let errors = validate(&details).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::NameTooShort,
                ValidationError::InvalidWhatsapp,
                ValidationError::InvalidEmail,
            ]
        );
    }
}
