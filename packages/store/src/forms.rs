//! Login and registration form checks.

pub const MIN_PASSWORD_LEN: usize = 6;

/// Loose check: something before and after a single `@`.
pub fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Email is required".into());
    }
    if password.is_empty() {
        return Err("Password is required".into());
    }
    Ok(())
}

pub fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".into());
    }
    if !is_plausible_email(email) {
        return Err("Please enter a valid email".into());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_login() {
        assert!(validate_login("", "x").is_err());
        assert!(validate_login("a@b.c", "").is_err());
        assert_eq!(validate_login("a@b.c", "x"), Ok(()));
    }

    #[test]
    fn test_validate_registration() {
        assert_eq!(
            validate_registration(" ", "a@b.c", "secret").unwrap_err(),
            "Name is required"
        );
        assert_eq!(
            validate_registration("Ana", "ana.example.com", "secret").unwrap_err(),
            "Please enter a valid email"
        );
        assert!(validate_registration("Ana", "ana@example.com", "12345")
            .unwrap_err()
            .contains("at least 6"));
        assert_eq!(validate_registration("Ana", "ana@example.com", "123456"), Ok(()));
    }

    #[test]
    fn test_email_shape() {
        assert!(is_plausible_email("x@y"));
        assert!(!is_plausible_email("@y"));
        assert!(!is_plausible_email("x@"));
        assert!(!is_plausible_email("x@y@z"));
    }
}
