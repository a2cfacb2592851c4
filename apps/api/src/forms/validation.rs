/// Fails with "Please enter <label>" when `value` is blank after trimming.
pub fn require(value: &str, label: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("Please enter {label}"))
    } else {
        Ok(())
    }
}

/// Shape check only: one `@`, a non-empty local part, and a dotted domain with no blank
/// labels. No whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|label| !label.is_empty())
}
