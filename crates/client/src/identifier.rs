//! Login identifier classification
//!
//! Pure pre-flight check used by login forms before any network call. The
//! server runs the authoritative validation; this check is advisory and must
//! stay at least as permissive as the server's.

/// Shape of a user-entered login identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Entirely digits, e.g. an account number
    NumericId,
    /// `local@domain.tld` shape
    Email,
    /// Neither of the above
    Invalid,
}

/// Classify a login identifier. Total over all inputs; never panics.
pub fn classify_identifier(input: &str) -> IdentifierKind {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return IdentifierKind::Invalid;
    }
    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return IdentifierKind::NumericId;
    }
    if is_email_like(trimmed) {
        return IdentifierKind::Email;
    }
    IdentifierKind::Invalid
}

fn is_email_like(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    // The domain needs an interior dot: "a@b.co" yes, "a@b." and "a@.b" no.
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_classify_as_numeric_id() {
        assert_eq!(classify_identifier("12345"), IdentifierKind::NumericId);
        assert_eq!(classify_identifier("  7  "), IdentifierKind::NumericId);
        assert_eq!(classify_identifier("0"), IdentifierKind::NumericId);
    }

    #[test]
    fn simple_addresses_classify_as_email() {
        assert_eq!(classify_identifier("a@b.co"), IdentifierKind::Email);
        assert_eq!(classify_identifier("user.name@example.com"), IdentifierKind::Email);
        assert_eq!(classify_identifier(" a@b.co "), IdentifierKind::Email);
    }

    #[test]
    fn everything_else_is_invalid() {
        assert_eq!(classify_identifier("not an id"), IdentifierKind::Invalid);
        assert_eq!(classify_identifier(""), IdentifierKind::Invalid);
        assert_eq!(classify_identifier("   "), IdentifierKind::Invalid);
        assert_eq!(classify_identifier("12 34"), IdentifierKind::Invalid);
        assert_eq!(classify_identifier("@b.co"), IdentifierKind::Invalid);
        assert_eq!(classify_identifier("a@bco"), IdentifierKind::Invalid);
        assert_eq!(classify_identifier("a@b."), IdentifierKind::Invalid);
        assert_eq!(classify_identifier("a@.co"), IdentifierKind::Invalid);
        assert_eq!(classify_identifier("a b@c.co"), IdentifierKind::Invalid);
    }

    #[test]
    fn classifier_is_total_over_odd_inputs() {
        for input in ["\u{0}", "٣٤٥", "a@@b.c", "@", ".", "12345678901234567890"] {
            let _ = classify_identifier(input);
        }
    }
}
