//! PII masking — deterministic text transforms applied to contact fields
//! before anything is rendered. Pure functions, no locale handling.

/// Shown when a field is empty or malformed beyond safe masking.
pub const PLACEHOLDER: &str = "—";

const MASK_CHAR: char = '•';

/// Masks the local part of an email, keeping the domain intact.
///
/// `"abcdef@x.com"` → `"a***f@x.com"`, `"ab@x.com"` → `"a***@x.com"`.
/// Empty input or input without a domain yields the placeholder.
pub fn mask_email(email: &str) -> String {
    if email.is_empty() {
        return PLACEHOLDER.to_string();
    }
    let Some((local, domain)) = email.split_once('@') else {
        return PLACEHOLDER.to_string();
    };
    if domain.is_empty() || local.is_empty() {
        return PLACEHOLDER.to_string();
    }

    let chars: Vec<char> = local.chars().collect();
    let first = chars[0];
    let masked_local = if chars.len() <= 2 {
        format!("{first}***")
    } else {
        let last = chars[chars.len() - 1];
        format!("{first}***{last}")
    };
    format!("{masked_local}@{domain}")
}

/// Masks every digit of a phone number except the last 4, preserving the
/// positions of all separators and punctuation.
///
/// Numbers with 4 or fewer digits are returned unchanged: too short to
/// mask without destroying the whole value. Empty input yields the
/// placeholder.
pub fn mask_phone(phone: &str) -> String {
    if phone.is_empty() {
        return PLACEHOLDER.to_string();
    }
    let digit_count = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if digit_count <= 4 {
        return phone.to_string();
    }

    let mut digits_to_mask = digit_count - 4;
    phone
        .chars()
        .map(|c| {
            if c.is_ascii_digit() && digits_to_mask > 0 {
                digits_to_mask -= 1;
                MASK_CHAR
            } else {
                c
            }
        })
        .collect()
}
