//! Utility functions for sorting operations

/// Convert a property name such as `CreatedAt` into a column name such as
/// `created_at`
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower_or_digit = false;

    for ch in name.chars() {
        if ch.is_uppercase() {
            if prev_lower_or_digit {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            prev_lower_or_digit = false;
        } else {
            prev_lower_or_digit = ch.is_lowercase() || ch.is_ascii_digit();
            out.push(ch);
        }
    }

    out
}

/// Drop module paths from a `std::any::type_name` string, so
/// `core::option::Option<alloc::string::String>` reads `Option<String>`
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(segment_start);
        } else {
            out.push(ch);
            if !(ch.is_alphanumeric() || ch == '_') {
                segment_start = out.len();
            }
        }
    }

    out
}
