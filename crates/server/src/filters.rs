//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// First letter of a display name, upper-cased, for comment avatars.
///
/// Usage in templates: `{{ comment.author_name|initial }}`
#[askama::filter_fn]
pub fn initial(name: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(first_letter(&name.to_string()))
}

fn first_letter(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map_or_else(|| "?".to_string(), |c| c.to_uppercase().collect())
}

#[cfg(test)]
mod tests {
    use super::first_letter;

    #[test]
    fn test_first_letter() {
        assert_eq!(first_letter("user"), "U");
        assert_eq!(first_letter("  élodie"), "É");
        assert_eq!(first_letter("   "), "?");
    }
}
