//! String helpers.

/// Upper-case the first character of `text`, leaving the rest untouched.
///
/// Uses full Unicode case mapping, so a first character whose upper-case form
/// is several characters (`ß` becomes `SS`) expands. Empty input is returned
/// as an empty string.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_first_letter() {
        assert_eq!(capitalize("omnos"), "Omnos");
        assert_eq!(capitalize("o"), "O");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn rest_is_untouched() {
        assert_eq!(capitalize("hELLO wORLD"), "HELLO wORLD");
        assert_eq!(capitalize("Already"), "Already");
        assert_eq!(capitalize("1st place"), "1st place");
        assert_eq!(capitalize(" leading space"), " leading space");
    }

    #[test]
    fn non_ascii_first_character() {
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize("ßtraße"), "SStraße");
        assert_eq!(capitalize("ωmega"), "Ωmega");
    }
}
