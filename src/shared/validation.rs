use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for file extensions kept on stored uploads
    /// Dot followed by 1-10 alphanumeric characters
    /// - Valid: ".jpg", ".PNG", ".webp"
    /// - Invalid: ".", ".tar.gz", ".j pg", "jpg", ".php%00"
    pub static ref FILE_EXTENSION_REGEX: Regex = Regex::new(r"^\.[A-Za-z0-9]{1,10}$").unwrap();
}

/// Returns true if the value is empty or only whitespace
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension_regex_valid() {
        assert!(FILE_EXTENSION_REGEX.is_match(".jpg"));
        assert!(FILE_EXTENSION_REGEX.is_match(".PNG"));
        assert!(FILE_EXTENSION_REGEX.is_match(".webp"));
    }

    #[test]
    fn test_file_extension_regex_invalid() {
        assert!(!FILE_EXTENSION_REGEX.is_match(".")); // no characters
        assert!(!FILE_EXTENSION_REGEX.is_match("jpg")); // missing dot
        assert!(!FILE_EXTENSION_REGEX.is_match(".tar.gz")); // two dots
        assert!(!FILE_EXTENSION_REGEX.is_match(".j pg")); // space
        assert!(!FILE_EXTENSION_REGEX.is_match("./../x")); // traversal
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \n\t"));
        assert!(!is_blank(" a "));
    }
}
