//! Language selector mapping.
//!
//! The chat client offers languages under their native display names; the
//! backend expects plain English names. Unknown display names fall back to
//! English rather than erroring -- the language is presentational, never a
//! precondition.

/// Supported display names, in selector order.
pub const DISPLAY_LANGUAGES: &[&str] = &[
    "English",
    "සිංහල",
    "Français (French)",
    "Русский (Russian)",
    "日本語 (Japanese)",
    "한국어 (Korean)",
    "中文 (Chinese)",
    "Українська (Ukrainian)",
    "हिन्दी (Hindi)",
    "தமிழ் (Tamil)",
    "Nederlands (Dutch)",
];

/// Map a display language name to the backend language name.
pub fn backend_language(display: &str) -> &'static str {
    match display {
        "English" => "English",
        "සිංහල" => "Sinhala",
        "Français (French)" => "French",
        "Русский (Russian)" => "Russian",
        "日本語 (Japanese)" => "Japanese",
        "한국어 (Korean)" => "Korean",
        "中文 (Chinese)" => "Chinese",
        "Українська (Ukrainian)" => "Ukrainian",
        "हिन्दी (Hindi)" => "Hindi",
        "தமிழ் (Tamil)" => "Tamil",
        "Nederlands (Dutch)" => "Dutch",
        _ => "English",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_languages_map() {
        assert_eq!(backend_language("සිංහල"), "Sinhala");
        assert_eq!(backend_language("日本語 (Japanese)"), "Japanese");
        assert_eq!(backend_language("English"), "English");
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        assert_eq!(backend_language("Klingon"), "English");
        assert_eq!(backend_language(""), "English");
    }

    #[test]
    fn test_every_display_language_maps() {
        for display in DISPLAY_LANGUAGES {
            // No display entry may fall through to the catch-all by accident;
            // only genuinely unknown names map to English.
            let mapped = backend_language(display);
            assert!(!mapped.is_empty());
            if *display != "English" {
                assert_ne!(mapped, "English", "'{display}' hit the fallback");
            }
        }
    }
}
