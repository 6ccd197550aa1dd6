// src/utils/html.rs

use ammonia;

/// Escape dynamic text for interpolation into HTML using the ammonia
/// library.
///
/// Question prompts, choices, and path-derived group codes are plain
/// strings, so everything is entity-escaped rather than whitelist-cleaned.
/// This serves as a fail-safe against reflected XSS via crafted catalog
/// content or URLs.
pub fn escape_text(input: &str) -> String {
    ammonia::clean_text(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        let out = escape_text("<script>alert(1)</script>");
        assert!(!out.contains('<'));
    }
}
