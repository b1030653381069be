use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// The target translation language is configured as an ISO 639-1 (2-letter)
/// or ISO 639-2/T (3-letter) code. These helpers validate the code once at
/// startup and resolve a human-readable name for logging.
/// Look up a language from a 2- or 3-letter ISO code
fn lookup(code: &str) -> Option<Language> {
    let normalized = code.trim().to_lowercase();
    match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    }
}

/// Validate that a language code is a known ISO 639-1 or ISO 639-2/T code
pub fn validate_language_code(code: &str) -> Result<()> {
    lookup(code)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// English name for a language code, e.g. "es" -> "Spanish"
pub fn get_language_name(code: &str) -> Result<String> {
    lookup(code)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))
}

/// Display form used in logs: "Spanish (es)", falling back to the raw code
/// when it cannot be resolved.
pub fn display_language(code: &str) -> String {
    match get_language_name(code) {
        Ok(name) => format!("{} ({})", name, code.trim().to_lowercase()),
        Err(_) => code.to_string(),
    }
}
