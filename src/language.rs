//! Known target language codes.

use crate::ui::Style;

/// Common ISO 639-1 target codes (plus `zh-TW`), with display names.
///
/// This is a hint list for `anypdf languages`, prompts and warnings, not the
/// service's catalogue. The service decides what it accepts, so codes outside
/// this list are still submitted and a rejection comes back as a validation
/// error.
pub const KNOWN_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sv", "Swedish"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
];

/// Prints all known language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Known target language codes"));
    for (code, name) in KNOWN_LANGUAGES {
        println!("  {:5} {}", Style::code(code), Style::secondary(name));
    }
    println!();
    println!(
        "{}",
        Style::hint("Other codes are passed through; the service has the final say.")
    );
}

pub fn is_known_language(code: &str) -> bool {
    language_name(code).is_some()
}

/// Returns the display name for a known code.
pub fn language_name(code: &str) -> Option<&'static str> {
    KNOWN_LANGUAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
}

/// `"es (Spanish)"` for a known code, the bare code otherwise.
pub fn describe_language(code: &str) -> String {
    language_name(code).map_or_else(|| code.to_string(), |name| format!("{code} ({name})"))
}
