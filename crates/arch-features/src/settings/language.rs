//! Supported languages

use crate::settings::contracts::SettingsState;

/// Display name and ISO 639-1 code of every selectable language
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("English", "en"),
    ("Spanish", "es"),
    ("French", "fr"),
    ("German", "de"),
    ("Italian", "it"),
    ("Portuguese", "pt"),
    ("Dutch", "nl"),
    ("Polish", "pl"),
    ("Russian", "ru"),
    ("Japanese", "ja"),
];

/// Code for a display name, ignoring ASCII case
pub fn language_code(name: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(display, _)| display.eq_ignore_ascii_case(name.trim()))
        .map(|(_, code)| *code)
}

/// Display name as listed, for a name matched ignoring ASCII case
pub fn canonical_name(name: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(display, _)| display.eq_ignore_ascii_case(name.trim()))
        .map(|(display, _)| *display)
}

/// (learning, native) codes, when both languages are known
pub fn language_pair(settings: &SettingsState) -> Option<(&'static str, &'static str)> {
    Some((
        language_code(&settings.learning_language)?,
        language_code(&settings.native_language)?,
    ))
}

pub fn supported_languages() -> impl Iterator<Item = &'static str> {
    SUPPORTED_LANGUAGES.iter().map(|(display, _)| *display)
}
