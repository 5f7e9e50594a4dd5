//! Settings feature
//!
//! The user's native and learning languages. [`SettingsRepository`] is the
//! app-wide source of truth; the settings screen edits it through two
//! language choosers (one per role, resolved under distinct keys) that
//! publish their picks on a screen-scoped [`LanguageSelectionBus`].

pub mod chooser;
pub mod contracts;
pub mod language;
pub mod presenter;
pub mod repository;
pub mod selection;

pub use chooser::LanguageChooserViewModel;
pub use contracts::{
    LanguageChooserParams, LanguageChooserPresenter, LanguageChooserRole, LanguageChooserState,
    LanguageSelectionEvent, SettingsPresenter, SettingsState, SettingsStateProvider,
};
pub use language::{
    SUPPORTED_LANGUAGES, canonical_name, language_code, language_pair, supported_languages,
};
pub use presenter::SettingsViewModel;
pub use repository::SettingsRepository;
pub use selection::LanguageSelectionBus;
