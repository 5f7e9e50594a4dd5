//! Settings contracts

use arch_domain::{ParamInit, Presenter};
use tokio::sync::watch;

/// Language pair the app reads and translates with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsState {
    pub native_language: String,
    pub learning_language: String,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            native_language: "English".to_string(),
            learning_language: "Spanish".to_string(),
        }
    }
}

/// Read-only view of the current settings
pub trait SettingsStateProvider: Send + Sync {
    fn state(&self) -> watch::Receiver<SettingsState>;

    fn current(&self) -> SettingsState {
        self.state().borrow().clone()
    }
}

/// Settings screen
pub trait SettingsPresenter: Presenter + ParamInit<()> {
    fn state(&self) -> watch::Receiver<SettingsState>;
    fn on_native_selected(&self, language: &str);
    fn on_learning_selected(&self, language: &str);
}

/// Which language slot a chooser edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageChooserRole {
    Native,
    Learning,
}

impl LanguageChooserRole {
    /// Presenter key for the chooser of this role
    pub fn key(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Learning => "learning",
        }
    }
}

/// Parameters a chooser is initialized with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageChooserParams {
    pub role: LanguageChooserRole,
    pub selected_language: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageChooserState {
    pub selected_language: String,
    pub query: String,
    pub is_expanded: bool,
    pub results: Vec<String>,
}

/// Emitted whenever a chooser produces a new selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSelectionEvent {
    pub role: LanguageChooserRole,
    pub language: String,
}

/// Searchable dropdown for one language slot
pub trait LanguageChooserPresenter: Presenter + ParamInit<LanguageChooserParams> {
    fn state(&self) -> watch::Receiver<LanguageChooserState>;
    fn on_toggle_expanded(&self);
    fn on_dismiss(&self);
    fn on_query_change(&self, query: &str);
    fn on_select(&self, language: &str);
}
