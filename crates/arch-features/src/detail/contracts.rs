//! Detail contracts

use std::collections::BTreeMap;

use arch_domain::{ParamInit, Presenter};
use tokio::sync::watch;

/// Full article view with tap-to-translate words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailState {
    pub title: String,
    /// Content in the native language when a translation is known
    pub content: String,
    pub highlighted_word: Option<String>,
    pub highlighted_translation: Option<String>,
    /// Cache key → translation into the learning language
    pub word_translations: BTreeMap<String, String>,
}

/// Presenter for one article; initialized with the article id
pub trait DetailPresenter: Presenter + ParamInit<i64> {
    fn state(&self) -> watch::Receiver<DetailState>;

    /// Highlight `word` with its translation, fetching it if not cached
    fn translate(&self, word: &str);
}

/// Key a word is cached under; `None` for blank input
pub fn cache_key(word: &str) -> Option<String> {
    let word = word.trim();
    (!word.is_empty()).then(|| word.to_lowercase())
}
