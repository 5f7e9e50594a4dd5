//! Detail presenter

use std::sync::Arc;

use arch_application::ports::registry::{PRESENTER_BINDINGS, PresenterBindingEntry};
use arch_application::{FactoryContext, PresenterState, ViewModelScope};
use arch_domain::{
    ContractId, OnceParam, ParamInit, Presenter, PresenterInstance, Result, ScopeId, ScopeLevel,
};
use indexmap::IndexMap;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::catalog::{Article, ArticleRepo};
use crate::detail::contracts::{DetailPresenter, DetailState, cache_key};
use crate::screen_bus::ScreenBus;
use crate::settings::{SettingsState, SettingsStateProvider, language_pair};

pub struct DetailViewModel {
    scope_id: ScopeId,
    article_id: OnceParam<i64>,
    repo: Arc<dyn ArticleRepo>,
    screen_bus: Arc<ScreenBus>,
    settings: Arc<dyn SettingsStateProvider>,
    scope: ViewModelScope,
    state: PresenterState<DetailState>,
}

impl DetailViewModel {
    pub fn build(ctx: &FactoryContext<'_>) -> Result<PresenterInstance> {
        let scope = ctx.task_scope(format!("detail:{}", ctx.key().unwrap_or("-")))?;
        let vm = Arc::new(Self {
            scope_id: ctx.scope_id(),
            article_id: OnceParam::new(),
            repo: ctx.service::<dyn ArticleRepo>()?,
            screen_bus: ctx.service::<ScreenBus>()?,
            settings: ctx.service::<dyn SettingsStateProvider>()?,
            state: scope.state(DetailState::default()),
            scope,
        });
        debug!(scope = %vm.scope_id, "detail presenter created");
        Ok(PresenterInstance::new::<dyn DetailPresenter>(vm.clone(), vm))
    }

    fn load(&self, id: i64) {
        let repo = Arc::clone(&self.repo);
        let bus = Arc::clone(&self.screen_bus);
        let settings = self.settings.state();
        let state = self.state.clone();
        self.scope.launch(async move {
            let article = match repo.article(id).await {
                Ok(Some(article)) => article,
                Ok(None) => {
                    warn!(id, "article not found");
                    return;
                }
                Err(e) => {
                    warn!(id, error = %e, "article load failed");
                    return;
                }
            };
            bus.send(format!("Detail loaded for article {id}: {}", article.title));
            state.update(|s| {
                s.title = article.title.clone();
                s.content = article.content.clone();
            });
            follow_languages(repo.as_ref(), &article, settings, &state).await;
        });
    }
}

/// Retranslate content on every settings change, then prefetch its words
///
/// A change that lands mid-prefetch abandons the pass and starts over with
/// the new pair.
async fn follow_languages(
    repo: &dyn ArticleRepo,
    article: &Article,
    mut settings: watch::Receiver<SettingsState>,
    state: &PresenterState<DetailState>,
) {
    loop {
        let current = settings.borrow_and_update().clone();
        let changed = match language_pair(&current) {
            Some((learning, native)) => {
                let content = translated_content(repo, article, learning, native).await;
                state.update(|s| s.content = content.clone());
                let interrupted = tokio::select! {
                    changed = settings.changed() => Some(changed),
                    () = prefetch_words(repo, &content, native, learning, state) => None,
                };
                match interrupted {
                    Some(changed) => changed,
                    None => settings.changed().await,
                }
            }
            None => settings.changed().await,
        };
        if changed.is_err() {
            break;
        }
    }
}

async fn translated_content(
    repo: &dyn ArticleRepo,
    article: &Article,
    learning: &str,
    native: &str,
) -> String {
    match repo.translate_content(article, learning, native).await {
        Ok(Some(text)) if !text.trim().is_empty() => text,
        Ok(_) => article.content.clone(),
        Err(e) => {
            debug!(id = article.id, error = %e, "content translation failed, keeping original");
            article.content.clone()
        }
    }
}

/// Translate every distinct word of `content` not cached yet, in order
async fn prefetch_words(
    repo: &dyn ArticleRepo,
    content: &str,
    from: &str,
    to: &str,
    state: &PresenterState<DetailState>,
) {
    for (key, word) in distinct_words(content) {
        if cached(state, &key).is_some() {
            continue;
        }
        // one word per request
        match repo.translate_word(&word, from, to).await {
            Ok(Some(translation)) => {
                remember(state, &key, &translation);
            }
            Ok(None) => {}
            Err(e) => debug!(word = %word, error = %e, "word translation failed"),
        }
    }
}

/// Words longer than one character, first spelling kept per cache key
fn distinct_words(content: &str) -> IndexMap<String, String> {
    let mut words = IndexMap::new();
    for word in content.split(|c: char| !(c.is_alphanumeric() || c == '\'')) {
        if word.chars().count() <= 1 {
            continue;
        }
        if let Some(key) = cache_key(word) {
            words.entry(key).or_insert_with(|| word.to_string());
        }
    }
    words
}

fn cached(state: &PresenterState<DetailState>, key: &str) -> Option<String> {
    state.subscribe().borrow().word_translations.get(key).cloned()
}

/// Store a translation under `key`; blank translations are dropped
fn remember(state: &PresenterState<DetailState>, key: &str, translation: &str) -> Option<String> {
    let translation = translation.trim();
    if translation.is_empty() {
        return None;
    }
    state.update(|s| {
        s.word_translations
            .insert(key.to_string(), translation.to_string());
    });
    Some(translation.to_string())
}

fn highlight(state: &PresenterState<DetailState>, word: &str, translation: &str) {
    state.update(|s| {
        s.highlighted_word = Some(word.to_string());
        s.highlighted_translation = Some(translation.to_string());
    });
}

impl DetailPresenter for DetailViewModel {
    fn state(&self) -> watch::Receiver<DetailState> {
        self.state.subscribe()
    }

    fn translate(&self, word: &str) {
        let word = word.trim().to_string();
        let Some(key) = cache_key(&word) else {
            return;
        };
        if let Some(translation) = cached(&self.state, &key) {
            highlight(&self.state, &word, &translation);
            return;
        }
        let Some((learning, native)) = language_pair(&self.settings.current()) else {
            debug!(word = %word, "no language pair, translation skipped");
            return;
        };

        let repo = Arc::clone(&self.repo);
        let state = self.state.clone();
        self.scope.launch(async move {
            match repo.translate_word(&word, native, learning).await {
                Ok(Some(translation)) => {
                    if let Some(translation) = remember(&state, &key, &translation) {
                        highlight(&state, &word, &translation);
                    }
                }
                Ok(None) => debug!(word = %word, "no translation known"),
                Err(e) => warn!(word = %word, error = %e, "word translation failed"),
            }
        });
    }
}

impl ParamInit<i64> for DetailViewModel {
    fn init_once(&self, params: Option<i64>) {
        if let Some(&id) = self.article_id.offer(params) {
            self.load(id);
        }
    }
}

impl Presenter for DetailViewModel {
    fn on_cleared(&self) -> Result<()> {
        debug!(scope = %self.scope_id, "detail presenter cleared");
        self.scope.cancel();
        Ok(())
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(PRESENTER_BINDINGS)]
static DETAIL_BINDING: PresenterBindingEntry = PresenterBindingEntry {
    contract: ContractId::of::<dyn DetailPresenter>,
    level: ScopeLevel::Screen,
    description: "Article detail, initialized with an article id",
    factory: DetailViewModel::build,
};
