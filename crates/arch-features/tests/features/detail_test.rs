//! Detail presenter: content, word cache and prefetch

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use arch_application::FactoryContext;
use arch_domain::{Result, ScopeLevel};
use arch_features::detail::{DetailViewModel, cache_key};
use arch_features::{
    Article, ArticleRepo, DetailPresenter, ScreenBus, SettingsRepository, SettingsStateProvider,
};
use arch_infrastructure::config::AppConfig;
use arch_infrastructure::di::{AppContainer, PresenterRegistry};
use arch_infrastructure::{MockTable, remember_presenter};
use async_trait::async_trait;

use super::helpers::{app, settle};

/// One article whose words either translate to upper case or never answer
struct WordCountingRepo {
    article: Article,
    stalls: bool,
    lookups: AtomicUsize,
}

impl WordCountingRepo {
    fn new(content: &str, stalls: bool) -> Arc<Self> {
        Arc::new(Self {
            article: Article::new(1, "Test", "", "es").with_content(content),
            stalls,
            lookups: AtomicUsize::new(0),
        })
    }

    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArticleRepo for WordCountingRepo {
    async fn articles(&self) -> Result<Vec<Article>> {
        Ok(vec![self.article.clone()])
    }

    async fn article(&self, id: i64) -> Result<Option<Article>> {
        Ok((id == self.article.id).then(|| self.article.clone()))
    }

    async fn refresh(&self) -> Result<()> {
        Ok(())
    }

    async fn translate_summary(
        &self,
        article: &Article,
        _from: &str,
        _to: &str,
    ) -> Result<Option<String>> {
        Ok(Some(article.summary.clone()))
    }

    async fn translate_content(
        &self,
        article: &Article,
        _from: &str,
        _to: &str,
    ) -> Result<Option<String>> {
        Ok(Some(article.content.clone()))
    }

    async fn translate_word(&self, word: &str, _from: &str, _to: &str) -> Result<Option<String>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.stalls {
            std::future::pending::<()>().await;
        }
        Ok(Some(word.to_uppercase()))
    }
}

fn app_with(repo: &Arc<WordCountingRepo>) -> AppContainer {
    let repo: Arc<dyn ArticleRepo> = repo.clone();
    let registry = PresenterRegistry::builder()
        .bind::<dyn DetailPresenter, _>(ScopeLevel::Screen, "detail", DetailViewModel::build)
        .service::<dyn ArticleRepo, _>(ScopeLevel::Root, "counting repo", move |_ctx: &FactoryContext<'_>| {
            Ok(Arc::clone(&repo))
        })
        .service::<SettingsRepository, _>(ScopeLevel::Root, "settings", |_ctx: &FactoryContext<'_>| {
            Ok(Arc::new(SettingsRepository::new()))
        })
        .service::<dyn SettingsStateProvider, _>(ScopeLevel::Root, "settings view", |ctx: &FactoryContext<'_>| {
            let provider: Arc<dyn SettingsStateProvider> = ctx.service::<SettingsRepository>()?;
            Ok(provider)
        })
        .service::<ScreenBus, _>(ScopeLevel::Screen, "bus", |_ctx: &FactoryContext<'_>| {
            Ok(Arc::new(ScreenBus::new()))
        })
        .build()
        .unwrap();
    AppContainer::with_registry(AppConfig::default(), registry, Arc::new(MockTable::new())).unwrap()
}

async fn wait_for_lookups(repo: &WordCountingRepo, count: usize) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while repo.lookups() < count {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("word lookups did not start");
}

#[test]
fn test_cache_key_trims_and_lowercases() {
    assert_eq!(cache_key("  Word "), Some("word".to_string()));
    assert_eq!(cache_key("ÁRBOL"), Some("árbol".to_string()));
    assert_eq!(cache_key("   "), None);
}

#[tokio::test]
async fn test_translation_cached_by_normalized_word() {
    let repo = WordCountingRepo::new("", false);
    let app = app_with(&repo);
    app.start().unwrap();
    let screen = app.context().establish(false).unwrap();
    let detail = remember_presenter::<dyn DetailPresenter, i64>(&screen, None, None).unwrap();
    let mut state = detail.state();

    detail.translate("Word");
    let first = settle(&mut state, |s| s.highlighted_translation.is_some()).await;
    assert_eq!(first.highlighted_word.as_deref(), Some("Word"));
    assert_eq!(first.highlighted_translation.as_deref(), Some("WORD"));

    detail.translate("  word ");
    let second = state.borrow().clone();
    assert_eq!(second.highlighted_word.as_deref(), Some("word"));
    assert_eq!(second.highlighted_translation.as_deref(), Some("WORD"));
    assert_eq!(second.word_translations.len(), 1);
    assert_eq!(repo.lookups(), 1);

    detail.translate("   ");
    assert_eq!(repo.lookups(), 1);
}

#[tokio::test]
async fn test_prefetch_translates_each_word_once() {
    let repo = WordCountingRepo::new("Hola hola, mundo y adiós", false);
    let app = app_with(&repo);
    app.start().unwrap();
    let screen = app.context().establish(false).unwrap();
    let detail = remember_presenter::<dyn DetailPresenter, i64>(&screen, None, Some(1)).unwrap();
    let mut state = detail.state();

    let loaded = settle(&mut state, |s| s.word_translations.len() == 3).await;
    assert_eq!(loaded.title, "Test");
    assert_eq!(loaded.word_translations["hola"], "HOLA");
    assert_eq!(loaded.word_translations["adiós"], "ADIÓS");
    assert!(!loaded.word_translations.contains_key("y"));
    assert_eq!(repo.lookups(), 3);

    detail.translate("MUNDO");
    assert_eq!(state.borrow().highlighted_translation.as_deref(), Some("MUNDO"));
    assert_eq!(repo.lookups(), 3);

    let bus = screen.service::<ScreenBus>().unwrap();
    assert_eq!(bus.text(), "Detail loaded for article 1: Test");
}

#[tokio::test]
async fn test_prefetch_cancelled_when_screen_destroyed() {
    let repo = WordCountingRepo::new("uno dos tres", true);
    let app = app_with(&repo);
    app.start().unwrap();
    let screen = app.context().establish(false).unwrap();
    let detail = remember_presenter::<dyn DetailPresenter, i64>(&screen, None, Some(1)).unwrap();
    wait_for_lookups(&repo, 1).await;

    let report = screen.dispose();
    assert_eq!(report.cleared, 1);

    assert!(app.runtime().drain(Duration::from_secs(1)).await);
    assert_eq!(app.runtime().active_tasks(), 0);
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(repo.lookups(), 1);
    assert!(detail.state().borrow().word_translations.is_empty());
}

#[tokio::test]
async fn test_language_change_restarts_prefetch() {
    let repo = WordCountingRepo::new("uno dos", true);
    let app = app_with(&repo);
    app.start().unwrap();
    let screen = app.context().establish(false).unwrap();
    remember_presenter::<dyn DetailPresenter, i64>(&screen, None, Some(1)).unwrap();
    wait_for_lookups(&repo, 1).await;

    let settings = screen.service::<SettingsRepository>().unwrap();
    settings.update_native("German").unwrap();

    // the stalled lookup is abandoned and the pass starts again at "uno"
    wait_for_lookups(&repo, 2).await;
    screen.dispose();
}

#[tokio::test]
async fn test_seeded_article_content_follows_native_language() {
    let app = app();
    app.start().unwrap();
    let screen = app.context().establish(false).unwrap();
    let detail = remember_presenter::<dyn DetailPresenter, i64>(&screen, None, Some(2)).unwrap();
    let mut state = detail.state();

    let english = settle(&mut state, |s| s.word_translations.contains_key("hill")).await;
    assert_eq!(english.title, "La Alhambra");
    assert_eq!(
        english.content,
        "The Alhambra overlooks the city of Granada from the hill."
    );
    assert_eq!(english.word_translations["city"], "ciudad");

    detail.translate("Hill");
    let highlighted = state.borrow().clone();
    assert_eq!(highlighted.highlighted_word.as_deref(), Some("Hill"));
    assert_eq!(highlighted.highlighted_translation.as_deref(), Some("colina"));
}
