//! Article repository
//!
//! The port is async so a networked implementation can replace the
//! in-memory one without touching the presenters.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use arch_application::ports::registry::{SCOPED_SERVICES, ScopedServiceEntry};
use arch_domain::{ContractId, ErasedArc, Result, ScopeLevel};
use async_trait::async_trait;
use tracing::debug;

/// Number of seed articles visible before the first refresh
const INITIAL_ARTICLES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub summary: String,
    /// Full text shown on the detail screen
    pub content: String,
    /// Code of the language the summary and content are written in
    pub language: String,
}

impl Article {
    pub fn new(id: i64, title: &str, summary: &str, language: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            summary: summary.to_string(),
            content: summary.to_string(),
            language: language.to_string(),
        }
    }

    /// Replace the content, which defaults to the summary
    pub fn with_content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }
}

#[async_trait]
pub trait ArticleRepo: Send + Sync {
    /// Articles currently in the catalog, in display order
    async fn articles(&self) -> Result<Vec<Article>>;

    async fn article(&self, id: i64) -> Result<Option<Article>>;

    /// Pull the next article into the catalog, if any are left
    async fn refresh(&self) -> Result<()>;

    /// Summary of `article` translated from `from` to `to`, if known
    async fn translate_summary(
        &self,
        article: &Article,
        from: &str,
        to: &str,
    ) -> Result<Option<String>>;

    /// Content of `article` translated from `from` to `to`, if known
    async fn translate_content(
        &self,
        article: &Article,
        from: &str,
        to: &str,
    ) -> Result<Option<String>>;

    /// One word translated from `from` to `to`, if known
    async fn translate_word(&self, word: &str, from: &str, to: &str) -> Result<Option<String>>;
}

#[derive(Debug, Default)]
struct Store {
    visible: Vec<Article>,
    pending: Vec<Article>,
}

/// Repository over a fixed article pool
#[derive(Debug)]
pub struct InMemoryArticleRepository {
    store: RwLock<Store>,
    translations: HashMap<(i64, String), String>,
    contents: HashMap<(i64, String), String>,
    /// (from, to, lowercased word) → translation
    dictionary: HashMap<(String, String, String), String>,
}

impl InMemoryArticleRepository {
    /// All of `articles` visible, no translations
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            store: RwLock::new(Store {
                visible: articles,
                pending: Vec::new(),
            }),
            translations: HashMap::new(),
            contents: HashMap::new(),
            dictionary: HashMap::new(),
        }
    }

    /// Add a known translation of article `id` into `language`
    pub fn with_translation(mut self, id: i64, language: &str, summary: &str) -> Self {
        self.translations
            .insert((id, language.to_string()), summary.to_string());
        self
    }

    /// Add a known translation of the content of article `id`
    pub fn with_content_translation(mut self, id: i64, language: &str, content: &str) -> Self {
        self.contents
            .insert((id, language.to_string()), content.to_string());
        self
    }

    /// Add a dictionary entry for `word` from `from` to `to`
    pub fn with_word(mut self, from: &str, to: &str, word: &str, translation: &str) -> Self {
        self.dictionary.insert(
            (from.to_string(), to.to_string(), word.to_lowercase()),
            translation.to_string(),
        );
        self
    }

    /// Spanish reading list with English and some French translations
    pub fn seeded() -> Self {
        let mut pool = vec![
            Article::new(
                1,
                "El Quijote",
                "Novela de Miguel de Cervantes sobre un hidalgo que enloquece leyendo libros de caballerías.",
                "es",
            )
            .with_content("Don Quijote lee libros de caballerías y sale a buscar aventuras."),
            Article::new(
                2,
                "La Alhambra",
                "Palacio y fortaleza andalusí situada en Granada.",
                "es",
            )
            .with_content("La Alhambra domina la ciudad de Granada desde la colina."),
            Article::new(
                3,
                "El ajolote",
                "Anfibio mexicano capaz de regenerar sus extremidades.",
                "es",
            ),
            Article::new(
                4,
                "Machu Picchu",
                "Ciudadela inca construida en el siglo XV en los Andes.",
                "es",
            ),
            Article::new(5, "La siesta", "Breve descanso tomado después del almuerzo.", "es"),
        ];
        let pending = pool.split_off(INITIAL_ARTICLES.min(pool.len()));
        let mut repo = Self::new(pool);
        repo.store_mut().pending = pending.into_iter().rev().collect();

        repo.with_translation(
            1,
            "en",
            "Novel by Miguel de Cervantes about a nobleman who goes mad reading chivalric romances.",
        )
        .with_translation(
            1,
            "fr",
            "Roman de Miguel de Cervantes sur un hidalgo qui devient fou en lisant des romans de chevalerie.",
        )
        .with_translation(2, "en", "Andalusian palace and fortress located in Granada.")
        .with_translation(2, "fr", "Palais et forteresse andalous situés à Grenade.")
        .with_translation(3, "en", "Mexican amphibian able to regenerate its limbs.")
        .with_translation(
            4,
            "en",
            "Inca citadel built in the fifteenth century in the Andes.",
        )
        .with_translation(5, "en", "Short rest taken after lunch.")
        .with_content_translation(
            1,
            "en",
            "Don Quixote reads books of chivalry and sets out to find adventures.",
        )
        .with_content_translation(
            2,
            "en",
            "The Alhambra overlooks the city of Granada from the hill.",
        )
        .with_word("en", "es", "reads", "lee")
        .with_word("en", "es", "books", "libros")
        .with_word("en", "es", "chivalry", "caballerías")
        .with_word("en", "es", "find", "buscar")
        .with_word("en", "es", "adventures", "aventuras")
        .with_word("en", "es", "overlooks", "domina")
        .with_word("en", "es", "city", "ciudad")
        .with_word("en", "es", "hill", "colina")
    }

    fn store_mut(&mut self) -> &mut Store {
        self.store.get_mut().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ArticleRepo for InMemoryArticleRepository {
    async fn articles(&self) -> Result<Vec<Article>> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        Ok(store.visible.clone())
    }

    async fn article(&self, id: i64) -> Result<Option<Article>> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        Ok(store.visible.iter().find(|a| a.id == id).cloned())
    }

    async fn refresh(&self) -> Result<()> {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(next) = store.pending.pop() {
            debug!(id = next.id, title = %next.title, "article added");
            store.visible.push(next);
        }
        Ok(())
    }

    async fn translate_summary(
        &self,
        article: &Article,
        from: &str,
        to: &str,
    ) -> Result<Option<String>> {
        if from == to || to == article.language {
            return Ok(Some(article.summary.clone()));
        }
        Ok(self.translations.get(&(article.id, to.to_string())).cloned())
    }

    async fn translate_content(
        &self,
        article: &Article,
        from: &str,
        to: &str,
    ) -> Result<Option<String>> {
        if from == to || to == article.language {
            return Ok(Some(article.content.clone()));
        }
        Ok(self.contents.get(&(article.id, to.to_string())).cloned())
    }

    async fn translate_word(&self, word: &str, from: &str, to: &str) -> Result<Option<String>> {
        if from == to {
            return Ok(Some(word.to_string()));
        }
        let key = (from.to_string(), to.to_string(), word.trim().to_lowercase());
        Ok(self.dictionary.get(&key).cloned())
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(SCOPED_SERVICES)]
static ARTICLE_REPO_SERVICE: ScopedServiceEntry = ScopedServiceEntry {
    service: ContractId::of::<dyn ArticleRepo>,
    level: ScopeLevel::Root,
    description: "In-memory article repository",
    factory: |_ctx| {
        let repo: Arc<dyn ArticleRepo> = Arc::new(InMemoryArticleRepository::seeded());
        Ok(ErasedArc::new(repo))
    },
};
