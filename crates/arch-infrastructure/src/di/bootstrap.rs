//! Composition root
//!
//! ```text
//! AppConfig ─┬─ linkme slices ─→ PresenterRegistry ─┐
//!            ├─ tokio handle  ─→ TaskRuntime       ─┼─→ ScopeTree
//!            └─ scopes.*      ─→ MockTable          ┘
//! ```

use std::sync::Arc;

use arch_application::TaskRuntime;
use arch_domain::Result;
use tracing::info;

use crate::config::AppConfig;
use crate::di::context::ScopeContext;
use crate::di::mocks::MockTable;
use crate::di::registry::PresenterRegistry;
use crate::di::scope::ScopeHandle;
use crate::di::teardown::TeardownReport;
use crate::di::tree::ScopeTree;

/// Everything a UI host needs, wired from configuration
#[derive(Clone, Debug)]
pub struct AppContainer {
    config: Arc<AppConfig>,
    registry: Arc<PresenterRegistry>,
    mocks: Arc<MockTable>,
    runtime: TaskRuntime,
    tree: ScopeTree,
}

/// Build the container from link-time registrations
///
/// Must be called inside a tokio runtime. Fails fast on duplicate bindings.
pub fn init_app(config: AppConfig) -> Result<AppContainer> {
    let registry = PresenterRegistry::from_link_time()?;
    AppContainer::with_registry(config, registry, MockTable::global())
}

impl AppContainer {
    /// Build the container around an explicit registry and mock table
    pub fn with_registry(
        config: AppConfig,
        registry: PresenterRegistry,
        mocks: Arc<MockTable>,
    ) -> Result<Self> {
        let runtime = TaskRuntime::current()?;
        let registry = Arc::new(registry);

        let previews = if config.scopes.install_previews {
            mocks.install_previews()
        } else {
            0
        };

        let tree = ScopeTree::builder(Arc::clone(&registry))
            .with_runtime(runtime.clone())
            .with_mock_table(Arc::clone(&mocks))
            .with_mock_overrides(config.scopes.mock_overrides)
            .build();

        info!(
            bindings = registry.len(),
            services = registry.list_services().len(),
            previews,
            mocks_enabled = tree.resolver().mocks_enabled(),
            "app container ready"
        );

        Ok(Self {
            config: Arc::new(config),
            registry,
            mocks,
            runtime,
            tree,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<PresenterRegistry> {
        &self.registry
    }

    pub fn mocks(&self) -> &Arc<MockTable> {
        &self.mocks
    }

    pub fn runtime(&self) -> &TaskRuntime {
        &self.runtime
    }

    pub fn tree(&self) -> &ScopeTree {
        &self.tree
    }

    /// Create the app scope; a second call fails until it is destroyed
    pub fn start(&self) -> Result<ScopeHandle> {
        self.tree.create_root_scope()
    }

    /// Context rooted at the tree, with nothing established yet
    pub fn context(&self) -> ScopeContext {
        ScopeContext::new(self.tree.clone())
    }

    /// Tear down the app scope, waiting up to the configured grace period
    pub async fn shutdown(&self) -> TeardownReport {
        self.tree.shutdown(self.config.scopes.teardown_grace()).await
    }
}
