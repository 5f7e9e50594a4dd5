//! Navigation host
//!
//! ```text
//! navigate(dest) ──→ establish(false) ──→ new screen scope under the app scope
//! back()         ──→ dispose()        ──→ destroy screen (rows first)
//! replace(dest)  ──→ dispose() + establish(false)
//! row(id)        ──→ establish(true)  ──→ new sub-screen scope under the screen
//! ```
//!
//! `back` never pops the start destination, `replace` may; shutdown unwinds
//! the whole stack and then the app scope.

use std::fmt;
use std::str::FromStr;

use arch_domain::{Error, Result};
use arch_features::SettingsRepository;
use arch_infrastructure::{AppContainer, ErrorContext, ScopeContext, TeardownReport};
use tracing::{debug, info, warn};

/// Screens the host knows how to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Catalog,
    /// One article, by id
    Detail(i64),
    Onboarding,
    Settings,
    Counter,
}

impl Destination {
    /// Route name, without arguments
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Detail(_) => "detail",
            Self::Onboarding => "onboarding",
            Self::Settings => "settings",
            Self::Counter => "counter",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detail(id) => write!(f, "detail {id}"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl FromStr for Destination {
    type Err = Error;

    /// `detail` takes the article id as a second word, as in `detail 2`
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        let (name, argument) = match normalized.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, Some(argument.trim())),
            None => (normalized.as_str(), None),
        };
        match (name, argument) {
            ("catalog", None) => Ok(Self::Catalog),
            ("onboarding", None) => Ok(Self::Onboarding),
            ("settings", None) => Ok(Self::Settings),
            ("counter", None) => Ok(Self::Counter),
            ("detail", Some(id)) => id.parse().map(Self::Detail).map_err(|_| {
                Error::configuration(format!("Destination detail expects an article id, got `{id}`"))
            }),
            ("detail", None) => Err(Error::configuration(
                "Destination detail expects an article id",
            )),
            _ => Err(Error::configuration(format!("Unknown destination: {normalized}"))),
        }
    }
}

/// One destination on the back stack and the scopes it owns
#[derive(Debug)]
pub struct BackStackEntry {
    destination: Destination,
    context: ScopeContext,
    rows: Vec<(i64, ScopeContext)>,
}

impl BackStackEntry {
    pub fn destination(&self) -> Destination {
        self.destination
    }

    /// Context of the destination's screen scope
    pub fn context(&self) -> &ScopeContext {
        &self.context
    }

    /// Sub-screen context for row `id`, created on first use
    pub fn row(&mut self, id: i64) -> Result<&ScopeContext> {
        let index = match self.rows.iter().position(|(row, _)| *row == id) {
            Some(index) => index,
            None => {
                let row = self.context.establish(true)?;
                self.rows.push((id, row));
                self.rows.len() - 1
            }
        };
        Ok(&self.rows[index].1)
    }

    /// Close the sub-screen of row `id`, if it is open
    pub fn close_row(&mut self, id: i64) -> Option<TeardownReport> {
        let index = self.rows.iter().position(|(row, _)| *row == id)?;
        let (_, row) = self.rows.remove(index);
        Some(row.dispose())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn close(self) -> TeardownReport {
        // rows are children of the screen and go with it
        self.context.dispose()
    }
}

/// Back stack of screen scopes over one app container
#[derive(Debug)]
pub struct NavHost {
    container: AppContainer,
    stack: Vec<BackStackEntry>,
}

impl NavHost {
    /// Open the app scope and enter the configured start destination
    ///
    /// Fails with `RootScopeExists` if the container already has a live
    /// app scope.
    pub fn start(container: AppContainer) -> Result<Self> {
        let root = container.start()?;
        let mut host = Self {
            container,
            stack: Vec::new(),
        };
        match host.enter_start_destination() {
            Ok(start) => {
                info!(scope = %root.id(), start = %start, "navigation host started");
                Ok(host)
            }
            Err(e) => {
                let report = host.container.tree().destroy(&root);
                warn!(error = %e, cleared = report.cleared, "navigation host failed to start");
                Err(e)
            }
        }
    }

    /// Apply the configured languages and push the start destination
    fn enter_start_destination(&mut self) -> Result<Destination> {
        let host_config = self.container.config().host.clone();

        let settings = self.container.context().service::<SettingsRepository>()?;
        settings
            .update_native(&host_config.native_language)
            .config_context("Invalid host.native_language")?;
        settings
            .update_learning(&host_config.learning_language)
            .config_context("Invalid host.learning_language")?;

        let start: Destination = host_config.start_destination.parse()?;
        self.navigate(start)?;
        Ok(start)
    }

    /// Push `destination` in a fresh screen scope
    pub fn navigate(&mut self, destination: Destination) -> Result<&mut BackStackEntry> {
        let context = self.container.context().establish(false)?;
        if let Some(scope) = context.scope() {
            debug!(destination = %destination, scope = %scope.id(), depth = self.stack.len() + 1, "destination entered");
        }
        self.stack.push(BackStackEntry {
            destination,
            context,
            rows: Vec::new(),
        });
        let index = self.stack.len() - 1;
        Ok(&mut self.stack[index])
    }

    /// Swap the current destination for `destination`
    ///
    /// Unlike [`NavHost::back`], this also replaces the start destination.
    pub fn replace(&mut self, destination: Destination) -> Result<&mut BackStackEntry> {
        if let Some(entry) = self.stack.pop() {
            let previous = entry.destination;
            let report = entry.close();
            debug!(from = %previous, to = %destination, cleared = report.cleared, "destination replaced");
        }
        self.navigate(destination)
    }

    /// Pop the current destination; `None` at the start destination
    pub fn back(&mut self) -> Option<TeardownReport> {
        if self.stack.len() <= 1 {
            return None;
        }
        let entry = self.stack.pop()?;
        let destination = entry.destination;
        let report = entry.close();
        debug!(destination = %destination, cleared = report.cleared, "destination exited");
        Some(report)
    }

    pub fn current(&self) -> Option<&BackStackEntry> {
        self.stack.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut BackStackEntry> {
        self.stack.last_mut()
    }

    /// Destinations from the bottom of the stack to the top
    pub fn destinations(&self) -> Vec<Destination> {
        self.stack.iter().map(|e| e.destination).collect()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn container(&self) -> &AppContainer {
        &self.container
    }

    /// Unwind the stack, then the app scope
    pub async fn shutdown(mut self) -> TeardownReport {
        let mut report = TeardownReport::default();
        while let Some(entry) = self.stack.pop() {
            report.merge(entry.close());
        }
        report.merge(self.container.shutdown().await);
        info!(
            scopes = report.scopes.len(),
            cleared = report.cleared,
            failures = report.failures.len(),
            "navigation host stopped"
        );
        report
    }
}
