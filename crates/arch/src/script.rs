//! Text driver for the navigation host
//!
//! One command per line; blank lines and `#` comments are skipped.
//!
//! | Command | Screen | Effect |
//! |---------|--------|--------|
//! | `open <destination>` | any | push a destination |
//! | `back` | any | pop the current destination |
//! | `show` | any | render the current destination |
//! | `inc` | counter | increment the counter |
//! | `refresh` | catalog | pull the next article |
//! | `click <id>` | catalog | click the row of article `id`, opening its detail |
//! | `close <id>` | catalog | close the row of article `id` |
//! | `translate <word>` | detail | highlight a word with its translation |
//! | `continue` | onboarding | finish onboarding and replace it with the catalog |
//! | `native <language>` | settings | pick a native language |
//! | `learning <language>` | settings | pick a learning language |
//!
//! The whole script is parsed before anything runs.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use arch_domain::{Error, Result};
use arch_features::{
    CatalogItem, CatalogItemPresenter, CatalogPresenter, CounterPresenter, DetailPresenter,
    LanguageChooserParams, LanguageChooserPresenter, LanguageChooserRole, OnboardingPresenter,
    ScreenBus, SettingsPresenter,
};
use arch_infrastructure::{TeardownReport, remember_presenter};
use tokio::sync::watch;
use tracing::warn;

use crate::host::{BackStackEntry, Destination, NavHost};

/// How long rendering waits for asynchronous presenter state
const RENDER_SETTLE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(Destination),
    Back,
    Show,
    Increment,
    Refresh,
    Click(i64),
    CloseRow(i64),
    Translate(String),
    Continue,
    SelectLanguage(LanguageChooserRole, String),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(destination) => write!(f, "open {destination}"),
            Self::Back => f.write_str("back"),
            Self::Show => f.write_str("show"),
            Self::Increment => f.write_str("inc"),
            Self::Refresh => f.write_str("refresh"),
            Self::Click(id) => write!(f, "click {id}"),
            Self::CloseRow(id) => write!(f, "close {id}"),
            Self::Translate(word) => write!(f, "translate {word}"),
            Self::Continue => f.write_str("continue"),
            Self::SelectLanguage(LanguageChooserRole::Native, language) => {
                write!(f, "native {language}")
            }
            Self::SelectLanguage(LanguageChooserRole::Learning, language) => {
                write!(f, "learning {language}")
            }
        }
    }
}

fn parse_line(line: &str) -> Result<Command> {
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let id = || {
        rest.parse::<i64>()
            .map_err(|_| Error::configuration(format!("`{word}` expects an article id, got `{rest}`")))
    };
    let argument = |what: &str| {
        if rest.is_empty() {
            Err(Error::configuration(format!("`{word}` expects {what}")))
        } else {
            Ok(rest.to_string())
        }
    };
    match word {
        "open" => Ok(Command::Open(argument("a destination")?.parse()?)),
        "back" => Ok(Command::Back),
        "show" => Ok(Command::Show),
        "inc" => Ok(Command::Increment),
        "refresh" => Ok(Command::Refresh),
        "click" => Ok(Command::Click(id()?)),
        "close" => Ok(Command::CloseRow(id()?)),
        "translate" => Ok(Command::Translate(argument("a word")?)),
        "continue" => Ok(Command::Continue),
        "native" => Ok(Command::SelectLanguage(
            LanguageChooserRole::Native,
            argument("a language")?,
        )),
        "learning" => Ok(Command::SelectLanguage(
            LanguageChooserRole::Learning,
            argument("a language")?,
        )),
        other => Err(Error::configuration(format!("Unknown command: {other}"))),
    }
}

/// Parse a whole script; errors name the offending line
pub fn parse_script(text: &str) -> Result<Vec<Command>> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| {
            parse_line(line).map_err(|e| Error::configuration(format!("line {number}: {e}")))
        })
        .collect()
}

/// Wait briefly for `pred`, then take whatever the state is
async fn settle<T: Clone>(rx: &mut watch::Receiver<T>, pred: impl FnMut(&T) -> bool) -> T {
    if let Ok(Ok(state)) = tokio::time::timeout(RENDER_SETTLE, rx.wait_for(pred)).await {
        return T::clone(&state);
    }
    rx.borrow().clone()
}

/// Executes commands against a [`NavHost`] and renders the result
#[derive(Debug)]
pub struct ScriptRunner {
    host: NavHost,
}

impl ScriptRunner {
    pub fn new(host: NavHost) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &NavHost {
        &self.host
    }

    /// Parse and run `text`; returns every rendered line
    pub async fn run_script(&mut self, text: &str) -> Result<Vec<String>> {
        let commands = parse_script(text)?;
        let mut output = Vec::new();
        for command in &commands {
            output.extend(self.execute(command).await?);
        }
        Ok(output)
    }

    /// Run one command; returns the lines it rendered
    pub async fn execute(&mut self, command: &Command) -> Result<Vec<String>> {
        match command {
            Command::Open(destination) => {
                self.host.navigate(*destination)?;
                self.render().await
            }
            Command::Back => match self.host.back() {
                Some(report) => {
                    log_failures(&report);
                    self.render().await
                }
                None => Ok(vec!["(already at the start destination)".to_string()]),
            },
            Command::Show => self.render().await,
            Command::Increment => {
                let entry = self.entry_for(Destination::Counter, command)?;
                let counter =
                    remember_presenter::<dyn CounterPresenter, i64>(entry.context(), None, None)?;
                counter.on_increment();
                Ok(Vec::new())
            }
            Command::Refresh => {
                let entry = self.entry_for(Destination::Catalog, command)?;
                let catalog =
                    remember_presenter::<dyn CatalogPresenter, ()>(entry.context(), None, None)?;
                catalog.on_refresh();
                settle(&mut catalog.state(), |s| !s.is_loading).await;
                Ok(Vec::new())
            }
            Command::Click(id) => {
                let entry = self.entry_for(Destination::Catalog, command)?;
                // the catalog presenter receives clicks through the bridge
                let catalog =
                    remember_presenter::<dyn CatalogPresenter, ()>(entry.context(), None, None)?;
                let item = row_presenter(entry, *id)?;
                let row = settle(&mut item.state(), |s| s.id == *id).await;
                item.on_click();
                if row.id != *id || catalog.state().borrow().opened != Some(*id) {
                    return Ok(Vec::new());
                }
                self.host.navigate(Destination::Detail(*id))?;
                self.render().await
            }
            Command::CloseRow(id) => {
                let entry = self.entry_for(Destination::Catalog, command)?;
                if let Some(report) = entry.close_row(*id) {
                    log_failures(&report);
                }
                Ok(Vec::new())
            }
            Command::Translate(word) => {
                let entry = self.current_entry()?;
                let Destination::Detail(id) = entry.destination() else {
                    return Err(wrong_screen(command, "detail", entry.destination()));
                };
                let detail = detail_presenter(entry, id)?;
                detail.translate(word);
                let word = word.trim().to_string();
                settle(&mut detail.state(), |s| {
                    s.highlighted_word.as_deref() == Some(word.as_str())
                })
                .await;
                Ok(Vec::new())
            }
            Command::Continue => {
                let entry = self.entry_for(Destination::Onboarding, command)?;
                let onboarding =
                    remember_presenter::<dyn OnboardingPresenter, ()>(entry.context(), None, None)?;
                onboarding.on_continue();
                settle(&mut onboarding.state(), |s| s.completed).await;
                self.host.replace(Destination::Catalog)?;
                self.render().await
            }
            Command::SelectLanguage(role, language) => {
                let entry = self.entry_for(Destination::Settings, command)?;
                select_language(entry, *role, language).await?;
                Ok(Vec::new())
            }
        }
    }

    fn current_entry(&mut self) -> Result<&mut BackStackEntry> {
        self.host
            .current_mut()
            .ok_or_else(|| Error::internal("navigation stack is empty"))
    }

    fn entry_for(&mut self, expected: Destination, command: &Command) -> Result<&mut BackStackEntry> {
        let entry = self.current_entry()?;
        if entry.destination() != expected {
            return Err(wrong_screen(command, expected.as_str(), entry.destination()));
        }
        Ok(entry)
    }

    async fn render(&mut self) -> Result<Vec<String>> {
        let stack = self
            .host
            .destinations()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" > ");
        let entry = self.current_entry()?;
        let mut lines = vec![format!("[{stack}]")];
        match entry.destination() {
            Destination::Catalog => lines.extend(render_catalog(entry).await?),
            Destination::Detail(id) => lines.extend(render_detail(entry, id).await?),
            Destination::Onboarding => lines.extend(render_onboarding(entry)?),
            Destination::Settings => lines.extend(render_settings(entry)?),
            Destination::Counter => {
                let counter =
                    remember_presenter::<dyn CounterPresenter, i64>(entry.context(), None, None)?;
                lines.push(format!("  count: {}", *counter.state().borrow()));
            }
        }
        Ok(lines)
    }

    /// Stop the host, unwinding every scope
    pub async fn finish(self) -> TeardownReport {
        self.host.shutdown().await
    }
}

fn wrong_screen(command: &Command, expected: &str, current: Destination) -> Error {
    Error::presenter(format!(
        "`{command}` needs the {expected} screen, current is {current}"
    ))
}

fn detail_presenter(entry: &BackStackEntry, id: i64) -> Result<Arc<dyn DetailPresenter>> {
    remember_presenter::<dyn DetailPresenter, i64>(entry.context(), None, Some(id))
}

fn row_presenter(entry: &mut BackStackEntry, id: i64) -> Result<Arc<dyn CatalogItemPresenter>> {
    let key = id.to_string();
    let row = entry.row(id)?;
    remember_presenter::<dyn CatalogItemPresenter, i64>(row, Some(&key), Some(id))
}

async fn render_catalog(entry: &mut BackStackEntry) -> Result<Vec<String>> {
    let catalog = remember_presenter::<dyn CatalogPresenter, ()>(entry.context(), None, None)?;
    let state = settle(&mut catalog.state(), |s| !s.is_loading).await;
    let bus = entry.context().service::<ScreenBus>()?;

    let mut lines = Vec::new();
    if let Some(error) = &state.error {
        lines.push(format!("  error: {error}"));
    }
    for id in &state.item_ids {
        let item = row_presenter(entry, *id)?;
        let CatalogItem { title, summary, .. } = settle(&mut item.state(), |s| s.id == *id).await;
        lines.push(format!("  {id}. {title}: {summary}"));
    }
    if let Some(opened) = state.opened {
        lines.push(format!("  opened: {opened}"));
    }
    lines.push(format!("  bus: {}", bus.text()));
    Ok(lines)
}

async fn render_detail(entry: &BackStackEntry, id: i64) -> Result<Vec<String>> {
    let detail = detail_presenter(entry, id)?;
    let state = settle(&mut detail.state(), |s| !s.title.is_empty()).await;
    let bus = entry.context().service::<ScreenBus>()?;

    let mut lines = vec![
        format!("  title: {}", state.title),
        format!("  content: {}", state.content),
    ];
    if let (Some(word), Some(translation)) =
        (&state.highlighted_word, &state.highlighted_translation)
    {
        lines.push(format!("  highlight: {word} -> {translation}"));
    }
    lines.push(format!("  words: {}", state.word_translations.len()));
    lines.push(format!("  bus: {}", bus.text()));
    Ok(lines)
}

fn render_onboarding(entry: &BackStackEntry) -> Result<Vec<String>> {
    let onboarding = remember_presenter::<dyn OnboardingPresenter, ()>(entry.context(), None, None)?;
    let state = onboarding.state().borrow().clone();
    let mut lines: Vec<String> = state
        .pages
        .iter()
        .enumerate()
        .map(|(index, page)| format!("  {}. {}: {}", index + 1, page.title, page.message))
        .collect();
    lines.push(format!(
        "  completed: {}",
        if state.completed { "yes" } else { "no" }
    ));
    Ok(lines)
}

fn render_settings(entry: &BackStackEntry) -> Result<Vec<String>> {
    let settings = remember_presenter::<dyn SettingsPresenter, ()>(entry.context(), None, None)?;
    let state = settings.state().borrow().clone();
    Ok(vec![
        format!("  native: {}", state.native_language),
        format!("  learning: {}", state.learning_language),
    ])
}

async fn select_language(
    entry: &mut BackStackEntry,
    role: LanguageChooserRole,
    language: &str,
) -> Result<()> {
    let settings = remember_presenter::<dyn SettingsPresenter, ()>(entry.context(), None, None)?;
    let mut settings_state = settings.state();
    let current = settings_state.borrow().clone();
    let selected = match role {
        LanguageChooserRole::Native => current.native_language,
        LanguageChooserRole::Learning => current.learning_language,
    };

    let chooser = remember_presenter::<dyn LanguageChooserPresenter, LanguageChooserParams>(
        entry.context(),
        Some(role.key()),
        Some(LanguageChooserParams {
            role,
            selected_language: selected,
        }),
    )?;
    chooser.on_toggle_expanded();
    chooser.on_query_change(language);
    let choice = chooser
        .state()
        .borrow()
        .results
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(language.trim()))
        .cloned()
        .ok_or_else(|| Error::presenter(format!("Unsupported language: {language}")))?;
    chooser.on_select(&choice);

    settle(&mut settings_state, |s| match role {
        LanguageChooserRole::Native => s.native_language == choice,
        LanguageChooserRole::Learning => s.learning_language == choice,
    })
    .await;
    Ok(())
}

fn log_failures(report: &TeardownReport) {
    for failure in &report.failures {
        warn!(failure = %failure, "teardown failure");
    }
}
