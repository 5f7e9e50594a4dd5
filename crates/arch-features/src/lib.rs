//! # Archstarter Features
//!
//! Feature presenters built on the scope runtime. Every module registers
//! its bindings, scoped services and preview stand-ins into the link-time
//! slices of `arch-application`; linking this crate is all a host needs to
//! do to make them resolvable.
//!
//! | Module | Contracts | Scope level |
//! |--------|-----------|-------------|
//! | [`catalog`] | `CatalogPresenter`, `CatalogItemPresenter` | screen |
//! | [`detail`] | `DetailPresenter` | screen |
//! | [`onboarding`] | `OnboardingPresenter` | screen |
//! | [`settings`] | `SettingsPresenter`, `LanguageChooserPresenter` | screen |
//! | [`counter`] | `CounterPresenter` | screen |
//! | [`screen_bus`] | `ScreenBus` service | screen |
//!
//! Repositories (`ArticleRepo`, `SettingsRepository`,
//! `OnboardingRepository`) and the catalog bridge are root-level services
//! shared by every screen.

pub mod catalog;
pub mod counter;
pub mod detail;
pub mod onboarding;
#[cfg(debug_assertions)]
pub mod previews;
pub mod screen_bus;
pub mod settings;

pub use catalog::{
    Article, ArticleRepo, CatalogBridge, CatalogItem, CatalogItemBridge, CatalogItemPresenter,
    CatalogPresenter, CatalogState, InMemoryArticleRepository,
};
pub use counter::CounterPresenter;
pub use detail::{DetailPresenter, DetailState};
pub use onboarding::{
    OnboardingPage, OnboardingPresenter, OnboardingRepository, OnboardingState,
    OnboardingStatusProvider,
};
pub use screen_bus::ScreenBus;
pub use settings::{
    LanguageChooserParams, LanguageChooserPresenter, LanguageChooserRole, LanguageChooserState,
    LanguageSelectionBus, LanguageSelectionEvent, SettingsPresenter, SettingsRepository,
    SettingsState, SettingsStateProvider,
};
