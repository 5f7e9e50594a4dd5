//! Catalog feature
//!
//! ```text
//! screen scope ─── CatalogViewModel (article list, bridge delegate)
//!   ├── subscreen ─── CatalogItemViewModel[key = id]
//!   └── subscreen ─── CatalogItemViewModel[key = id]
//! ```
//!
//! Row presenters are bound at screen level and built inside each row's
//! sub-screen scope; closing a row tears down only that row. Clicks go to
//! the root-level [`CatalogBridge`] and to the screen's `ScreenBus`.

pub mod bridge;
pub mod contracts;
pub mod item;
pub mod list;
pub mod repository;

pub use bridge::CatalogBridge;
pub use contracts::{
    CatalogItem, CatalogItemBridge, CatalogItemPresenter, CatalogPresenter, CatalogState,
};
pub use item::CatalogItemViewModel;
pub use list::CatalogViewModel;
pub use repository::{Article, ArticleRepo, InMemoryArticleRepository};
