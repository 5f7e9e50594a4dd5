//! Detail feature
//!
//! One article in full. Content follows the native language like catalog
//! rows do; every word of it is then translated into the learning language
//! one request at a time, and a language change restarts that pass.

pub mod contracts;
pub mod presenter;

pub use contracts::{DetailPresenter, DetailState, cache_key};
pub use presenter::DetailViewModel;
