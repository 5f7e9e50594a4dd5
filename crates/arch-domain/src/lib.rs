//! # Archstarter Domain
//!
//! Pure types shared by every layer of the presenter runtime.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error enum and `Result` alias |
//! | [`ports`] | Presenter and one-time-init contracts |
//! | [`value_objects`] | Contract identities, presenter keys, scope identities |
//! | [`constants`] | Domain constants |
//!
//! This crate has no async runtime and no knowledge of how scopes are
//! stored; it only describes what a presenter is and how it is addressed.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{OnceParam, ParamInit, Presenter, PresenterInstance};
pub use value_objects::{ContractId, ErasedArc, PresenterKey, ScopeId, ScopeLevel};
