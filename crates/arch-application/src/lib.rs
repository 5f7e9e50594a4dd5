//! Application Layer - Archstarter
//!
//! Sits between the pure domain types and the scope runtime in
//! `arch-infrastructure`:
//!
//! - `ports::registry::*`: link-time registries that feature crates fill
//!   with presenter bindings, scoped services and preview stand-ins
//! - `ports::context`: what a factory sees while it builds a presenter
//! - `lifecycle::*`: the task scope and reactive state cell every presenter
//!   uses for background work
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `arch-domain`: presenter contracts, identities and errors
//! - tokio and tokio-util for cancellable background work

pub mod lifecycle;
pub mod ports;

pub use lifecycle::{PresenterState, TaskRuntime, ViewModelScope};
pub use ports::*;
