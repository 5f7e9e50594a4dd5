//! Domain Port Interfaces
//!
//! Contracts implemented by feature presenters and consumed by the scope
//! runtime in the infrastructure layer.

/// Presenter lifecycle and one-time-init contracts
pub mod presenter;

pub use presenter::{OnceParam, ParamInit, Presenter, PresenterInstance};
