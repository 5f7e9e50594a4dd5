//! Presenter Lifecycle Kit
//!
//! Background work of a presenter is spawned through a [`ViewModelScope`];
//! observable state lives in a [`PresenterState`] that shares the scope's
//! gate. Cancelling the scope closes the gate first, so once `cancel`
//! returns no task can publish into the presenter's state any more.

pub mod state;
pub mod task_scope;

pub use state::PresenterState;
pub use task_scope::{TaskRuntime, ViewModelScope};
