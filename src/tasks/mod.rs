//! Task resource: model, owner-scoped in-memory store, request validation
//! and the HTTP handlers binding them together.

pub mod handlers;
pub mod models;
pub mod store;
pub mod validation;

pub use models::{NewTask, Task, TaskId, TaskPatch};
pub use store::TaskStore;
