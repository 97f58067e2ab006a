//! Domain model (ids, lifecycle state, task).

pub mod ids;
pub mod state;
pub mod task;

pub use ids::TaskId;
pub(crate) use ids::TaskHandle;
pub use state::TaskState;
pub use task::{ActionCall, Task, TaskParams};
