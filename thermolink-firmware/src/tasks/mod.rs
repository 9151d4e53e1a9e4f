//! Embassy async tasks

pub mod dispatch;
pub mod status;

pub use dispatch::{dispatch_task, ProbeDispatcher};
pub use status::status_task;
