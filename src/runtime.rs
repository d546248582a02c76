//! Runtime abstraction for spawned tasks
//!
//! Background work is spawned through this seam so owners hold a handle
//! they can cancel; no task in the crate outlives the component that
//! started it.

use std::future::Future;

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task
    fn cancel(&self);
}

struct TokioHandle(tokio::task::JoinHandle<()>);

impl AsyncHandle for TokioHandle {
    fn is_finished(&self) -> bool {
        self.0.is_finished()
    }

    fn cancel(&self) {
        self.0.abort();
    }
}

/// Spawn a future on the ambient tokio runtime and return a cancellable
/// handle to it.
pub fn spawn<F>(future: F) -> Box<dyn AsyncHandle>
where
    F: Future<Output = ()> + Send + 'static,
{
    Box::new(TokioHandle(tokio::spawn(future)))
}
