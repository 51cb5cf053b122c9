// Re-export the public API from the appropriate module
#[cfg(target_arch = "wasm32")]
pub use wasm32::*;

#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm32::*;

use futures::future::LocalBoxFuture;

/// Runs detached tasks on the UI thread.
///
/// Client state is single-threaded (`Rc`/`RefCell`), so tasks are local and
/// never need to be `Send`.
pub trait Spawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}

/// Spawns onto the Dioxus runtime.  The task outlives the calling component.
#[derive(Clone, Copy, Debug, Default)]
pub struct DioxusSpawner;

impl Spawner for DioxusSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        let _ = dioxus::dioxus_core::spawn_forever(task);
    }
}

#[cfg(target_arch = "wasm32")]
pub mod wasm32 {
    use std::time::Duration;

    pub async fn sleep(duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod non_wasm32 {
    use std::time::Duration;

    pub async fn sleep(duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
