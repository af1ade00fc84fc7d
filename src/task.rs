use crate::config::{self, ListenerMode};

/// Runs `f` off the calling thread. Completion is not observable by the caller.
pub fn spawn_listener<F>(f: F)
where
    F: FnOnce() + Send + 'static,
{
    match config::current().listener_mode {
        ListenerMode::Auto => match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                drop(handle.spawn_blocking(f));
            }
            Err(_) => spawn_thread(f),
        },
        ListenerMode::Thread => spawn_thread(f),
    }
}

fn spawn_thread<F>(f: F)
where
    F: FnOnce() + Send + 'static,
{
    let spawned = std::thread::Builder::new()
        .name("callback-listener".into())
        .spawn(f);
    if let Err(e) = spawned {
        tracing::error!(error = %e, "failed to spawn listener thread");
    }
}
