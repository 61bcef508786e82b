use crate::config;
use crate::events::AppEvent;
use crate::sys::server;
use async_channel::Sender;
use std::thread::{self, JoinHandle};
use tokio::runtime::Builder;

/// Runs the control socket and the config watcher on their own thread.
///
/// Events reach the GUI through `tx`; the thread exits once both services stop.
pub fn start_background_services(tx: Sender<AppEvent>) -> Option<JoinHandle<()>> {
    let spawned = thread::Builder::new()
        .name("dials-services".to_string())
        .spawn(move || {
            let rt = match Builder::new_current_thread().enable_all().build() {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create Tokio runtime: {}", e);
                    return;
                }
            };

            rt.block_on(async {
                tokio::join!(
                    server::run_server(tx.clone()),
                    config::run_async_watcher(tx)
                );
            });
            log::warn!("Background services stopped");
        });

    spawned
        .inspect_err(|e| log::error!("Failed to spawn service thread: {}", e))
        .ok()
}
