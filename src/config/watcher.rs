//! Configuration file watcher for hot reload.

use std::path::Path;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::AppConfig;

/// Watch the config file and emit reloaded configs over a channel.
///
/// Returns the watcher handle (dropping it stops watching) and the receiver
/// the server drains in its run loop. Reloads that fail to parse or
/// validate are logged and dropped; the running config stays in effect.
pub fn watch_config(
    path: &Path,
) -> Result<(RecommendedWatcher, mpsc::UnboundedReceiver<AppConfig>), notify::Error> {
    let (tx, rx) = mpsc::unbounded_channel();
    let watched = path.to_path_buf();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if event.kind.is_modify() || event.kind.is_create() {
                    tracing::info!(path = ?watched, "Config file change detected, reloading");
                    match load_config(&watched) {
                        Ok(config) => {
                            let _ = tx.send(config);
                        }
                        Err(e) => {
                            tracing::error!(
                                error = %e,
                                "Config reload rejected, keeping current configuration"
                            );
                        }
                    }
                }
            }
            Err(e) => tracing::error!(error = ?e, "Config watch error"),
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    )?;

    watcher.watch(path, RecursiveMode::NonRecursive)?;
    tracing::info!(path = ?path, "Config watcher started");

    Ok((watcher, rx))
}
