use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::catalog::{CatalogStore, TleLoader};

/// Reload the TLE directory every `interval` and publish the result. A failed
/// reload keeps the current snapshot.
pub fn spawn_refresh(
    store: Arc<CatalogStore>,
    loader: TleLoader,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately; the initial load already happened.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let loader = loader.clone();
            match tokio::task::spawn_blocking(move || loader.load()).await {
                Ok(Ok(catalog)) if catalog.is_empty() => {
                    log::warn!("Catalog refresh found no satellites, keeping previous snapshot");
                }
                Ok(Ok(catalog)) => store.publish(catalog),
                Ok(Err(e)) => log::warn!("Catalog refresh failed: {}", e),
                Err(e) => log::warn!("Catalog refresh task panicked: {}", e),
            }
        }
    })
}
