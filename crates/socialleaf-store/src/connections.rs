use std::fs;
use std::path::{Path, PathBuf};

use socialleaf_core::{ConnectionMap, ConnectionStatus, Platform};
use tokio::sync::broadcast;

use crate::error::StoreError;

const CONNECTIONS_FILE: &str = "socialleaf_connections.json";
const BROADCAST_CAPACITY: usize = 16;

/// A change notification published by the store.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// The connection registry was rewritten; carries the new map.
    ConnectionsChanged(ConnectionMap),
}

/// Owner of the persisted connection registry.
///
/// All mutations go through [`ConnectionStore::set`] / [`ConnectionStore::remove`],
/// which save the file and then publish [`StoreEvent::ConnectionsChanged`] to
/// every subscriber. Consumers that mutate the file out-of-band can call
/// [`ConnectionStore::publish_current`] to notify subscribers explicitly.
#[derive(Debug, Clone)]
pub struct ConnectionStore {
    path: PathBuf,
    tx: broadcast::Sender<StoreEvent>,
}

impl ConnectionStore {
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            path: data_dir.join(CONNECTIONS_FILE),
            tx,
        }
    }

    /// Subscribes to registry change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Loads the registry. A missing file yields an empty map; an unreadable
    /// or unparseable file is logged and also yields an empty map, so a
    /// corrupt registry never takes the dashboard down.
    #[must_use]
    pub fn load(&self) -> ConnectionMap {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return ConnectionMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read connections file");
                return ConnectionMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to parse connections file");
                ConnectionMap::new()
            }
        }
    }

    /// Persists the full registry atomically (write-then-rename).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the data directory cannot be created or
    /// the file cannot be written.
    pub fn save(&self, map: &ConnectionMap) -> Result<(), StoreError> {
        write_json_atomic(&self.path, map)
    }

    /// Upserts one platform's connection, saves, and notifies subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if persisting the registry fails; no event
    /// is published in that case.
    pub fn set(&self, platform: Platform, status: ConnectionStatus) -> Result<(), StoreError> {
        let mut map = self.load();
        map.set(platform, status);
        self.save(&map)?;
        self.publish(map);
        Ok(())
    }

    /// Removes one platform's connection, saves, and notifies subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if persisting the registry fails; no event
    /// is published in that case.
    pub fn remove(&self, platform: Platform) -> Result<(), StoreError> {
        let mut map = self.load();
        map.remove(platform);
        self.save(&map)?;
        self.publish(map);
        Ok(())
    }

    /// Re-reads the registry from disk and publishes it as a change event.
    pub fn publish_current(&self) {
        self.publish(self.load());
    }

    fn publish(&self, map: ConnectionMap) {
        // send only fails when nobody is subscribed, which is fine.
        let _ = self.tx.send(StoreEvent::ConnectionsChanged(map));
    }
}

pub(crate) fn write_json_atomic<T: serde::Serialize>(
    path: &Path,
    value: &T,
) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(value).map_err(|e| StoreError::Serialize {
        context: path.display().to_string(),
        source: e,
    })?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, raw)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConnectionStore::new(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_as_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONNECTIONS_FILE), "{not json").unwrap();
        let store = ConnectionStore::new(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn set_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConnectionStore::new(dir.path());
        store
            .set(
                Platform::Youtube,
                ConnectionStatus {
                    connected: true,
                    public_handle: Some("mrbeast".to_owned()),
                    ..ConnectionStatus::default()
                },
            )
            .unwrap();

        let reloaded = ConnectionStore::new(dir.path()).load();
        assert!(reloaded.is_connected(Platform::Youtube));
        assert_eq!(reloaded.handle_or(Platform::Youtube, "-"), "mrbeast");
    }

    #[tokio::test]
    async fn set_publishes_change_event() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConnectionStore::new(dir.path());
        let mut rx = store.subscribe();

        store
            .set(
                Platform::Twitter,
                ConnectionStatus {
                    connected: true,
                    ..ConnectionStatus::default()
                },
            )
            .unwrap();

        let StoreEvent::ConnectionsChanged(map) = rx.try_recv().expect("event should be queued");
        assert!(map.is_connected(Platform::Twitter));
        assert!(rx.try_recv().is_err(), "exactly one event per mutation");
    }

    #[tokio::test]
    async fn remove_publishes_updated_map() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConnectionStore::new(dir.path());
        store
            .set(
                Platform::Linkedin,
                ConnectionStatus {
                    connected: true,
                    ..ConnectionStatus::default()
                },
            )
            .unwrap();

        let mut rx = store.subscribe();
        store.remove(Platform::Linkedin).unwrap();

        let StoreEvent::ConnectionsChanged(map) = rx.try_recv().expect("event should be queued");
        assert!(!map.is_connected(Platform::Linkedin));
    }
}
